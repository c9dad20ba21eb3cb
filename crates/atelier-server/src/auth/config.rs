// Authentication configuration loaded from environment variables.
// Decision: Cookie flags are driven by APP_ENV, not set per-route

use axum_extra::extract::cookie::SameSite;
use rand::Rng;

/// Configuration for session cookies and signing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Key for signing session cookie values
    pub session_secret: String,
    /// Whether the session cookie is marked Secure
    pub cookie_secure: bool,
    /// SameSite policy for the session cookie
    pub cookie_same_site: SameSite,
}

/// Cookie flags per deployment environment. Cross-origin frontends need
/// SameSite=None, which browsers only accept together with Secure.
fn cookie_flags(production: bool) -> (bool, SameSite) {
    if production {
        (true, SameSite::None)
    } else {
        (false, SameSite::Lax)
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let production = std::env::var("APP_ENV")
            .map(|s| s.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            if production {
                tracing::warn!("SESSION_SECRET not set, using insecure default");
                "insecure-dev-secret-change-me".to_string()
            } else {
                // Random per-process secret for dev; dev sessions do not
                // need to survive restarts anyway.
                let bytes: [u8; 32] = rand::thread_rng().gen();
                hex::encode(bytes)
            }
        });

        let (cookie_secure, cookie_same_site) = cookie_flags(production);

        Self {
            session_secret,
            cookie_secure,
            cookie_same_site,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_cookie_flags() {
        let (secure, same_site) = cookie_flags(true);
        assert!(secure);
        assert_eq!(same_site, SameSite::None);
    }

    #[test]
    fn test_dev_cookie_flags() {
        let (secure, same_site) = cookie_flags(false);
        assert!(!secure);
        assert_eq!(same_site, SameSite::Lax);
    }
}
