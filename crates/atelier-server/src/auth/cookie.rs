// Signed session cookie values
//
// The client never sees the raw session id alone: the cookie value is
// `<session_id>.<hex hmac-sha256>` keyed by the session secret, so a
// forged or tampered cookie fails verification before any store lookup.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

fn sign(secret: &str, session_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(session_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Produce the signed cookie value for a session id.
pub fn seal(secret: &str, session_id: &str) -> String {
    format!("{}.{}", session_id, sign(secret, session_id))
}

/// Recover the session id from a signed cookie value.
///
/// Returns None for malformed values and for signature mismatches; the
/// comparison is constant-time.
pub fn unseal(secret: &str, value: &str) -> Option<String> {
    let (session_id, signature_hex) = value.split_once('.')?;
    let signature = hex::decode(signature_hex).ok()?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(session_id.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(session_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_seal_unseal_roundtrip() {
        let sealed = seal(SECRET, "abc123");
        assert_eq!(unseal(SECRET, &sealed), Some("abc123".to_string()));
    }

    #[test]
    fn test_tampered_session_id_rejected() {
        let sealed = seal(SECRET, "abc123");
        let tampered = sealed.replacen("abc123", "abc124", 1);
        assert_eq!(unseal(SECRET, &tampered), None);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let sealed = seal(SECRET, "abc123");
        let mut tampered = sealed[..sealed.len() - 2].to_string();
        tampered.push_str("00");
        assert_eq!(unseal(SECRET, &tampered), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let sealed = seal(SECRET, "abc123");
        assert_eq!(unseal("another-secret", &sealed), None);
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert_eq!(unseal(SECRET, ""), None);
        assert_eq!(unseal(SECRET, "no-dot-at-all"), None);
        assert_eq!(unseal(SECRET, "id.not-hex"), None);
    }
}
