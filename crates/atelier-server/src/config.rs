// Runtime configuration loaded from environment variables
// Decision: Absent DATABASE_URL / REDIS_URL fall back to in-memory
// backends so a bare `cargo run` works for local development

use axum::http::HeaderValue;

pub use crate::auth::config::AuthConfig;

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address
    pub bind_addr: String,
    /// Postgres connection URL; None means in-memory storage (dev mode)
    pub database_url: Option<String>,
    /// Redis connection URL; None means in-memory sessions
    pub redis_url: Option<String>,
    /// Exact origins allowed for credentialed CORS requests
    pub cors_origins: Vec<HeaderValue>,
    /// Session cookie configuration
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        let redis_url = std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty());

        // Only needed when the frontend is served from a different origin
        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        Self {
            bind_addr,
            database_url,
            redis_url,
            cors_origins,
            auth: AuthConfig::from_env(),
        }
    }
}

/// Parse a comma-separated origin allow-list into header values.
pub fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}
