// Atelier API server
// Decision: Session state lives behind an injected store, never a
// process-wide global; the store backend is picked at startup from env

use anyhow::{Context, Result};
use axum::http::{header, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use atelier_server::auth::middleware::AuthState;
use atelier_server::auth::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use atelier_server::config::AppConfig;
use atelier_server::storage::StorageBackend;
use atelier_server::{app, ApiDoc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_server=debug,tower_http=debug".into()),
        )
        .init();

    tracing::info!("atelier-server starting...");

    let config = AppConfig::from_env();

    // Storage backend
    let db = match &config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data lost on restart)");
            StorageBackend::in_memory()
        }
    };

    // Session store
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let store = RedisSessionStore::connect(url)
                .await
                .context("Failed to connect to session store")?;
            tracing::info!("Using Redis session store");
            Arc::new(store)
        }
        None => {
            tracing::info!("Using in-memory session store (single instance only)");
            Arc::new(MemorySessionStore::new())
        }
    };

    let auth_state = AuthState::new(config.auth.clone(), sessions, db);

    let app = app(auth_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        )
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
