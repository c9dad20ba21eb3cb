// Session resolution middleware and extractors
// Decision: The principal is an explicit extractor value threaded through
// handler arguments, never state mutated onto a shared request object
//
// On every request the signed cookie is unsealed, the session store is
// read, and the user record is re-fetched by id, so the principal always
// reflects the current stored state. Only the id is ever persisted in the
// session; profile fields are never cached there.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    config::AuthConfig,
    cookie::{self, SESSION_COOKIE},
    session::SessionStore,
};
use crate::storage::StorageBackend;

/// Authentication/authorization error with a `{message}` JSON body.
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub message: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::FORBIDDEN,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// The authenticated identity resolved for a request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub sessions: Arc<dyn SessionStore>,
    pub db: StorageBackend,
}

impl AuthState {
    pub fn new(config: AuthConfig, sessions: Arc<dyn SessionStore>, db: StorageBackend) -> Self {
        Self {
            config,
            sessions,
            db,
        }
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extractor for the authenticated principal.
/// This is required - returns 401 if the request has no valid session.
#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        resolve_principal(parts, &auth_state)
            .await
            .ok_or_else(|| AuthError::unauthorized("Not logged in"))
    }
}

/// Optional extractor - resolves to None instead of rejecting.
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<Principal>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalPrincipal
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        Ok(OptionalPrincipal(
            resolve_principal(parts, &auth_state).await,
        ))
    }
}

/// Resolve the session cookie to a principal, if any.
///
/// Every failure mode short of a panic degrades to "no session": a missing
/// or tampered cookie, an expired or unknown session, an unreachable
/// session store (logged), and a user deleted after login. Store outages
/// must never take the process down with the request.
async fn resolve_principal(parts: &Parts, auth_state: &AuthState) -> Option<Principal> {
    let jar = CookieJar::from_headers(&parts.headers);
    let raw = jar.get(SESSION_COOKIE)?;
    let session_id = cookie::unseal(&auth_state.config.session_secret, raw.value())?;

    let principal_id = match auth_state.sessions.read(&session_id).await {
        Ok(Some(id)) => id,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!("Session store read failed: {}", e);
            return None;
        }
    };

    // Re-fetch the user so the principal reflects the current record.
    let user = match auth_state.db.get_user(principal_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("User lookup failed during session resolution: {}", e);
            return None;
        }
    };

    user.map(|u| Principal {
        id: u.id,
        name: u.name,
        email: u.email,
    })
}
