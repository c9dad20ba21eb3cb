// Authentication HTTP routes
// Decision: Session-cookie auth only; the frontend never sees a token
// Decision: Unknown email and wrong password share one failure message

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    cookie::{self, SESSION_COOKIE},
    middleware::{AuthError, AuthState, OptionalPrincipal},
    password::hash_password,
    session::SESSION_TTL_SECS,
    strategy::{authenticate, LoginOutcome},
};
use crate::api::common::MessageResponse;
use crate::storage::CreateUserRow;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public view of a user record. Never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Login/signup response
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserInfo,
}

/// Session status response
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/auth/check", get(auth_check))
        .with_state(state)
}

/// POST /login - Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AuthError> {
    let outcome = authenticate(&state.db, &req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::error!("Store error during login: {}", e);
            AuthError::unauthorized("Login failed")
        })?;

    let user = match outcome {
        LoginOutcome::Success(user) => user,
        // One message for both outcomes, so responses don't enumerate users
        LoginOutcome::NoSuchUser | LoginOutcome::BadPassword => {
            return Err(AuthError::unauthorized("Invalid email or password"));
        }
    };

    let session_id = state.sessions.create(user.id).await.map_err(|e| {
        tracing::error!("Session store create failed: {}", e);
        AuthError::unauthorized("Login failed")
    })?;

    let sealed = cookie::seal(&state.config.session_secret, &session_id);
    let session_cookie = Cookie::build((SESSION_COOKIE, sealed))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(state.config.cookie_same_site)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build();

    Ok((
        jar.add(session_cookie),
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserInfo {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        }),
    ))
}

/// POST /signup - Register a new user
///
/// Does not log the user in; the frontend follows up with POST /login.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created", body = AuthResponse),
        (status = 400, description = "Email already registered", body = MessageResponse),
        (status = 500, description = "Hashing or store error", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AuthState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    // Two concurrent signups can both pass this check; the database's
    // unique index on email is the final arbiter.
    let existing = state.db.get_user_by_email(&req.email).await.map_err(|e| {
        tracing::error!("Store error during signup: {}", e);
        AuthError::internal("Signup failed")
    })?;

    if existing.is_some() {
        return Err(AuthError::bad_request("Email already registered"));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing error: {}", e);
        AuthError::internal("Signup failed")
    })?;

    let user = state
        .db
        .create_user(CreateUserRow {
            name: req.name,
            email: req.email,
            password_hash,
        })
        .await
        .map_err(|e| {
            tracing::error!("User creation error: {}", e);
            AuthError::internal("Signup failed")
        })?;

    Ok(Json(AuthResponse {
        message: "Signup successful".to_string(),
        user: UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
        },
    }))
}

/// POST /logout - Destroy the session and clear the cookie
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session destroyed, cookie cleared", body = MessageResponse),
        (status = 401, description = "No session", body = MessageResponse),
        (status = 500, description = "Session store error", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AuthError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .and_then(|raw| cookie::unseal(&state.config.session_secret, raw.value()))
        .ok_or_else(|| AuthError::unauthorized("Not logged in"))?;

    state.sessions.destroy(&session_id).await.map_err(|e| {
        tracing::error!("Session store destroy failed: {}", e);
        AuthError::internal("Logout failed")
    })?;

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}

/// GET /auth/check - Report whether the request carries a live session
#[utoipa::path(
    get,
    path = "/auth/check",
    responses(
        (status = 200, description = "Session status", body = AuthCheckResponse)
    ),
    tag = "auth"
)]
pub async fn auth_check(principal: OptionalPrincipal) -> Json<AuthCheckResponse> {
    match principal.0 {
        Some(p) => Json(AuthCheckResponse {
            authenticated: true,
            user: Some(UserInfo {
                id: p.id,
                email: p.email,
                name: p.name,
            }),
        }),
        None => Json(AuthCheckResponse {
            authenticated: false,
            user: None,
        }),
    }
}
