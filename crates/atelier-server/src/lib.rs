// Atelier server library
// Decision: Router assembly lives here so tests can drive the full app
// without binding a socket

pub mod api;
pub mod auth;
pub mod config;
pub mod storage;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

use auth::middleware::AuthState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::login,
        auth::routes::signup,
        auth::routes::logout,
        auth::routes::auth_check,
        api::projects::create_project,
        api::projects::get_project,
        api::projects::fetch_projects,
        api::projects::fetch_user_projects,
        api::projects::delete_project,
        api::projects::edit_project,
        api::projects::update_project,
        api::messages::post_message,
        api::messages::get_messages,
        api::messages::get_name,
    ),
    components(
        schemas(
            auth::routes::LoginRequest,
            auth::routes::SignupRequest,
            auth::routes::UserInfo,
            auth::routes::AuthResponse,
            auth::routes::AuthCheckResponse,
            api::common::MessageResponse,
            api::projects::Project,
            api::projects::CreateProjectRequest,
            api::projects::UserProjectsRequest,
            api::projects::UpdateProjectRequest,
            api::projects::CreateProjectResponse,
            api::projects::ProjectResponse,
            api::projects::ProjectListResponse,
            api::projects::UpdateProjectResponse,
            api::messages::Message,
            api::messages::PostMessageRequest,
            api::messages::GetMessagesRequest,
            api::messages::MessagesResponse,
            api::messages::ProjectOwnerRequest,
            api::messages::ProjectUserDetails,
            api::messages::ProjectOwnerResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and session endpoints"),
        (name = "projects", description = "Project CRUD endpoints"),
        (name = "messages", description = "Messaging endpoints")
    ),
    info(
        title = "Atelier API",
        version = "0.1.0",
        description = "Backend-for-frontend for the projects and messages domain",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Assemble the application router from shared auth state.
pub fn app(auth_state: AuthState) -> Router {
    let projects_state = api::projects::ProjectsState {
        db: auth_state.db.clone(),
        auth: auth_state.clone(),
    };
    let messages_state = api::messages::MessagesState {
        db: auth_state.db.clone(),
        auth: auth_state.clone(),
    };

    Router::new()
        .route("/health", get(health))
        .merge(auth::routes(auth_state))
        .merge(api::projects::routes(projects_state))
        .merge(api::messages::routes(messages_state))
}
