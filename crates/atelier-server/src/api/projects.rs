// Project CRUD HTTP routes
//
// Paths and JSON field names are the contract the existing frontend
// already speaks; they are kept verbatim (camelCase foreign keys, verb
// paths like /newproject). Ownership gates deletion and the edit view:
// only the project's owner may pass those.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::MessageResponse;
use crate::auth::middleware::{AuthState, FromRef, Principal};
use crate::storage::{CreateProjectRow, ProjectRow, StorageBackend, UpdateProject};

/// App state for project routes
#[derive(Clone)]
pub struct ProjectsState {
    pub db: StorageBackend,
    pub auth: AuthState,
}

impl FromRef<ProjectsState> for AuthState {
    fn from_ref(input: &ProjectsState) -> Self {
        input.auth.clone()
    }
}

/// Public project record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

/// Request to create a project
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Request to list one user's projects
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserProjectsRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Request to update a project. Only provided fields are changed.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProjectResponse {
    pub message: String,
    pub project: Project,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateProjectResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Create project routes
pub fn routes(state: ProjectsState) -> Router {
    Router::new()
        .route("/newproject", post(create_project))
        .route("/project/:id", get(get_project))
        .route("/fetchprojects", get(fetch_projects))
        .route("/fetchuserprojects", post(fetch_user_projects))
        .route("/delete/:id", delete(delete_project))
        .route("/edit/:id", get(edit_project).put(update_project))
        .with_state(state)
}

/// POST /newproject - Create a project
///
/// No authentication gate here; the request body carries the owner's
/// `userId` directly.
#[utoipa::path(
    post,
    path = "/newproject",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created", body = CreateProjectResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<ProjectsState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<CreateProjectResponse>, (StatusCode, Json<MessageResponse>)> {
    let row = state
        .db
        .create_project(CreateProjectRow {
            title: req.title,
            description: req.description,
            user_id: req.user_id,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to create project: {}", e);
            MessageResponse::new("Failed to create project")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

    Ok(Json(CreateProjectResponse {
        message: "Project created".to_string(),
        project: row.into(),
    }))
}

/// GET /project/:id - Get project by ID
#[utoipa::path(
    get,
    path = "/project/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 404, description = "Project not found", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, (StatusCode, Json<MessageResponse>)> {
    let row = state
        .db
        .get_project(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get project: {}", e);
            MessageResponse::new("Failed to fetch project")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?
        .ok_or_else(|| {
            MessageResponse::new("Project not found").into_response(StatusCode::NOT_FOUND)
        })?;

    Ok(Json(ProjectResponse {
        project: row.into(),
    }))
}

/// GET /fetchprojects - List all projects, newest first
#[utoipa::path(
    get,
    path = "/fetchprojects",
    responses(
        (status = 200, description = "All projects, newest first", body = ProjectListResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn fetch_projects(
    State(state): State<ProjectsState>,
) -> Result<Json<ProjectListResponse>, (StatusCode, Json<MessageResponse>)> {
    let rows = state.db.list_projects().await.map_err(|e| {
        tracing::error!("Failed to list projects: {}", e);
        MessageResponse::new("Failed to fetch projects")
            .into_response(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Ok(Json(ProjectListResponse {
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

/// POST /fetchuserprojects - List one user's projects
#[utoipa::path(
    post,
    path = "/fetchuserprojects",
    request_body = UserProjectsRequest,
    responses(
        (status = 200, description = "The user's projects", body = ProjectListResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn fetch_user_projects(
    State(state): State<ProjectsState>,
    Json(req): Json<UserProjectsRequest>,
) -> Result<Json<ProjectListResponse>, (StatusCode, Json<MessageResponse>)> {
    let rows = state.db.list_user_projects(req.user_id).await.map_err(|e| {
        tracing::error!("Failed to list user projects: {}", e);
        MessageResponse::new("Failed to fetch projects")
            .into_response(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Ok(Json(ProjectListResponse {
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /delete/:id - Delete a project (owner only)
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 403, description = "Not the owner", body = MessageResponse),
        (status = 404, description = "Project not found", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<ProjectsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let project = state
        .db
        .get_project(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get project for deletion: {}", e);
            MessageResponse::new("Failed to delete project")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?
        .ok_or_else(|| {
            MessageResponse::new("Project not found").into_response(StatusCode::NOT_FOUND)
        })?;

    if project.user_id != principal.id {
        return Err(MessageResponse::new("Only the project owner can delete it")
            .into_response(StatusCode::FORBIDDEN));
    }

    let deleted = state.db.delete_project(id).await.map_err(|e| {
        tracing::error!("Failed to delete project: {}", e);
        MessageResponse::new("Failed to delete project")
            .into_response(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    if deleted {
        Ok(Json(MessageResponse::new("Project deleted")))
    } else {
        Err(MessageResponse::new("Project not found").into_response(StatusCode::NOT_FOUND))
    }
}

/// GET /edit/:id - Fetch a project for editing (owner only)
#[utoipa::path(
    get,
    path = "/edit/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 403, description = "Not the owner", body = MessageResponse),
        (status = 404, description = "Project not found", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn edit_project(
    State(state): State<ProjectsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, (StatusCode, Json<MessageResponse>)> {
    let project = state
        .db
        .get_project(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get project for editing: {}", e);
            MessageResponse::new("Failed to fetch project")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?
        .ok_or_else(|| {
            MessageResponse::new("Project not found").into_response(StatusCode::NOT_FOUND)
        })?;

    if project.user_id != principal.id {
        return Err(MessageResponse::new("Only the project owner can edit it")
            .into_response(StatusCode::FORBIDDEN));
    }

    Ok(Json(ProjectResponse {
        project: project.into(),
    }))
}

/// PUT /edit/:id - Update a project
///
/// No ownership check here; only the GET counterpart gates the edit view.
#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = UpdateProjectResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "projects"
)]
pub async fn update_project(
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<UpdateProjectResponse>, (StatusCode, Json<MessageResponse>)> {
    let row = state
        .db
        .update_project(
            id,
            UpdateProject {
                title: req.title,
                description: req.description,
            },
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to update project: {}", e);
            MessageResponse::new("Failed to update project")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

    Ok(Json(UpdateProjectResponse {
        message: "Project updated".to_string(),
        project: row.map(Into::into),
    }))
}
