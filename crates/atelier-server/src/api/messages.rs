// Message HTTP routes
//
// Messages are denormalized on write: the sender's name and email ride
// along with each row so the inbox renders without user-table joins.
// /getname resolves a project to its owner's contact details, which is
// how the frontend addresses a new message thread.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::MessageResponse;
use crate::auth::middleware::{AuthState, FromRef, Principal};
use crate::storage::{CreateMessageRow, MessageRow, StorageBackend};

/// App state for message routes
#[derive(Clone)]
pub struct MessagesState {
    pub db: StorageBackend,
    pub auth: AuthState,
}

impl FromRef<MessagesState> for AuthState {
    fn from_ref(input: &MessagesState) -> Self {
        input.auth.clone()
    }
}

/// Public message record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub message: String,
    #[serde(rename = "senderId")]
    pub sender_id: Uuid,
    #[serde(rename = "receiverId")]
    pub receiver_id: Uuid,
    #[serde(rename = "senderEmail")]
    pub sender_email: String,
    #[serde(rename = "projectId")]
    pub project_id: Uuid,
    #[serde(rename = "senderName")]
    pub sender_name: String,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            message: row.message,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            sender_email: row.sender_email,
            project_id: row.project_id,
            sender_name: row.sender_name,
        }
    }
}

/// Request to post a message
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub message: String,
    #[serde(rename = "senderId")]
    pub sender_id: Uuid,
    #[serde(rename = "receiverId")]
    pub receiver_id: Uuid,
    #[serde(rename = "senderEmail")]
    pub sender_email: String,
    #[serde(rename = "projectId")]
    pub project_id: Uuid,
    #[serde(rename = "senderName")]
    pub sender_name: String,
}

/// Request to list one user's messages
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetMessagesRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Messages response. The field name is the casing the frontend expects.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessagesResponse {
    #[serde(rename = "Messages")]
    pub messages: Vec<Message>,
}

/// Request to resolve a project's owner
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProjectOwnerRequest {
    #[serde(rename = "projectId")]
    pub project_id: Uuid,
}

/// A project owner's contact details
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectUserDetails {
    pub name: String,
    pub email: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectOwnerResponse {
    #[serde(rename = "projectUserDetails")]
    pub project_user_details: ProjectUserDetails,
}

/// Create message routes
pub fn routes(state: MessagesState) -> Router {
    Router::new()
        .route("/messagepost", post(post_message))
        .route("/getmessages", post(get_messages))
        .route("/getname", post(get_name))
        .with_state(state)
}

/// POST /messagepost - Send a message
#[utoipa::path(
    post,
    path = "/messagepost",
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Message stored", body = MessageResponse),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "messages"
)]
pub async fn post_message(
    State(state): State<MessagesState>,
    _principal: Principal,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    state
        .db
        .create_message(CreateMessageRow {
            message: req.message,
            sender_id: req.sender_id,
            receiver_id: req.receiver_id,
            sender_email: req.sender_email,
            project_id: req.project_id,
            sender_name: req.sender_name,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to store message: {}", e);
            MessageResponse::new("Failed to send message")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

    Ok(Json(MessageResponse::new("Message sent")))
}

/// POST /getmessages - List all messages a user participates in
#[utoipa::path(
    post,
    path = "/getmessages",
    request_body = GetMessagesRequest,
    responses(
        (status = 200, description = "Messages for the user", body = MessagesResponse),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    ),
    tag = "messages"
)]
pub async fn get_messages(
    State(state): State<MessagesState>,
    _principal: Principal,
    Json(req): Json<GetMessagesRequest>,
) -> Result<Json<MessagesResponse>, (StatusCode, Json<MessageResponse>)> {
    let rows = state.db.list_user_messages(req.user_id).await.map_err(|e| {
        tracing::error!("Failed to list messages: {}", e);
        MessageResponse::new("Failed to fetch messages")
            .into_response(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Ok(Json(MessagesResponse {
        messages: rows.into_iter().map(Into::into).collect(),
    }))
}

/// POST /getname - Resolve a project to its owner's contact details
///
/// The lookup expects exactly one project and one owner; a missing row on
/// either step is a store error, not a 404.
#[utoipa::path(
    post,
    path = "/getname",
    request_body = ProjectOwnerRequest,
    responses(
        (status = 200, description = "Owner details", body = ProjectOwnerResponse),
        (status = 500, description = "Store error or missing row", body = MessageResponse)
    ),
    tag = "messages"
)]
pub async fn get_name(
    State(state): State<MessagesState>,
    Json(req): Json<ProjectOwnerRequest>,
) -> Result<Json<ProjectOwnerResponse>, (StatusCode, Json<MessageResponse>)> {
    let project = state
        .db
        .get_project(req.project_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get project for owner lookup: {}", e);
            MessageResponse::new("Failed to fetch project owner")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?
        .ok_or_else(|| {
            tracing::error!("Owner lookup for missing project {}", req.project_id);
            MessageResponse::new("Failed to fetch project owner")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

    let user = state
        .db
        .get_user(project.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user for owner lookup: {}", e);
            MessageResponse::new("Failed to fetch project owner")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?
        .ok_or_else(|| {
            tracing::error!("Project {} owned by missing user {}", project.id, project.user_id);
            MessageResponse::new("Failed to fetch project owner")
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

    Ok(Json(ProjectOwnerResponse {
        project_user_details: ProjectUserDetails {
            name: user.name,
            email: user.email,
            id: user.id,
        },
    }))
}
