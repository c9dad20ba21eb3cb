// Database models (internal rows, distinct from the public DTOs)
//
// Column names follow the hosted database schema, which uses camelCase
// foreign keys ("userId", "senderId", ...) and stores the password hash in
// a column named "password".

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

// ============================================
// Projects
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProjectRow {
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
}

// ============================================
// Messages
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub message: String,
    #[sqlx(rename = "senderId")]
    pub sender_id: Uuid,
    #[sqlx(rename = "receiverId")]
    pub receiver_id: Uuid,
    #[sqlx(rename = "senderEmail")]
    pub sender_email: String,
    #[sqlx(rename = "projectId")]
    pub project_id: Uuid,
    #[sqlx(rename = "senderName")]
    pub sender_name: String,
}

#[derive(Debug, Clone)]
pub struct CreateMessageRow {
    pub message: String,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub sender_email: String,
    pub project_id: Uuid,
    pub sender_name: String,
}
