// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(std::sync::Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(std::sync::Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Get the PostgreSQL pool if using PostgreSQL backend
    /// Returns None for in-memory backend
    pub fn pool(&self) -> Option<&PgPool> {
        match self {
            Self::Postgres(db) => Some(db.pool()),
            Self::InMemory(_) => None,
        }
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_email(email).await,
            Self::InMemory(db) => db.get_user_by_email(email).await,
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user(id).await,
            Self::InMemory(db) => db.get_user(id).await,
        }
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.update_user(id, input).await,
            Self::InMemory(db) => db.update_user(id, input).await,
        }
    }

    // ============================================
    // Projects
    // ============================================

    pub async fn create_project(&self, input: CreateProjectRow) -> Result<ProjectRow> {
        match self {
            Self::Postgres(db) => db.create_project(input).await,
            Self::InMemory(db) => db.create_project(input).await,
        }
    }

    pub async fn get_project(&self, id: Uuid) -> Result<Option<ProjectRow>> {
        match self {
            Self::Postgres(db) => db.get_project(id).await,
            Self::InMemory(db) => db.get_project(id).await,
        }
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectRow>> {
        match self {
            Self::Postgres(db) => db.list_projects().await,
            Self::InMemory(db) => db.list_projects().await,
        }
    }

    pub async fn list_user_projects(&self, user_id: Uuid) -> Result<Vec<ProjectRow>> {
        match self {
            Self::Postgres(db) => db.list_user_projects(user_id).await,
            Self::InMemory(db) => db.list_user_projects(user_id).await,
        }
    }

    pub async fn update_project(
        &self,
        id: Uuid,
        input: UpdateProject,
    ) -> Result<Option<ProjectRow>> {
        match self {
            Self::Postgres(db) => db.update_project(id, input).await,
            Self::InMemory(db) => db.update_project(id, input).await,
        }
    }

    pub async fn delete_project(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_project(id).await,
            Self::InMemory(db) => db.delete_project(id).await,
        }
    }

    // ============================================
    // Messages
    // ============================================

    pub async fn create_message(&self, input: CreateMessageRow) -> Result<MessageRow> {
        match self {
            Self::Postgres(db) => db.create_message(input).await,
            Self::InMemory(db) => db.create_message(input).await,
        }
    }

    pub async fn list_user_messages(&self, user_id: Uuid) -> Result<Vec<MessageRow>> {
        match self {
            Self::Postgres(db) => db.list_user_messages(user_id).await,
            Self::InMemory(db) => db.list_user_messages(user_id).await,
        }
    }
}
