// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// Provides the same API as the Postgres repository backed by HashMaps,
// allowing the server to run without a database for development and tests.
// All data is lost on restart.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    projects: RwLock<HashMap<Uuid, ProjectRow>>,
    messages: RwLock<HashMap<Uuid, MessageRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = UserRow {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
        };
        self.users.write().insert(row.id, row.clone());
        Ok(row)
    }

    /// Exact, case-sensitive email match.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> Result<Option<UserRow>> {
        let mut users = self.users.write();
        if let Some(user) = users.get_mut(&id) {
            if let Some(name) = input.name {
                user.name = name;
            }
            if let Some(email) = input.email {
                user.email = email;
            }
            if let Some(password_hash) = input.password_hash {
                user.password_hash = password_hash;
            }
            return Ok(Some(user.clone()));
        }
        Ok(None)
    }

    // ============================================
    // Projects
    // ============================================

    pub async fn create_project(&self, input: CreateProjectRow) -> Result<ProjectRow> {
        let row = ProjectRow {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            user_id: input.user_id,
            created_at: Self::now(),
        };
        self.projects.write().insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_project(&self, id: Uuid) -> Result<Option<ProjectRow>> {
        Ok(self.projects.read().get(&id).cloned())
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectRow>> {
        let mut rows: Vec<_> = self.projects.read().values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    pub async fn list_user_projects(&self, user_id: Uuid) -> Result<Vec<ProjectRow>> {
        let mut rows: Vec<_> = self
            .projects
            .read()
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    pub async fn update_project(
        &self,
        id: Uuid,
        input: UpdateProject,
    ) -> Result<Option<ProjectRow>> {
        let mut projects = self.projects.write();
        if let Some(project) = projects.get_mut(&id) {
            if let Some(title) = input.title {
                project.title = title;
            }
            if let Some(description) = input.description {
                project.description = description;
            }
            return Ok(Some(project.clone()));
        }
        Ok(None)
    }

    pub async fn delete_project(&self, id: Uuid) -> Result<bool> {
        Ok(self.projects.write().remove(&id).is_some())
    }

    // ============================================
    // Messages
    // ============================================

    pub async fn create_message(&self, input: CreateMessageRow) -> Result<MessageRow> {
        let row = MessageRow {
            id: Uuid::now_v7(),
            message: input.message,
            sender_id: input.sender_id,
            receiver_id: input.receiver_id,
            sender_email: input.sender_email,
            project_id: input.project_id,
            sender_name: input.sender_name,
        };
        self.messages.write().insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn list_user_messages(&self, user_id: Uuid) -> Result<Vec<MessageRow>> {
        let mut rows: Vec<_> = self
            .messages
            .read()
            .values()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect();
        // UUID v7 ids are time-ordered, so this is chronological.
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_input(name: &str, email: &str) -> CreateUserRow {
        CreateUserRow {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let db = InMemoryDatabase::new();
        db.create_user(user_input("A", "a@x.com")).await.unwrap();

        assert!(db.get_user_by_email("a@x.com").await.unwrap().is_some());
        assert!(db.get_user_by_email("A@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_projects_listed_newest_first() {
        let db = InMemoryDatabase::new();
        let owner = Uuid::now_v7();
        for title in ["first", "second", "third"] {
            db.create_project(CreateProjectRow {
                title: title.to_string(),
                description: String::new(),
                user_id: owner,
            })
            .await
            .unwrap();
            // Distinct timestamps so the ordering is deterministic
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let titles: Vec<_> = db
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_project_partial() {
        let db = InMemoryDatabase::new();
        let project = db
            .create_project(CreateProjectRow {
                title: "old title".to_string(),
                description: "old description".to_string(),
                user_id: Uuid::now_v7(),
            })
            .await
            .unwrap();

        let updated = db
            .update_project(
                project.id,
                UpdateProject {
                    title: Some("new title".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "new title");
        assert_eq!(updated.description, "old description");

        // Unknown id updates nothing
        let missing = db
            .update_project(Uuid::now_v7(), UpdateProject::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_project() {
        let db = InMemoryDatabase::new();
        let project = db
            .create_project(CreateProjectRow {
                title: "t".to_string(),
                description: "d".to_string(),
                user_id: Uuid::now_v7(),
            })
            .await
            .unwrap();

        assert!(db.delete_project(project.id).await.unwrap());
        assert!(!db.delete_project(project.id).await.unwrap());
        assert!(db.get_project(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_messages_filter_by_participant() {
        let db = InMemoryDatabase::new();
        let (a, b, c) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let project_id = Uuid::now_v7();

        for (sender, receiver, text) in [(a, b, "a->b"), (b, a, "b->a"), (b, c, "b->c")] {
            db.create_message(CreateMessageRow {
                message: text.to_string(),
                sender_id: sender,
                receiver_id: receiver,
                sender_email: "s@x.com".to_string(),
                project_id,
                sender_name: "S".to_string(),
            })
            .await
            .unwrap();
        }

        let for_a = db.list_user_messages(a).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|m| m.sender_id == a || m.receiver_id == a));

        let for_c = db.list_user_messages(c).await.unwrap();
        assert_eq!(for_c.len(), 1);
        assert_eq!(for_c[0].message, "b->c");
    }
}
