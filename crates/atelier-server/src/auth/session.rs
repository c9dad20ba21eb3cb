// Session store
// Decision: Pluggable store behind a trait; memory for single-instance
// deployments, Redis when sessions must survive restarts or be shared
// across instances
//
// A session maps an opaque id to a principal id for a fixed 24 hours from
// creation. Reads never extend the lifetime (no sliding expiration, so a
// read costs no store write).

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rand::Rng;
use redis::AsyncCommands;
use uuid::Uuid;

/// How long a session lives, counted from creation.
pub const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Namespace for the shared-store variant, so session keys cannot collide
/// with unrelated data living in the same Redis.
const REDIS_KEY_PREFIX: &str = "atelier:sess:";

/// Generate an opaque session id (32 hex characters).
fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

/// Server-side session storage: session id -> principal id with TTL.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for a principal and return its opaque id.
    async fn create(&self, principal_id: Uuid) -> Result<String>;

    /// Resolve a session id to its principal id, if the session exists and
    /// has not expired.
    async fn read(&self, session_id: &str) -> Result<Option<Uuid>>;

    /// Destroy a session. Destroying an unknown id is not an error.
    async fn destroy(&self, session_id: &str) -> Result<()>;
}

// ============================================
// In-memory variant
// ============================================

struct SessionEntry {
    principal_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// Process-local session store. Sessions are lost on restart and invisible
/// to other instances; suitable only for single-instance deployment.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, principal_id: Uuid) -> Result<String> {
        let session_id = generate_session_id();
        let entry = SessionEntry {
            principal_id,
            expires_at: Utc::now() + Duration::seconds(SESSION_TTL_SECS as i64),
        };
        self.sessions.write().insert(session_id.clone(), entry);
        Ok(session_id)
    }

    async fn read(&self, session_id: &str) -> Result<Option<Uuid>> {
        // Expired entries are evicted lazily on read.
        let mut sessions = self.sessions.write();
        match sessions.get(session_id) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(Some(entry.principal_id)),
            Some(_) => {
                sessions.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn destroy(&self, session_id: &str) -> Result<()> {
        self.sessions.write().remove(session_id);
        Ok(())
    }
}

// ============================================
// Shared key-value variant (Redis)
// ============================================

/// Redis-backed session store. Sessions survive process restarts and are
/// visible across horizontally scaled instances; Redis owns the TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis. Supports both redis:// and rediss:// (TLS) URLs.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = redis::aio::ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn key(session_id: &str) -> String {
        format!("{}{}", REDIS_KEY_PREFIX, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, principal_id: Uuid) -> Result<String> {
        let session_id = generate_session_id();
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(
                Self::key(&session_id),
                principal_id.to_string(),
                SESSION_TTL_SECS,
            )
            .await?;
        Ok(session_id)
    }

    async fn read(&self, session_id: &str) -> Result<Option<Uuid>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(Self::key(session_id)).await?;
        Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
    }

    async fn destroy(&self, session_id: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::key(session_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_create_read_destroy() {
        let store = MemorySessionStore::new();
        let principal_id = Uuid::now_v7();

        let session_id = store.create(principal_id).await.unwrap();
        assert_eq!(session_id.len(), 32);
        assert_eq!(store.read(&session_id).await.unwrap(), Some(principal_id));

        store.destroy(&session_id).await.unwrap();
        assert_eq!(store.read(&session_id).await.unwrap(), None);

        // Destroying an unknown id is a no-op
        store.destroy("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_session_ids_are_unique() {
        let store = MemorySessionStore::new();
        let principal_id = Uuid::now_v7();

        let a = store.create(principal_id).await.unwrap();
        let b = store.create(principal_id).await.unwrap();
        assert_ne!(a, b);

        // Both resolve independently
        assert_eq!(store.read(&a).await.unwrap(), Some(principal_id));
        assert_eq!(store.read(&b).await.unwrap(), Some(principal_id));
    }

    #[tokio::test]
    async fn test_memory_expired_session_not_resolvable() {
        let store = MemorySessionStore::new();
        let principal_id = Uuid::now_v7();
        let session_id = store.create(principal_id).await.unwrap();

        // Fresh session resolves
        assert_eq!(store.read(&session_id).await.unwrap(), Some(principal_id));

        // Force the entry past its expiry
        store
            .sessions
            .write()
            .get_mut(&session_id)
            .unwrap()
            .expires_at = Utc::now() - Duration::minutes(1);

        assert_eq!(store.read(&session_id).await.unwrap(), None);
        // The expired entry was evicted, not just hidden
        assert!(!store.sessions.read().contains_key(&session_id));
    }

    #[tokio::test]
    async fn test_memory_unknown_session() {
        let store = MemorySessionStore::new();
        assert_eq!(store.read("does-not-exist").await.unwrap(), None);
    }

    // Note: Redis tests require a running instance
    // Run with: docker run -d -p 6379:6379 redis:7

    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_redis_create_read_destroy() {
        let store = RedisSessionStore::connect("redis://localhost:6379")
            .await
            .unwrap();
        let principal_id = Uuid::now_v7();

        let session_id = store.create(principal_id).await.unwrap();
        assert_eq!(store.read(&session_id).await.unwrap(), Some(principal_id));

        store.destroy(&session_id).await.unwrap();
        assert_eq!(store.read(&session_id).await.unwrap(), None);
    }
}
