// Storage layer for the atelier server
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// The hosted database owns the schema; this layer only reads and writes
// whole records. Email uniqueness is enforced by the database, not here.

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
