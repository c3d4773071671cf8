// Storage layer for the tutor booking API
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: PostgreSQL repository over JSONB document tables
// - InMemoryDatabase: lock-protected vectors with the same API
// - StorageBackend: enum dispatch handed to services as a shared pool resource

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::FieldFilter;
pub use repositories::Database;
