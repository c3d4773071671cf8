// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tutor_booking_core::{CategoryCount, Collection, Document, StoredDocument, UpdateResult};
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::FieldFilter;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend and bring its schema up to date
    pub async fn postgres(database_url: &str, max_connections: u32) -> Result<Self> {
        let db = Database::from_url(database_url, max_connections).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Short backend name for health output and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    pub async fn insert_one(&self, collection: Collection, body: Document) -> Result<Uuid> {
        match self {
            Self::Postgres(db) => db.insert_one(collection, body).await,
            Self::InMemory(db) => db.insert_one(collection, body).await,
        }
    }

    pub async fn find(
        &self,
        collection: Collection,
        filter: Option<FieldFilter<'_>>,
    ) -> Result<Vec<StoredDocument>> {
        match self {
            Self::Postgres(db) => db.find(collection, filter).await,
            Self::InMemory(db) => db.find(collection, filter).await,
        }
    }

    pub async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>> {
        match self {
            Self::Postgres(db) => db.find_by_id(collection, id).await,
            Self::InMemory(db) => db.find_by_id(collection, id).await,
        }
    }

    pub async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<u64> {
        match self {
            Self::Postgres(db) => db.delete_by_id(collection, id).await,
            Self::InMemory(db) => db.delete_by_id(collection, id).await,
        }
    }

    pub async fn set_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Document,
    ) -> Result<UpdateResult> {
        match self {
            Self::Postgres(db) => db.set_fields(collection, id, fields).await,
            Self::InMemory(db) => db.set_fields(collection, id, fields).await,
        }
    }

    pub async fn increment_field(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        by: i64,
    ) -> Result<UpdateResult> {
        match self {
            Self::Postgres(db) => db.increment_field(collection, id, field, by).await,
            Self::InMemory(db) => db.increment_field(collection, id, field, by).await,
        }
    }

    pub async fn distinct(&self, collection: Collection, field: &str) -> Result<Vec<Value>> {
        match self {
            Self::Postgres(db) => db.distinct(collection, field).await,
            Self::InMemory(db) => db.distinct(collection, field).await,
        }
    }

    pub async fn count_by(&self, collection: Collection, field: &str) -> Result<Vec<CategoryCount>> {
        match self {
            Self::Postgres(db) => db.count_by(collection, field).await,
            Self::InMemory(db) => db.count_by(collection, field).await,
        }
    }
}
