// Tutor service
// Decision: The tutor language doubles as its category for filtering and aggregation

use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tutor_booking_core::{
    CategoryCount, Collection, DeleteResult, Document, InsertOneResult, StoredDocument,
    TutorFields, UpdateResult, EMAIL_FIELD, LANGUAGE_FIELD, REVIEW_FIELD,
};
use uuid::Uuid;

use crate::storage::{FieldFilter, StorageBackend};

const COLLECTION: Collection = Collection::Tutors;

pub struct TutorService {
    db: Arc<StorageBackend>,
}

impl TutorService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// All tutors, optionally restricted to one language
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<StoredDocument>> {
        let filter = category.map(|c| FieldFilter::new(LANGUAGE_FIELD, c));
        self.db
            .find(COLLECTION, filter)
            .await
            .context("Failed to list tutors")
    }

    pub async fn create(&self, body: Document) -> Result<InsertOneResult> {
        let id = self
            .db
            .insert_one(COLLECTION, body)
            .await
            .context("Failed to create tutor")?;
        tracing::info!(tutor_id = %id, "Tutor created");
        Ok(InsertOneResult::new(id))
    }

    /// Tutors added by the given user
    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<StoredDocument>> {
        self.db
            .find(COLLECTION, Some(FieldFilter::new(EMAIL_FIELD, email)))
            .await
            .context("Failed to list tutors by owner")
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<StoredDocument>> {
        self.db
            .find_by_id(COLLECTION, id)
            .await
            .context("Failed to get tutor")
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult> {
        let deleted = self
            .db
            .delete_by_id(COLLECTION, id)
            .await
            .context("Failed to delete tutor")?;
        if deleted > 0 {
            tracing::info!(tutor_id = %id, "Tutor deleted");
        }
        Ok(DeleteResult::new(deleted))
    }

    pub async fn update(&self, id: Uuid, fields: TutorFields) -> Result<UpdateResult> {
        self.db
            .set_fields(COLLECTION, id, fields.into_document())
            .await
            .context("Failed to update tutor")
    }

    /// Bump the review counter by one
    pub async fn increment_review(&self, id: Uuid) -> Result<UpdateResult> {
        self.db
            .increment_field(COLLECTION, id, REVIEW_FIELD, 1)
            .await
            .context("Failed to update tutor review count")
    }

    /// Distinct tutor languages
    pub async fn categories(&self) -> Result<Vec<Value>> {
        self.db
            .distinct(COLLECTION, LANGUAGE_FIELD)
            .await
            .context("Failed to fetch categories")
    }

    /// Number of tutors per language, most popular first
    pub async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        self.db
            .count_by(COLLECTION, LANGUAGE_FIELD)
            .await
            .context("Failed to count tutors by category")
    }
}
