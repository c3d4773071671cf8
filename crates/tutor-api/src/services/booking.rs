// Booking service

use anyhow::{Context, Result};
use std::sync::Arc;
use tutor_booking_core::{Collection, Document, InsertOneResult, StoredDocument, EMAIL_FIELD};

use crate::storage::{FieldFilter, StorageBackend};

const COLLECTION: Collection = Collection::BookedTutors;

pub struct BookingService {
    db: Arc<StorageBackend>,
}

impl BookingService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(&self, body: Document) -> Result<InsertOneResult> {
        let id = self
            .db
            .insert_one(COLLECTION, body)
            .await
            .context("Failed to book tutor")?;
        tracing::info!(booking_id = %id, "Tutor booked");
        Ok(InsertOneResult::new(id))
    }

    /// Bookings made by the given user
    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<StoredDocument>> {
        self.db
            .find(COLLECTION, Some(FieldFilter::new(EMAIL_FIELD, email)))
            .await
            .context("Failed to list booked tutors")
    }
}
