// Database models (internal, may differ from public DTOs)

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tutor_booking_core::{CategoryCount, StoredDocument};
use uuid::Uuid;

/// A row of any document collection table
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub doc: sqlx::types::JsonValue,
    pub created_at: DateTime<Utc>,
}

impl DocumentRow {
    pub fn into_document(self) -> Result<StoredDocument> {
        match self.doc {
            serde_json::Value::Object(body) => Ok(StoredDocument::new(self.id, body)),
            other => Err(anyhow!(
                "Document {} is not a JSON object (found {})",
                self.id,
                json_kind(&other)
            )),
        }
    }
}

/// One group of a count-by aggregation
#[derive(Debug, Clone, FromRow)]
pub struct CountRow {
    pub key: Option<sqlx::types::JsonValue>,
    pub count: i64,
}

impl From<CountRow> for CategoryCount {
    fn from(row: CountRow) -> Self {
        CategoryCount {
            key: row.key.unwrap_or(serde_json::Value::Null),
            count: row.count.max(0) as u64,
        }
    }
}

/// Matched/modified counters of a field update
#[derive(Debug, Clone, FromRow)]
pub struct UpdateCountsRow {
    pub matched: i64,
    pub modified: i64,
}

/// Top-level equality filter on a string field
#[derive(Debug, Clone, Copy)]
pub struct FieldFilter<'a> {
    pub field: &'a str,
    pub value: &'a str,
}

impl<'a> FieldFilter<'a> {
    pub fn new(field: &'a str, value: &'a str) -> Self {
        Self { field, value }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_row_requires_object() {
        let row = DocumentRow {
            id: Uuid::nil(),
            doc: json!([1, 2]),
            created_at: Utc::now(),
        };
        let err = row.into_document().unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_count_row_null_key() {
        let count: CategoryCount = CountRow {
            key: None,
            count: 2,
        }
        .into();
        assert_eq!(count.key, serde_json::Value::Null);
        assert_eq!(count.count, 2);
    }
}
