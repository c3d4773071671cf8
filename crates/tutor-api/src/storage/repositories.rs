// PostgreSQL document repository
// Decision: One table per collection, document body in a JSONB column
// Decision: Table names come from the Collection enum only, never from request input

use anyhow::{bail, Context, Result};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tutor_booking_core::{CategoryCount, Collection, Document, StoredDocument, UpdateResult};
use uuid::Uuid;

use super::models::{CountRow, DocumentRow, FieldFilter, UpdateCountsRow};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection pool from URL
    pub async fn from_url(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")
    }

    pub async fn insert_one(&self, collection: Collection, body: Document) -> Result<Uuid> {
        let id = Uuid::now_v7();
        let doc = StoredDocument::new(id, body);

        sqlx::query(&format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2)",
            collection.as_str()
        ))
        .bind(id)
        .bind(Json(&doc.body))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn find(
        &self,
        collection: Collection,
        filter: Option<FieldFilter<'_>>,
    ) -> Result<Vec<StoredDocument>> {
        let rows = match filter {
            Some(filter) => {
                sqlx::query_as::<_, DocumentRow>(&format!(
                    r#"
                    SELECT id, doc, created_at
                    FROM {}
                    WHERE doc @> jsonb_build_object($1::text, $2::text)
                    ORDER BY created_at, id
                    "#,
                    collection.as_str()
                ))
                .bind(filter.field)
                .bind(filter.value)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DocumentRow>(&format!(
                    "SELECT id, doc, created_at FROM {} ORDER BY created_at, id",
                    collection.as_str()
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(DocumentRow::into_document).collect()
    }

    pub async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT id, doc, created_at FROM {} WHERE id = $1",
            collection.as_str()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::into_document).transpose()
    }

    pub async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<u64> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1",
            collection.as_str()
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Overwrite the given top-level fields, keeping every other field
    pub async fn set_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Document,
    ) -> Result<UpdateResult> {
        let table = collection.as_str();
        let row = sqlx::query_as::<_, UpdateCountsRow>(&format!(
            r#"
            WITH target AS (
                SELECT id, doc FROM {table} WHERE id = $1 FOR UPDATE
            ), updated AS (
                UPDATE {table} t
                SET doc = t.doc || $2::jsonb
                FROM target
                WHERE t.id = target.id AND target.doc <> target.doc || $2::jsonb
                RETURNING t.id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#
        ))
        .bind(id)
        .bind(Json(&fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult::new(
            row.matched.max(0) as u64,
            row.modified.max(0) as u64,
        ))
    }

    /// Add `by` to a numeric field, treating a missing or null field as zero
    ///
    /// Any other JSON type is an error, leaving the document untouched.
    pub async fn increment_field(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        by: i64,
    ) -> Result<UpdateResult> {
        let table = collection.as_str();
        let mut tx = self.pool.begin().await?;

        let current_type = sqlx::query_scalar::<_, Option<String>>(&format!(
            "SELECT jsonb_typeof(doc -> $2::text) FROM {table} WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .bind(field)
        .fetch_optional(&mut *tx)
        .await?;

        match current_type {
            None => return Ok(UpdateResult::new(0, 0)),
            Some(None) => {}
            Some(Some(kind)) if kind == "number" || kind == "null" => {}
            Some(Some(kind)) => bail!("Cannot increment non-numeric value of type {}", kind),
        }

        let result = sqlx::query(&format!(
            r#"
            UPDATE {table}
            SET doc = jsonb_set(
                doc,
                ARRAY[$2::text],
                to_jsonb(COALESCE((doc ->> $2::text)::numeric, 0) + $3::bigint)
            )
            WHERE id = $1
            "#
        ))
        .bind(id)
        .bind(field)
        .bind(by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let affected = result.rows_affected();
        Ok(UpdateResult::new(affected, affected))
    }

    /// Distinct values of a top-level field, skipping documents without it
    pub async fn distinct(&self, collection: Collection, field: &str) -> Result<Vec<Value>> {
        let values = sqlx::query_scalar::<_, Value>(&format!(
            r#"
            SELECT DISTINCT doc -> $1::text AS value
            FROM {}
            WHERE jsonb_exists(doc, $1::text)
            ORDER BY value
            "#,
            collection.as_str()
        ))
        .bind(field)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    /// Group documents by a top-level field and count each group, largest first
    pub async fn count_by(&self, collection: Collection, field: &str) -> Result<Vec<CategoryCount>> {
        let rows = sqlx::query_as::<_, CountRow>(&format!(
            r#"
            SELECT doc -> $1::text AS key, COUNT(*) AS count
            FROM {}
            GROUP BY 1
            ORDER BY 2 DESC, 1
            "#,
            collection.as_str()
        ))
        .bind(field)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryCount::from).collect())
    }
}
