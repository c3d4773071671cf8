// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Keep documents in insertion order, matching the natural order of the Postgres tables
//
// This implementation mirrors the PostgreSQL repository API so the server can
// run without a database for development and tests.

use anyhow::{bail, Result};
use parking_lot::RwLock;
use serde_json::{Number, Value};
use tutor_booking_core::{CategoryCount, Collection, Document, StoredDocument, UpdateResult};
use uuid::Uuid;

use super::models::FieldFilter;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    tutors: RwLock<Vec<StoredDocument>>,
    booked_tutors: RwLock<Vec<StoredDocument>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, collection: Collection) -> &RwLock<Vec<StoredDocument>> {
        match collection {
            Collection::Tutors => &self.tutors,
            Collection::BookedTutors => &self.booked_tutors,
        }
    }

    pub async fn insert_one(&self, collection: Collection, body: Document) -> Result<Uuid> {
        let id = Uuid::now_v7();
        self.collection(collection)
            .write()
            .push(StoredDocument::new(id, body));
        Ok(id)
    }

    pub async fn find(
        &self,
        collection: Collection,
        filter: Option<FieldFilter<'_>>,
    ) -> Result<Vec<StoredDocument>> {
        let docs = self.collection(collection).read();
        Ok(match filter {
            Some(filter) => docs
                .iter()
                .filter(|doc| doc.field_equals(filter.field, filter.value))
                .cloned()
                .collect(),
            None => docs.clone(),
        })
    }

    pub async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>> {
        Ok(self
            .collection(collection)
            .read()
            .iter()
            .find(|doc| doc.id == id)
            .cloned())
    }

    pub async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<u64> {
        let mut docs = self.collection(collection).write();
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok((before - docs.len()) as u64)
    }

    pub async fn set_fields(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Document,
    ) -> Result<UpdateResult> {
        let mut docs = self.collection(collection).write();
        let Some(doc) = docs.iter_mut().find(|doc| doc.id == id) else {
            return Ok(UpdateResult::new(0, 0));
        };

        let mut modified = false;
        for (key, value) in fields {
            if doc.body.get(&key) != Some(&value) {
                doc.body.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult::new(1, u64::from(modified)))
    }

    pub async fn increment_field(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        by: i64,
    ) -> Result<UpdateResult> {
        let mut docs = self.collection(collection).write();
        let Some(doc) = docs.iter_mut().find(|doc| doc.id == id) else {
            return Ok(UpdateResult::new(0, 0));
        };

        let next = increment(doc.body.get(field), by)?;
        doc.body.insert(field.to_string(), next);
        Ok(UpdateResult::new(1, 1))
    }

    pub async fn distinct(&self, collection: Collection, field: &str) -> Result<Vec<Value>> {
        let docs = self.collection(collection).read();
        let mut values: Vec<Value> = Vec::new();
        for value in docs.iter().filter_map(|doc| doc.get(field)) {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        Ok(values)
    }

    pub async fn count_by(&self, collection: Collection, field: &str) -> Result<Vec<CategoryCount>> {
        let docs = self.collection(collection).read();
        let mut groups: Vec<CategoryCount> = Vec::new();
        for doc in docs.iter() {
            let key = doc.get(field).cloned().unwrap_or(Value::Null);
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.count += 1,
                None => groups.push(CategoryCount { key, count: 1 }),
            }
        }
        // Stable sort keeps first-seen order among equal counts
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(groups)
    }
}

fn increment(current: Option<&Value>, by: i64) -> Result<Value> {
    match current {
        None | Some(Value::Null) => Ok(Value::from(by)),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i.saturating_add(by)))
            } else if let Some(f) = n.as_f64() {
                match Number::from_f64(f + by as f64) {
                    Some(n) => Ok(Value::Number(n)),
                    None => bail!("Increment produced a non-finite number"),
                }
            } else {
                bail!("Cannot increment number {}", n)
            }
        }
        Some(other) => bail!("Cannot increment non-numeric value {}", other),
    }
}
