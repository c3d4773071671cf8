// Document domain types
//
// Collections hold schemaless JSON objects. The store assigns each document
// an identifier that is exposed to clients as `_id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Field name under which the store-assigned identifier is exposed
pub const ID_FIELD: &str = "_id";

/// A schemaless document body
pub type Document = Map<String, Value>;

/// Named document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Tutor profiles
    Tutors,
    /// Bookings made by users
    BookedTutors,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Tutors => "tutors",
            Collection::BookedTutors => "booked_tutors",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document together with its store-assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub body: Document,
}

impl StoredDocument {
    /// Wrap a body, dropping any client-supplied `_id` so the store's id wins
    pub fn new(id: Uuid, mut body: Document) -> Self {
        body.remove(ID_FIELD);
        Self { id, body }
    }

    /// Look up a top-level field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    /// True when the top-level `field` equals `value` as a string
    pub fn field_equals(&self, field: &str, value: &str) -> bool {
        matches!(self.body.get(field), Some(Value::String(s)) if s == value)
    }
}

#[cfg(feature = "openapi")]
impl utoipa::PartialSchema for StoredDocument {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        use utoipa::openapi::schema::{
            AdditionalProperties, KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type,
        };
        use utoipa::openapi::RefOr;

        let id = ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid)))
            .description(Some("Store-assigned document identifier"))
            .build();

        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(Type::Object)
                .property(ID_FIELD, RefOr::T(Schema::Object(id)))
                .required(ID_FIELD)
                .additional_properties(Some(AdditionalProperties::FreeForm(true)))
                .build(),
        ))
    }
}

#[cfg(feature = "openapi")]
impl ToSchema for StoredDocument {}

/// Acknowledgement returned after inserting a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertOneResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Acknowledgement returned after updating a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    /// Number of documents matching the filter
    pub matched_count: u64,
    /// Number of matched documents whose contents actually changed
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
        }
    }
}

/// Acknowledgement returned after deleting a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// One group of a group-and-count aggregation
///
/// Documents lacking the grouped field are counted under a `null` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CategoryCount {
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub key: Value,
    pub count: u64,
}
