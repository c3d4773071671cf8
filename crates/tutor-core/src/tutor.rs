// Tutor document fields
//
// Tutors are stored as schemaless documents; these are the fields the API
// filters, groups, or overwrites by name.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::document::Document;

/// Owner of a tutor or booking document
pub const EMAIL_FIELD: &str = "email";
/// Teaching language, doubles as the tutor category
pub const LANGUAGE_FIELD: &str = "language";
/// Review counter bumped by `PATCH /tutor/{id}`
pub const REVIEW_FIELD: &str = "review";

/// The editable fields of a tutor, replaced together on update
///
/// Fields left out of the request are written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TutorFields {
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "Ada Lovelace"))]
    pub name: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "ada@example.com"))]
    pub email: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "English"))]
    pub language: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>, example = 25))]
    pub price: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub image: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>, example = 0))]
    pub review: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub description: Option<Value>,
}

impl TutorFields {
    /// The `$set` document written by an update
    pub fn into_document(self) -> Document {
        let fields = [
            ("name", self.name),
            (EMAIL_FIELD, self.email),
            (LANGUAGE_FIELD, self.language),
            ("price", self.price),
            ("image", self.image),
            (REVIEW_FIELD, self.review),
            ("description", self.description),
        ];

        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.unwrap_or(Value::Null)))
            .collect()
    }
}
