// Identity claim embedded in session credentials
//
// The claim is whatever the client presented at login. Only `email` is
// required because owner-scoped routes compare against it; every other
// attribute is carried through verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Claim names owned by the credential itself; a client may not supply them
pub const RESERVED_CLAIMS: &[&str] = &["iat", "exp", "nbf"];

/// Errors raised while building an identity claim from client input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Identity claim must be a JSON object")]
    NotAnObject,

    #[error("Identity claim requires a non-empty email")]
    MissingEmail,

    #[error("Identity claim may not set reserved attribute '{0}'")]
    ReservedAttribute(String),
}

/// Attributes describing who the caller is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Unique identifier of the caller
    pub email: String,
    /// Any further attributes supplied at login
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(feature = "openapi")]
impl utoipa::PartialSchema for IdentityClaim {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, Schema, Type};
        use utoipa::openapi::RefOr;

        let email = ObjectBuilder::new()
            .schema_type(Type::String)
            .description(Some("Unique identifier of the caller"))
            .build();

        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(Type::Object)
                .property("email", RefOr::T(Schema::Object(email)))
                .required("email")
                .additional_properties(Some(AdditionalProperties::FreeForm(true)))
                .build(),
        ))
    }
}

#[cfg(feature = "openapi")]
impl ToSchema for IdentityClaim {}

impl IdentityClaim {
    /// Claim carrying only an email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            attributes: Map::new(),
        }
    }

    /// Add an extra attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Build a claim from a login request body
    pub fn from_value(value: Value) -> Result<Self, ClaimError> {
        let Value::Object(mut attributes) = value else {
            return Err(ClaimError::NotAnObject);
        };

        if let Some(reserved) = RESERVED_CLAIMS
            .iter()
            .find(|name| attributes.contains_key(**name))
        {
            return Err(ClaimError::ReservedAttribute(reserved.to_string()));
        }

        let email = match attributes.remove("email") {
            Some(Value::String(email)) if !email.trim().is_empty() => email,
            _ => return Err(ClaimError::MissingEmail),
        };

        Ok(Self { email, attributes })
    }

    /// True when this identity owns resources keyed by `owner`
    pub fn owns(&self, owner: &str) -> bool {
        self.email == owner
    }
}
