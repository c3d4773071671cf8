// Tutor booking domain types
//
// DB-agnostic types shared by the API crate and its storage backends:
// - Document: schemaless JSON object stored in a collection
// - Store results mirroring insert/update/delete acknowledgements
// - IdentityClaim: the attribute set embedded in a session credential

pub mod document;
pub mod identity;
pub mod tutor;

pub use document::{
    CategoryCount, Collection, DeleteResult, Document, InsertOneResult, StoredDocument,
    UpdateResult, ID_FIELD,
};
pub use identity::{ClaimError, IdentityClaim};
pub use tutor::{TutorFields, EMAIL_FIELD, LANGUAGE_FIELD, REVIEW_FIELD};
