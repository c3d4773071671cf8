// OpenAPI specification generation
//
// Used by the server (Swagger UI) and by the export-openapi binary.

use crate::api;
use crate::api::common::{ErrorResponse, SuccessResponse};
use crate::auth;
use tutor_booking_core::{
    CategoryCount, DeleteResult, IdentityClaim, InsertOneResult, StoredDocument, TutorFields,
    UpdateResult,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Tutor Booking API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::issue_token,
        auth::routes::logout,
        api::tutors::list_tutors,
        api::tutors::add_tutor,
        api::tutors::list_my_tutors,
        api::tutors::get_tutor,
        api::tutors::delete_tutor,
        api::tutors::update_tutor,
        api::tutors::increment_review,
        api::tutors::list_categories,
        api::tutors::category_counts,
        api::bookings::book_tutor,
        api::bookings::list_my_bookings,
    ),
    components(
        schemas(
            IdentityClaim, StoredDocument, TutorFields,
            InsertOneResult, UpdateResult, DeleteResult, CategoryCount,
            ErrorResponse, SuccessResponse,
        )
    ),
    tags(
        (name = "auth", description = "Session credential endpoints"),
        (name = "tutors", description = "Tutor catalog endpoints"),
        (name = "bookings", description = "Tutor booking endpoints")
    ),
    info(
        title = "Tutor Booking API",
        version = "0.1.0",
        description = "Backend for browsing, managing and booking tutors",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
