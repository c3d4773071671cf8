// Tutor resource routes
// Decision: Only the owner-scoped listing sits behind the access guard; the rest of the catalog is public

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tutor_booking_core::{
    CategoryCount, DeleteResult, Document, InsertOneResult, StoredDocument, TutorFields,
    UpdateResult,
};
use utoipa::IntoParams;
use uuid::Uuid;

use super::common::{ApiError, ErrorResponse};
use crate::auth::{AuthState, AuthUser, FromRef};
use crate::services::TutorService;

/// App state for tutor routes
#[derive(Clone)]
pub struct TutorsState {
    pub service: Arc<TutorService>,
    pub auth: AuthState,
}

impl FromRef<TutorsState> for AuthState {
    fn from_ref(input: &TutorsState) -> Self {
        input.auth.clone()
    }
}

/// Query parameters for listing tutors
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTutorsQuery {
    /// Only return tutors teaching this language
    #[serde(default)]
    pub category: Option<String>,
}

/// Create tutor routes
pub fn routes(state: TutorsState) -> Router {
    Router::new()
        .route("/tutors", get(list_tutors))
        .route("/addTutor", post(add_tutor))
        .route("/tutors/:email", get(list_my_tutors))
        .route(
            "/tutor/:id",
            get(get_tutor).delete(delete_tutor).patch(increment_review),
        )
        .route("/updateTutor/:id", put(update_tutor))
        .route("/categories", get(list_categories))
        .route("/categoryCounts", get(category_counts))
        .with_state(state)
}

/// GET /tutors - List tutors, optionally by category
#[utoipa::path(
    get,
    path = "/tutors",
    params(ListTutorsQuery),
    responses(
        (status = 200, description = "Tutors", body = Vec<StoredDocument>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn list_tutors(
    State(state): State<TutorsState>,
    Query(query): Query<ListTutorsQuery>,
) -> Result<Json<Vec<StoredDocument>>, ApiError> {
    let tutors = state.service.list(query.category.as_deref()).await?;
    Ok(Json(tutors))
}

/// POST /addTutor - Add a tutor
#[utoipa::path(
    post,
    path = "/addTutor",
    request_body(content = Object, description = "Tutor document", content_type = "application/json"),
    responses(
        (status = 201, description = "Tutor created", body = InsertOneResult),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn add_tutor(
    State(state): State<TutorsState>,
    Json(body): Json<Document>,
) -> Result<(StatusCode, Json<InsertOneResult>), ApiError> {
    let result = state.service.create(body).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /tutors/{email} - List the tutors added by the caller
///
/// Requires a session cookie whose identity matches `email`.
#[utoipa::path(
    get,
    path = "/tutors/{email}",
    params(
        ("email" = String, Path, description = "Owner email")
    ),
    responses(
        (status = 200, description = "Tutors owned by the caller", body = Vec<StoredDocument>),
        (status = 401, description = "Missing, invalid or expired credential"),
        (status = 403, description = "Credential belongs to another user"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn list_my_tutors(
    State(state): State<TutorsState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<StoredDocument>>, ApiError> {
    user.authorize_owner(&email)?;
    let tutors = state.service.list_by_owner(&email).await?;
    Ok(Json(tutors))
}

/// GET /tutor/{id} - Get a tutor
#[utoipa::path(
    get,
    path = "/tutor/{id}",
    params(
        ("id" = Uuid, Path, description = "Tutor ID")
    ),
    responses(
        (status = 200, description = "Tutor found", body = StoredDocument),
        (status = 404, description = "Tutor not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn get_tutor(
    State(state): State<TutorsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredDocument>, ApiError> {
    let tutor = state
        .service
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("Tutor"))?;
    Ok(Json(tutor))
}

/// DELETE /tutor/{id} - Delete a tutor
#[utoipa::path(
    delete,
    path = "/tutor/{id}",
    params(
        ("id" = Uuid, Path, description = "Tutor ID")
    ),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteResult),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn delete_tutor(
    State(state): State<TutorsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResult>, ApiError> {
    Ok(Json(state.service.delete(id).await?))
}

/// PUT /updateTutor/{id} - Replace a tutor's editable fields
#[utoipa::path(
    put,
    path = "/updateTutor/{id}",
    params(
        ("id" = Uuid, Path, description = "Tutor ID")
    ),
    request_body = TutorFields,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResult),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn update_tutor(
    State(state): State<TutorsState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<TutorFields>,
) -> Result<Json<UpdateResult>, ApiError> {
    Ok(Json(state.service.update(id, fields).await?))
}

/// PATCH /tutor/{id} - Add one review to a tutor
#[utoipa::path(
    patch,
    path = "/tutor/{id}",
    params(
        ("id" = Uuid, Path, description = "Tutor ID")
    ),
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResult),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn increment_review(
    State(state): State<TutorsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateResult>, ApiError> {
    Ok(Json(state.service.increment_review(id).await?))
}

/// GET /categories - Distinct tutor languages
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Distinct categories", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn list_categories(
    State(state): State<TutorsState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(state.service.categories().await?))
}

/// GET /categoryCounts - Tutors per category, most popular first
#[utoipa::path(
    get,
    path = "/categoryCounts",
    responses(
        (status = 200, description = "Tutor count per category", body = Vec<CategoryCount>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tutors"
)]
pub async fn category_counts(
    State(state): State<TutorsState>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    Ok(Json(state.service.category_counts().await?))
}
