// Booking resource routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tutor_booking_core::{Document, InsertOneResult, StoredDocument};

use super::common::{ApiError, ErrorResponse};
use crate::auth::{AuthState, AuthUser, FromRef};
use crate::services::BookingService;

/// App state for booking routes
#[derive(Clone)]
pub struct BookingsState {
    pub service: Arc<BookingService>,
    pub auth: AuthState,
}

impl FromRef<BookingsState> for AuthState {
    fn from_ref(input: &BookingsState) -> Self {
        input.auth.clone()
    }
}

/// Create booking routes
pub fn routes(state: BookingsState) -> Router {
    Router::new()
        .route("/bookedTutor", post(book_tutor))
        .route("/bookedTutors/:email", get(list_my_bookings))
        .with_state(state)
}

/// POST /bookedTutor - Book a tutor
#[utoipa::path(
    post,
    path = "/bookedTutor",
    request_body(content = Object, description = "Booking document", content_type = "application/json"),
    responses(
        (status = 201, description = "Booking created", body = InsertOneResult),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bookings"
)]
pub async fn book_tutor(
    State(state): State<BookingsState>,
    Json(body): Json<Document>,
) -> Result<(StatusCode, Json<InsertOneResult>), ApiError> {
    let result = state.service.create(body).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /bookedTutors/{email} - List the caller's bookings
#[utoipa::path(
    get,
    path = "/bookedTutors/{email}",
    params(
        ("email" = String, Path, description = "Email the bookings were made under")
    ),
    responses(
        (status = 200, description = "Bookings made by the caller", body = Vec<StoredDocument>),
        (status = 401, description = "Missing, invalid or expired credential"),
        (status = 403, description = "Credential belongs to another user"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bookings"
)]
pub async fn list_my_bookings(
    State(state): State<BookingsState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<StoredDocument>>, ApiError> {
    user.authorize_owner(&email)?;
    let bookings = state.service.list_by_owner(&email).await?;
    Ok(Json(bookings))
}
