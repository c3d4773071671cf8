// Application router
// Decision: Assembly lives in the library so integration tests drive the same router as the server

use axum::http::{header, HeaderValue, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, BookingsState, TutorsState};
use crate::auth::{self, AuthState};
use crate::openapi::ApiDoc;
use crate::services::{BookingService, TutorService};
use crate::storage::StorageBackend;

/// Plain-text banner served at the root path
pub const BANNER: &str = "Tutor Booking Backend is running...";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

async fn banner() -> &'static str {
    BANNER
}

/// Build the full application router
pub fn build_app(
    storage: Arc<StorageBackend>,
    auth_state: AuthState,
    cors_origins: &[String],
) -> Router {
    let tutors_state = TutorsState {
        service: Arc::new(TutorService::new(storage.clone())),
        auth: auth_state.clone(),
    };
    let bookings_state = BookingsState {
        service: Arc::new(BookingService::new(storage.clone())),
        auth: auth_state.clone(),
    };
    let health_state = HealthState {
        storage: storage.kind(),
    };

    let app = Router::new()
        .route("/", get(banner))
        .route("/health", get(health).with_state(health_state))
        .merge(auth::routes(auth_state))
        .merge(api::tutors::routes(tutors_state))
        .merge(api::bookings::routes(bookings_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let app = if origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        )
    };

    app.layer(TraceLayer::new_for_http())
}
