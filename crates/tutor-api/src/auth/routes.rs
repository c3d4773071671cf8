// Session HTTP routes
// Decision: Trust-on-submit; whatever identity the client posts is signed as long as it names an email
// Decision: The credential only ever travels in the cookie, never in a response body

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use tutor_booking_core::IdentityClaim;

use super::{
    cookie::{removal_cookie, session_cookie},
    middleware::{AuthError, AuthState},
};
use crate::api::common::SuccessResponse;

/// Create session routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
        .with_state(state)
}

/// POST /jwt - Issue a session credential
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = IdentityClaim,
    responses(
        (status = 200, description = "Credential issued in the `token` cookie", body = SuccessResponse),
        (status = 400, description = "Identity claim is missing an email"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn issue_token(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(body): Json<Value>,
) -> Result<(CookieJar, Json<SuccessResponse>), AuthError> {
    let identity =
        IdentityClaim::from_value(body).map_err(|e| AuthError::bad_request(&e.to_string()))?;

    let token = state.jwt_service.issue(&identity).map_err(|e| {
        tracing::error!("Credential issuance failed: {}", e);
        AuthError::internal("Failed to issue credential")
    })?;

    tracing::info!(email = %identity.email, "Session credential issued");

    let cookie = session_cookie(
        &state.config.cookie,
        token,
        state.jwt_service.token_lifetime_secs(),
    );
    Ok((jar.add(cookie), Json(SuccessResponse::ok())))
}

/// POST /logout - Clear the session credential
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    (
        jar.add(removal_cookie(&state.config.cookie)),
        Json(SuccessResponse::ok()),
    )
}
