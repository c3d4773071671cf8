// Access guard: credential extraction and per-route authorization
// Decision: The guard is an extractor; routes that never name AuthUser stay public
// Decision: Owner checks happen inside handlers, after the guard has produced an identity

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tutor_booking_core::IdentityClaim;

use super::{
    config::AuthConfig,
    jwt::{JwtService, TokenVerdict},
};

/// Authentication error
#[derive(Debug, Clone, Serialize, Error)]
#[error("{error}")]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::FORBIDDEN,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Verified caller identity extracted from the session cookie
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: IdentityClaim,
}

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.identity.email
    }

    /// Allow the request only when the caller owns resources keyed by `owner`
    pub fn authorize_owner(&self, owner: &str) -> Result<(), AuthError> {
        if self.identity.owns(owner) {
            Ok(())
        } else {
            tracing::debug!(
                caller = %self.identity.email,
                owner = %owner,
                "Owner-scoped access denied"
            );
            Err(AuthError::forbidden("Forbidden"))
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub jwt_service: Arc<JwtService>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            jwt_service,
        }
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        extract_auth_user(parts, &auth_state)
    }
}

/// Extract authenticated user from the session cookie
fn extract_auth_user(parts: &Parts, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar
        .get(&auth_state.config.cookie.name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::unauthorized("Unauthorized"))?;

    match auth_state.jwt_service.verify(token) {
        TokenVerdict::Valid(identity) => Ok(AuthUser { identity }),
        TokenVerdict::Expired => Err(AuthError::unauthorized("Session expired")),
        TokenVerdict::Invalid => Err(AuthError::unauthorized("Unauthorized")),
    }
}
