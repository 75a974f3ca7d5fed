use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, TokenError};
use crate::error::{ApiError, AuthRejection};
use crate::state::AppState;

/// Authenticated caller, injected into request extensions by
/// [`jwt_auth_middleware`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

/// JWT authentication middleware that verifies the bearer token and injects
/// the caller's identity. Rejected requests never reach the handler.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers());

    let subject = auth::verify(token, state.jwt_secret()).map_err(|err| {
        let reason = match err {
            TokenError::MissingSubject => AuthRejection::NotLoggedIn,
            _ => AuthRejection::InvalidToken,
        };
        tracing::debug!(reason = ?reason, "Rejected request to {}: {}", request.uri().path(), err);
        ApiError::Unauthorized(reason)
    })?;

    request.extensions_mut().insert(AuthUser { id: subject });

    Ok(next.run(request).await)
}

/// Token candidate from the Authorization header: the value after a
/// `Bearer ` prefix, or the raw value when there is no prefix. A missing or
/// unreadable header yields an empty candidate, which never verifies.
pub fn extract_token(headers: &HeaderMap) -> &str {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    value.strip_prefix("Bearer ").unwrap_or(value)
}
