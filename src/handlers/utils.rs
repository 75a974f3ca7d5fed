use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validation::{self, Input};

/// Turn a raw JSON body into a validated input, or a 400.
pub fn parse_body<T: Input>(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<T> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Rejected {} body: {}", T::SHAPE.name(), rejection);
        ApiError::invalid_json(T::SHAPE.rejection_message())
    })?;

    validation::validate::<T>(&body).map_err(|issues| {
        tracing::debug!("{} validation failed with {} issue(s)", T::SHAPE.name(), issues.len());
        ApiError::validation(T::SHAPE.rejection_message(), issues)
    })
}

/// Run CPU-heavy work (password hashing) on the blocking pool so it does not
/// stall the async workers. A panicking task becomes a 500 with `message`.
pub async fn run_blocking<T, F>(message: &'static str, work: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        ApiError::internal(message)
    })
}

/// Issue a token for `subject` with the configured secret and lifetime.
pub fn issue_token(state: &AppState, subject: Uuid) -> ApiResult<String> {
    auth::issue(subject, state.jwt_secret(), state.token_ttl()).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal("Failed to issue token")
    })
}
