use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult, ApiRoute, CredentialFailure};
use crate::handlers::utils::{issue_token, parse_body, run_blocking};
use crate::state::AppState;
use crate::validation::{SigninInput, SignupInput};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub jwt: String,
}

/// POST /api/v1/user/signup - create an account and receive a token
///
/// ```json
/// { "email": "ada@example.com", "password": "..." }
/// ```
///
/// Responds `{ "jwt": "..." }`. A taken email surfaces as a store failure.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let input: SignupInput = parse_body(payload)?;

    let failure = ApiRoute::Signup.store_failure_message();
    let password = input.password.clone();
    let password_hash = run_blocking(failure, move || hash_password(&password))
        .await?
        .map_err(|e| {
            tracing::error!("Password hashing failed during signup: {}", e);
            ApiError::internal(failure)
        })?;

    let user = state
        .store
        .create_user(&input.email, &password_hash)
        .await
        .map_err(|e| ApiError::store(ApiRoute::Signup, e))?;

    let jwt = issue_token(&state, user.id)?;
    tracing::info!(user_id = %user.id, "User signed up");

    Ok(Json(TokenResponse { jwt }))
}

/// POST /api/v1/user/signin - exchange credentials for a token
///
/// Unknown email and wrong password are answered identically.
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let input: SigninInput = parse_body(payload)?;

    let user = state
        .store
        .find_user_by_email(&input.email)
        .await
        .map_err(|e| ApiError::store(ApiRoute::Signin, e))?
        .ok_or_else(|| {
            tracing::info!("Signin rejected: unknown email");
            ApiError::Credentials(CredentialFailure::UnknownEmail)
        })?;

    let failure = ApiRoute::Signin.store_failure_message();
    let password = input.password;
    let stored_hash = user.password_hash.clone();
    let matches = run_blocking(failure, move || verify_password(&password, &stored_hash))
        .await?
        .map_err(|e| {
            tracing::error!(user_id = %user.id, "Password verification failed: {}", e);
            ApiError::internal(failure)
        })?;

    if !matches {
        tracing::info!(user_id = %user.id, "Signin rejected: password mismatch");
        return Err(ApiError::Credentials(CredentialFailure::PasswordMismatch));
    }

    let jwt = issue_token(&state, user.id)?;
    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(TokenResponse { jwt }))
}
