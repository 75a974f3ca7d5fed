use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ApiRoute};
use crate::handlers::utils::parse_body;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{CreatePostInput, UpdatePostInput};

pub const UPDATED_MESSAGE: &str = "Blog updated successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedPost {
    pub id: Uuid,
}

/// POST /api/v1/blog - create a post authored by the caller
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CreatedPost>> {
    let input: CreatePostInput = parse_body(payload)?;

    let post = state
        .store
        .create_post(user.id, &input.title, &input.content)
        .await
        .map_err(|e| ApiError::store(ApiRoute::CreatePost, e))?;

    tracing::info!(post_id = %post.id, author_id = %user.id, "Post created");

    Ok(Json(CreatedPost { id: post.id }))
}

/// PUT /api/v1/blog - update a post the caller authored
///
/// The write is conditioned on both the post id and the caller being its
/// author. A post that does not exist and a post owned by someone else look
/// the same from the outside: the request succeeds and nothing changes.
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<&'static str> {
    let input: UpdatePostInput = parse_body(payload)?;
    let id = input
        .post_id()
        .ok_or_else(|| ApiError::internal("Failed to update blog"))?;

    let updated = state
        .store
        .update_post(id, user.id, &input.title, &input.content)
        .await
        .map_err(|e| ApiError::store(ApiRoute::UpdatePost, e))?;

    if updated == 0 {
        tracing::debug!(post_id = %id, caller = %user.id, "Update matched no post owned by caller");
    } else {
        tracing::info!(post_id = %id, author_id = %user.id, "Post updated");
    }

    Ok(UPDATED_MESSAGE)
}
