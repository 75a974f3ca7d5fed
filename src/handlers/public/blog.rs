use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::database::Post;
use crate::error::{ApiError, ApiResult, ApiRoute};
use crate::pagination::{PageMeta, PageRequest};
use crate::state::AppState;

/// Raw `?page=&limit=` values; parsed leniently by [`PageRequest`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl BulkQuery {
    /// Read the first occurrence of each key. Repeated and unknown keys are
    /// ignored, so a query string can never fail this route.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let mut query = Self::default();

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or("").as_bytes()) {
            let slot = match key.as_ref() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        query
    }
}

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub data: Vec<Post>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: Post,
}

/// GET /api/v1/blog/bulk - one page of posts plus pagination metadata
pub async fn list_posts(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<PostPage>> {
    let query = BulkQuery::from_raw(raw.as_deref());
    let request = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        &state.config.api,
    );

    let data = state
        .store
        .list_posts(request.skip(), request.limit)
        .await
        .map_err(|e| ApiError::store(ApiRoute::ListPosts, e))?;

    let total_posts = state
        .store
        .count_posts()
        .await
        .map_err(|e| ApiError::store(ApiRoute::ListPosts, e))?;

    Ok(Json(PostPage {
        data,
        meta: PageMeta::new(total_posts, &request),
    }))
}

/// GET /api/v1/blog/:id - a single post
///
/// An id that is not a well-formed identifier cannot name a post, so it is
/// reported as not found without querying the store.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::not_found("Post not found"))?;

    let post = state
        .store
        .find_post(id)
        .await
        .map_err(|e| ApiError::store(ApiRoute::GetPost, e))?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(PostResponse { post }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let query = BulkQuery::from_raw(Some("page=2&page=9&limit=5&limit=1"));
        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.limit.as_deref(), Some("5"));
    }

    #[test]
    fn missing_and_unknown_keys() {
        assert_eq!(BulkQuery::from_raw(None), BulkQuery::default());

        let query = BulkQuery::from_raw(Some("sort=title&limit=%203"));
        assert_eq!(query.page, None);
        assert_eq!(query.limit.as_deref(), Some(" 3"));
    }
}
