use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Post, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate value: {0}")]
    Conflict(String),

    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // unique_violation / foreign_key_violation
            match db_err.code().as_deref() {
                Some("23505") => return StoreError::Conflict(db_err.message().to_string()),
                Some("23503") => return StoreError::MissingReference(db_err.message().to_string()),
                _ => {}
            }
        }
        StoreError::Sqlx(err)
    }
}

/// Persistence for users and posts.
///
/// Every method is a single store operation; ownership-scoped updates are
/// one conditional write, never a read followed by a write.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Insert a user; a taken email is [`StoreError::Conflict`].
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a post; an unknown author is [`StoreError::MissingReference`].
    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post, StoreError>;

    /// Update title and content of the post matching both `id` and
    /// `author_id`. Returns the number of posts changed (0 or 1).
    async fn update_post(
        &self,
        id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<u64, StoreError>;

    /// Posts ordered by creation time, skipping `skip` and returning at most
    /// `take`.
    async fn list_posts(&self, skip: i64, take: i64) -> Result<Vec<Post>, StoreError>;

    async fn count_posts(&self) -> Result<i64, StoreError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
