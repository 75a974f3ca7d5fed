use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Post, User};
use super::store::{BlogStore, StoreError};

const POST_COLUMNS: &str = "id, title, content, author_id, created_at, updated_at";

/// PostgreSQL-backed store sharing one pool across all requests.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, $2)
             RETURNING id, email, password_hash, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post, StoreError> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(title)
            .bind(content)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(post)
    }

    async fn update_post(
        &self,
        id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE posts
             SET title = $1, content = $2, updated_at = NOW()
             WHERE id = $3 AND author_id = $4",
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_posts(&self, skip: i64, take: i64) -> Result<Vec<Post>, StoreError> {
        let sql = format!(
            "SELECT {} FROM posts ORDER BY created_at, id LIMIT $1 OFFSET $2",
            POST_COLUMNS
        );

        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
