use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Post, User};
use super::store::{BlogStore, StoreError};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // insertion order == creation order
    posts: Vec<Post>,
}

/// In-process store with the same semantics as [`super::PgStore`].
///
/// Used by the test suite and for running the server without a database
/// (`BLOG_STORE=memory`). Counts every operation it receives so callers can
/// assert that a request never reached the store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    operations: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations attempted so far.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail, as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn begin(&self) -> Result<(), StoreError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Query("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        self.begin()?;
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == email) {
            return Err(StoreError::Conflict(format!("email '{}' already registered", email)));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.begin()?;
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post, StoreError> {
        self.begin()?;
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&author_id) {
            return Err(StoreError::MissingReference(format!("user {}", author_id)));
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<u64, StoreError> {
        self.begin()?;
        let mut tables = self.tables.write().await;

        match tables
            .posts
            .iter_mut()
            .find(|p| p.id == id && p.author_id == author_id)
        {
            Some(post) => {
                post.title = title.to_string();
                post.content = content.to_string();
                post.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_posts(&self, skip: i64, take: i64) -> Result<Vec<Post>, StoreError> {
        self.begin()?;
        let tables = self.tables.read().await;
        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(take.max(0)).unwrap_or(usize::MAX);
        Ok(tables.posts.iter().skip(skip).take(take).cloned().collect())
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        self.begin()?;
        let tables = self.tables.read().await;
        Ok(tables.posts.len() as i64)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        self.begin()?;
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.begin()
    }
}
