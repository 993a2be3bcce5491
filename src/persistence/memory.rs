//! In-process post store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::PostStore;
use crate::domain::{Post, clamp_limit};
use crate::error::BoardError;

/// Post store backed by a `Vec` behind a [`tokio::sync::RwLock`].
///
/// Mirrors the MySQL store's contract: ids start at 1 and increase by one
/// per insert, `created_at` is taken at insert time, and listings are
/// newest-first with `limit` clamped to `[1, 100]`.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored posts.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Returns `true` if no post has been stored.
    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn ensure_schema(&self) -> Result<(), BoardError> {
        Ok(())
    }

    async fn insert_post(
        &self,
        message: &str,
        image_key: Option<&str>,
    ) -> Result<Post, BoardError> {
        let mut posts = self.posts.write().await;
        let id = posts.last().map_or(1, |p| p.id.saturating_add(1));
        let post = Post {
            id,
            message: message.to_string(),
            image_key: image_key.map(str::to_string),
            created_at: Utc::now(),
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<Post>, BoardError> {
        let limit = usize::try_from(clamp_limit(limit)).unwrap_or(1);
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts.truncate(limit);
        Ok(posts)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn seeded(n: usize) -> MemoryPostStore {
        let store = MemoryPostStore::new();
        for i in 0..n {
            let Ok(_) = store.insert_post(&format!("post {i}"), None).await else {
                panic!("insert failed");
            };
        }
        store
    }

    #[tokio::test]
    async fn ids_are_positive_and_strictly_increasing() {
        let store = MemoryPostStore::new();
        let Ok(a) = store.insert_post("first", None).await else {
            panic!("insert failed");
        };
        let Ok(b) = store.insert_post("second", Some("uploads/k_a.png")).await else {
            panic!("insert failed");
        };
        assert!(a.id > 0);
        assert!(b.id > a.id);
        assert_eq!(b.image_key.as_deref(), Some("uploads/k_a.png"));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = seeded(3).await;
        let Ok(posts) = store.list_posts(10).await else {
            panic!("list failed");
        };
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn list_clamps_limit() {
        let store = seeded(120).await;
        let Ok(zero) = store.list_posts(0).await else {
            panic!("list failed");
        };
        assert_eq!(zero.len(), 1);
        let Ok(huge) = store.list_posts(1000).await else {
            panic!("list failed");
        };
        assert_eq!(huge.len(), 100);
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let store = MemoryPostStore::new();
        assert!(store.is_empty().await);
        let _ = store.insert_post("x", None).await;
        assert_eq!(store.len().await, 1);
    }
}
