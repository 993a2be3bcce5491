//! Persistence layer: the `posts` table.
//!
//! [`PostStore`] is the seam between the service layer and storage. The
//! production implementation, [`MySqlPersistence`], owns a bounded
//! `sqlx::MySqlPool`; [`MemoryPostStore`] keeps rows in process and is
//! what the API tests run against.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;

pub use memory::MemoryPostStore;
pub use mysql::MySqlPersistence;

use crate::domain::Post;
use crate::error::BoardError;

/// Insert-and-list storage for posts.
///
/// Implementations clamp `limit` into `[1, 100]` and return posts
/// newest-first (`created_at` descending, ties broken by `id`).
#[async_trait]
pub trait PostStore: Send + Sync + std::fmt::Debug {
    /// Idempotently creates the `posts` table.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PersistenceError`] if the store is unreachable.
    async fn ensure_schema(&self) -> Result<(), BoardError>;

    /// Inserts a post and returns the row as stored, including the
    /// server-assigned `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PersistenceError`] on store failure.
    async fn insert_post(&self, message: &str, image_key: Option<&str>)
    -> Result<Post, BoardError>;

    /// Returns the most recent posts, at most `clamp_limit(limit)` of them.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PersistenceError`] on store failure.
    async fn list_posts(&self, limit: i64) -> Result<Vec<Post>, BoardError>;
}
