//! The board's only persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feed size when the client does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Smallest feed size served.
pub const MIN_LIMIT: i64 = 1;

/// Largest feed size served.
pub const MAX_LIMIT: i64 = 100;

/// A stored post row from the `posts` table.
///
/// Every field is assigned once at insert time and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    /// Auto-increment row ID, strictly increasing in insertion order.
    pub id: i64,
    /// Message text (1–2000 characters).
    pub message: String,
    /// Object key of the attached image, if any. Never checked against the
    /// bucket.
    pub image_key: Option<String>,
    /// Store-assigned insertion timestamp; the feed sort key.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Returns the image key when it is present and non-empty.
    #[must_use]
    pub fn image_key(&self) -> Option<&str> {
        self.image_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Clamps a client-supplied feed size into `[MIN_LIMIT, MAX_LIMIT]`.
#[must_use]
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}
