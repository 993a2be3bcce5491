//! Post creation and feed DTOs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::DEFAULT_LIMIT;
use crate::service::PostView;

/// Request body for `POST /api/posts`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Message text, 1–2000 characters.
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    /// Key returned by `POST /api/presign`, if an image was uploaded.
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub image_key: Option<String>,
}

/// Query parameters for `GET /api/posts`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsParams {
    /// Number of posts to return; clamped to 1–100. Defaults to 50.
    #[serde(default = "default_limit", deserialize_with = "saturating_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Parses an integer, saturating magnitudes beyond `i64` instead of
/// rejecting them. Returns `None` for anything that is not an integer.
#[must_use]
pub fn parse_saturating_i64(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(
        trimmed
            .parse()
            .unwrap_or(if negative { i64::MIN } else { i64::MAX }),
    )
}

fn saturating_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LimitVisitor;

    impl Visitor<'_> for LimitVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            parse_saturating_i64(v)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(LimitVisitor)
}

/// A post as rendered to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostDto {
    /// Post identifier.
    pub id: i64,
    /// Message text.
    pub message: String,
    /// Viewable image URL, or `null` when there is no image or it could
    /// not be resolved.
    pub image_url: Option<String>,
    /// Creation timestamp (ISO-8601).
    pub created_at: DateTime<Utc>,
}

impl From<PostView> for PostDto {
    fn from(view: PostView) -> Self {
        Self {
            id: view.post.id,
            message: view.post.message,
            image_url: view.image_url.into_option(),
            created_at: view.post.created_at,
        }
    }
}

/// Response body for `GET /api/posts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    /// Posts, newest first.
    pub data: Vec<PostDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> CreatePostRequest {
        CreatePostRequest {
            message: message.to_string(),
            image_key: None,
        }
    }

    #[test]
    fn message_length_bounds_are_in_characters() {
        assert!(request("").validate().is_err());
        assert!(request("x").validate().is_ok());
        assert!(request(&"字".repeat(2000)).validate().is_ok());
        assert!(request(&"a".repeat(2001)).validate().is_err());
    }

    #[test]
    fn saturating_parse_covers_unbounded_integers() {
        assert_eq!(parse_saturating_i64("42"), Some(42));
        assert_eq!(parse_saturating_i64("+7"), Some(7));
        assert_eq!(parse_saturating_i64("-3"), Some(-3));
        assert_eq!(parse_saturating_i64("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_saturating_i64("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_saturating_i64("abc"), None);
        assert_eq!(parse_saturating_i64("1.5"), None);
        assert_eq!(parse_saturating_i64("-"), None);
        assert_eq!(parse_saturating_i64(""), None);
    }

    #[test]
    fn list_params_accept_json_integers() {
        let parsed: Result<ListPostsParams, _> = serde_json::from_str(r#"{"limit": 7}"#);
        assert_eq!(parsed.map(|p| p.limit).ok(), Some(7));
    }

    #[test]
    fn list_params_default_limit() {
        let parsed: Result<ListPostsParams, _> = serde_json::from_str("{}");
        assert_eq!(parsed.map(|p| p.limit).ok(), Some(DEFAULT_LIMIT));
    }
}
