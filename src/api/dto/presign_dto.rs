//! Presigned upload DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::storage::UploadTicket;

/// Request body for `POST /api/presign`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PresignRequest {
    /// Original filename, 1–200 characters. Sanitized into the object key.
    #[validate(length(min = 1, max = 200))]
    pub filename: String,
    /// MIME type, 1–100 characters. Must start with `image/`.
    #[validate(length(min = 1, max = 100))]
    pub content_type: String,
    /// Declared file size in bytes, at least 1.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub size: Option<u64>,
}

/// Response body for `POST /api/presign`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresignResponse {
    /// Upload HTTP method (`"POST"`).
    pub method: String,
    /// Upload target URL.
    pub url: String,
    /// Form fields to submit unmodified ahead of the file.
    pub fields: BTreeMap<String, String>,
    /// Object key to pass back as `image_key` when creating the post.
    pub key: String,
    /// Seconds the upload authorization stays valid.
    pub expires_in: u64,
}

impl From<UploadTicket> for PresignResponse {
    fn from(ticket: UploadTicket) -> Self {
        Self {
            method: ticket.method.to_string(),
            url: ticket.url,
            fields: ticket.fields,
            key: ticket.key,
            expires_in: ticket.expires_in,
        }
    }
}
