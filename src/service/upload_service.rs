//! Upload service: applies upload rules, then signs.

use std::sync::Arc;

use crate::error::BoardError;
use crate::storage::{StorageGateway, UploadTicket};

/// Content-type prefix accepted for uploads.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Issues presigned upload tickets for image files.
#[derive(Debug, Clone)]
pub struct UploadService {
    gateway: Arc<StorageGateway>,
    max_bytes: u64,
    expires_in: u64,
}

impl UploadService {
    /// Creates an upload service enforcing `max_bytes`, whose tickets
    /// expire after `expires_in` seconds.
    #[must_use]
    pub fn new(gateway: Arc<StorageGateway>, max_bytes: u64, expires_in: u64) -> Self {
        Self {
            gateway,
            max_bytes,
            expires_in,
        }
    }

    /// Checks the declared type and size, then signs an upload.
    ///
    /// `size` is the client's own claim. When it is omitted, only the
    /// storage-side `content-length-range` condition limits the upload.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedContentType`] for non-image types,
    /// [`BoardError::FileTooLarge`] when `size` exceeds the ceiling, and
    /// [`BoardError::PresignFailed`] when the gateway cannot sign.
    pub async fn presign(
        &self,
        filename: &str,
        content_type: &str,
        size: Option<u64>,
    ) -> Result<UploadTicket, BoardError> {
        if !content_type.starts_with(IMAGE_MIME_PREFIX) {
            return Err(BoardError::UnsupportedContentType);
        }
        if let Some(size) = size
            && size > self.max_bytes
        {
            return Err(BoardError::FileTooLarge {
                max_bytes: self.max_bytes,
            });
        }

        let ticket = self
            .gateway
            .create_upload_authorization(filename, content_type, self.max_bytes, self.expires_in)
            .await?;
        Ok(ticket)
    }
}
