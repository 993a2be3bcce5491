//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{PostService, UploadService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Post creation and feed listing.
    pub post_service: Arc<PostService>,
    /// Presigned upload issuance.
    pub upload_service: Arc<UploadService>,
}
