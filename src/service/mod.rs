//! Service layer: business rules and orchestration.
//!
//! [`PostService`] writes and reads posts and resolves their image URLs
//! through the [`ImageUrlResolver`]. [`UploadService`] applies upload
//! rules before asking the storage gateway to sign.

pub mod image_url;
pub mod post_service;
pub mod upload_service;

pub use image_url::{ImageUrl, ImageUrlResolver};
pub use post_service::{PostService, PostView};
pub use upload_service::UploadService;
