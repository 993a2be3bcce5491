//! # anon-board
//!
//! Backend for an anonymous message board. Clients post short messages,
//! optionally with an image, and read back a newest-first feed. Images are
//! uploaded by the browser straight to S3-compatible storage using a
//! presigned POST policy, so file bytes never pass through this service.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/) ── Static bundle (ServeDir)
//!     │
//!     ├── PostService / UploadService (service/)
//!     │       └── ImageUrlResolver (CDN or presigned GET)
//!     │
//!     ├── PostStore (persistence/) ── MySQL pool
//!     └── StorageGateway (storage/) ── aws-sdk-s3 presigning + POST policy signing
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod storage;
