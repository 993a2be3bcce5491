//! Storage gateway: presigned upload and view authorizations for
//! S3-compatible object storage.
//!
//! Credentials and region come from the AWS default provider chain
//! (environment, shared `~/.aws` files, SSO, web identity, instance
//! roles). View URLs are presigned by `aws-sdk-s3`; upload policies are
//! signed locally in [`post_policy`]. No request is sent to the storage
//! service from this process. The browser uploads directly to the bucket
//! using the returned form fields.

pub mod gateway;
pub mod object_key;
pub mod post_policy;

pub use gateway::{StorageGateway, UploadTicket};

/// Errors raised while producing storage authorizations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No bucket configured (`S3_BUCKET` empty or unset).
    #[error("S3_BUCKET is not set")]
    NotConfigured,

    /// The SDK configuration carries no credentials provider.
    #[error("AWS credentials are not configured")]
    MissingCredentials,

    /// The credentials provider chain could not produce credentials.
    #[error("AWS credentials unavailable: {0}")]
    Credentials(String),

    /// The signature could not be computed.
    #[error("signing failed: {0}")]
    Signing(String),
}
