//! Board error types with HTTP status code mapping.
//!
//! [`BoardError`] is the central error type for the API. Each variant
//! maps to a specific HTTP status code and a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::storage::StorageError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "detail": "Only image/* is allowed",
///   "code": 1002
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub detail: String,
    /// Numeric error code (see code ranges on [`BoardError`]).
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status               |
/// |-----------|---------------|---------------------------|
/// | 1000–1999 | Validation    | 400 Bad Request           |
/// | 3000–3999 | Server        | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Request body or query failed schema validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Upload content type is not in the `image/*` class.
    #[error("Only image/* is allowed")]
    UnsupportedContentType,

    /// Declared upload size exceeds the configured maximum.
    #[error("File too large (> {max_bytes} bytes)")]
    FileTooLarge {
        /// Configured upload ceiling in bytes.
        max_bytes: u64,
    },

    /// Object storage could not produce an upload authorization.
    #[error("Presign failed (S3 not ready): {0}")]
    PresignFailed(#[from] StorageError),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::UnsupportedContentType => 1002,
            Self::FileTooLarge { .. } => 1003,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::PresignFailed(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedContentType | Self::FileTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::PresignFailed(_) | Self::PersistenceError(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for BoardError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        }
        let body = ErrorResponse {
            detail: self.to_string(),
            code: self.error_code(),
        };
        (status, axum::Json(body)).into_response()
    }
}
