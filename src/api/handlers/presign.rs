//! Presigned upload handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{PresignRequest, PresignResponse};
use crate::api::extract::ValidatedJson;
use crate::app_state::AppState;
use crate::error::{BoardError, ErrorResponse};

/// `POST /api/presign` — Authorize a direct browser upload.
///
/// # Errors
///
/// Returns [`BoardError::InvalidRequest`] on schema violations,
/// [`BoardError::UnsupportedContentType`] for non-image types,
/// [`BoardError::FileTooLarge`] for oversized declarations, and
/// [`BoardError::PresignFailed`] when storage is not ready.
#[utoipa::path(
    post,
    path = "/api/presign",
    tag = "Uploads",
    summary = "Presign an image upload",
    description = "Returns a signed POST policy for uploading one image straight to object storage. No bytes pass through this server.",
    request_body = PresignRequest,
    responses(
        (status = 200, description = "Upload authorized", body = PresignResponse),
        (status = 400, description = "Invalid request, type, or size", body = ErrorResponse),
        (status = 500, description = "Object storage not ready", body = ErrorResponse),
    )
)]
pub async fn presign(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PresignRequest>,
) -> Result<impl IntoResponse, BoardError> {
    let ticket = state
        .upload_service
        .presign(&req.filename, &req.content_type, req.size)
        .await?;
    Ok(Json(PresignResponse::from(ticket)))
}

/// Upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/presign", post(presign))
}
