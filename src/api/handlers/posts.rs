//! Post handlers: create and list.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CreatePostRequest, ListPostsParams, PostDto, PostListResponse};
use crate::api::extract::ValidatedJson;
use crate::app_state::AppState;
use crate::error::{BoardError, ErrorResponse};

/// `POST /api/posts` — Create a post.
///
/// # Errors
///
/// Returns [`BoardError::InvalidRequest`] on schema violations and
/// [`BoardError::PersistenceError`] if the store fails.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    summary = "Create a post",
    description = "Stores an anonymous message, optionally referencing an image key obtained from `/api/presign`. The key is not checked against the bucket.",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = PostDto),
        (status = 400, description = "Schema violation", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, BoardError> {
    let view = state
        .post_service
        .create_post(&req.message, req.image_key.as_deref())
        .await?;
    Ok(Json(PostDto::from(view)))
}

/// `GET /api/posts` — List the newest posts.
///
/// # Errors
///
/// Returns [`BoardError::InvalidRequest`] if `limit` is not an integer and
/// [`BoardError::PersistenceError`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    summary = "List posts",
    description = "Returns posts newest-first. `limit` is clamped to 1–100.",
    params(ListPostsParams),
    responses(
        (status = 200, description = "Newest posts", body = PostListResponse),
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    params: Result<Query<ListPostsParams>, QueryRejection>,
) -> Result<impl IntoResponse, BoardError> {
    let Query(params) = params.map_err(|e| BoardError::InvalidRequest(e.body_text()))?;
    let views = state.post_service.list_posts(params.limit).await?;
    Ok(Json(PostListResponse {
        data: views.into_iter().map(PostDto::from).collect(),
    }))
}

/// Post routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/posts", post(create_post).get(list_posts))
}
