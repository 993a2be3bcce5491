//! OpenAPI document for the board API.

use utoipa::OpenApi;

use crate::api::dto::{
    CreatePostRequest, PostDto, PostListResponse, PresignRequest, PresignResponse,
};
use crate::api::handlers::system::HealthResponse;
use crate::error::ErrorResponse;

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "anon-board", description = "Anonymous message board API"),
    paths(
        crate::api::handlers::posts::create_post,
        crate::api::handlers::posts::list_posts,
        crate::api::handlers::presign::presign,
        crate::api::handlers::system::health_handler,
    ),
    components(schemas(
        CreatePostRequest,
        PostDto,
        PostListResponse,
        PresignRequest,
        PresignResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Posts", description = "Create and list posts"),
        (name = "Uploads", description = "Direct-to-storage image uploads"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui`, backed by `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
#[must_use]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/posts", "/api/presign", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
