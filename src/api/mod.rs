//! REST API layer: route handlers, DTOs, and router composition.
//!
//! JSON endpoints live under `/api`, the health probe at `/health`, and
//! every other path falls through to the static front-end bundle.

pub mod doc;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod static_files;

use std::path::Path;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the servable application: API routes, OpenAPI UI (with the
/// `swagger-ui` feature), and the static bundle from `web_dir` as the
/// fallback, wrapped in tracing and CORS layers.
pub fn build_app(state: AppState, web_dir: &Path) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(doc::swagger_ui());

    router
        .fallback_service(static_files::serve_dir(web_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
