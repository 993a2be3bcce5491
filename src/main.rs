//! anon-board server entry point.
//!
//! Connects to MySQL, ensures the schema, and starts the Axum HTTP server.
//! The process refuses to serve if the database is unreachable.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use anon_board::api;
use anon_board::app_state::AppState;
use anon_board::config::AppConfig;
use anon_board::persistence::{MySqlPersistence, PostStore};
use anon_board::service::{ImageUrlResolver, PostService, UploadService};
use anon_board::storage::StorageGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing; LOG_FORMAT=json switches to structured output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting anon-board");

    // Persistence: fatal if unreachable
    let persistence = Arc::new(MySqlPersistence::connect(&config.database).await?);
    persistence.ping().await?;
    tracing::info!(database = %config.database.name, "database reachable");
    persistence.ensure_schema().await?;

    // Object storage
    let gateway = Arc::new(StorageGateway::from_config(&config.storage).await);
    if !gateway.is_configured() {
        tracing::warn!("S3_BUCKET is not set; presign requests will fail");
    }

    // Build service layer
    let resolver = ImageUrlResolver::new(
        Arc::clone(&gateway),
        config.cdn_domain.clone(),
        config.view_expires_in,
    );
    let store: Arc<dyn PostStore> = Arc::clone(&persistence) as Arc<dyn PostStore>;
    let post_service = Arc::new(PostService::new(store, resolver));
    let upload_service = Arc::new(UploadService::new(
        gateway,
        config.upload_max_bytes,
        config.presign_expires_in,
    ));

    // Build application state
    let app_state = AppState {
        post_service,
        upload_service,
    };

    let app = api::build_app(app_state, &config.web_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, web_dir = %config.web_dir.display(), "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    persistence.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received, draining requests");
}
