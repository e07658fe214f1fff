//! HTTP export service.
//!
//! Exposes a single resource, `/api/export`:
//!
//! | Method | Behavior |
//! |--------|----------|
//! | `POST` | validate the JSON body, render, stream back a ZIP |
//! | `GET` | usage document |
//! | `OPTIONS` | CORS preflight |

pub mod handlers;
pub mod request;
pub mod response;

use crate::config::ExportConfig;
use crate::error::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use std::sync::Arc;

pub use request::{ExportRequest, parse_request};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<ExportConfig>,
}

/// Builds the service router.
pub fn router(config: ExportConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/api/export",
            post(handlers::export_handler)
                .get(handlers::docs_handler)
                .options(handlers::options_handler),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
pub async fn serve(config: ExportConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    log::info!("LogoForge export service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Export service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested, draining in-flight exports");
}
