//! Inbound HTTP surface.
//!
//! Provides three endpoints:
//! - `/image.jpg` - rate-limited, queued image search returning raw bytes
//! - `/health` - liveness plus queue depth
//! - `/status` - JSON snapshot of the queue, rate limit, and outcome counters

mod handlers;
mod params;
mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::IMAGE_ENDPOINT_KEY;
use handlers::{health_handler, image_handler, status_handler};

pub use handlers::{outcome_response, status_for};
pub use params::parse_image_query;
pub use types::{AppState, ErrorBody, HealthResponse, StatusResponse};

/// Builds the router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(IMAGE_ENDPOINT_KEY, get(image_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `address` for the proxy.
pub async fn bind(address: &str) -> Result<TcpListener, anyhow::Error> {
    TcpListener::bind(address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind proxy to {}: {}", address, e))
}

/// Serves until `shutdown` is cancelled, then lets in-flight requests finish.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Proxy listening on http://{}/", addr);
        log::info!("  - Image: http://{}{}", addr, IMAGE_ENDPOINT_KEY);
        log::info!("  - Health: http://{}/health", addr);
        log::info!("  - Status: http://{}/status", addr);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Proxy server error: {}", e))?;

    Ok(())
}
