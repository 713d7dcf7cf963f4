//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger (plain or JSON)
//! - Upstream HTTP client
//! - Inbound rate limiter
//! - Fetch pipeline and dispatch queue

mod client;
mod logger;
mod rate_limiter;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::dispatch::RequestQueue;
use crate::error_handling::InitializationError;
use crate::fetch::FetchPipeline;
use crate::upstream::HttpUpstreamClient;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use rate_limiter::init_rate_limiter;

/// Wires the upstream client into a pipeline and starts the dispatch worker.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the HTTP client cannot be
/// built.
pub fn init_request_queue(
    config: &Config,
    shutdown: CancellationToken,
) -> Result<(RequestQueue, JoinHandle<()>), InitializationError> {
    let client = init_client(config)?;
    let upstream = Arc::new(HttpUpstreamClient::new(client, config.upstream_base()));
    let pipeline = FetchPipeline::new(
        upstream,
        config.upstream_headers(),
        config.upstream_timeout(),
    );
    Ok(RequestQueue::start(
        pipeline,
        config.dispatch_interval(),
        config.queue_timeout(),
        shutdown,
    ))
}
