//! booru_proxy library: a rate-limited image proxy for Danbooru-style boards
//!
//! Each `GET /image.jpg` request is admitted against a sliding-window rate
//! limit, turned into a tag search, and placed on a single FIFO queue. One
//! worker drains the queue, searching upstream, picking the best-sized asset
//! variant, and downloading it, then idles for a fixed interval before the
//! next job so the upstream sees a steady, bounded request rate.
//!
//! # Example
//!
//! ```no_run
//! use booru_proxy::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     port: 8080,
//!     interval_seconds: 5.0,
//!     ..Default::default()
//! };
//! run_server(config).await
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod dispatch;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod rate_limiter;
pub mod server;
pub mod upstream;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::run_server;

// Internal run module (wires the proxy together and owns its lifecycle)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_final_statistics, shutdown_gracefully, shutdown_signal};
    use crate::config::Config;
    use crate::initialization::{init_rate_limiter, init_request_queue};
    use crate::server::{self, AppState};

    /// Runs the proxy until Ctrl+C or SIGTERM.
    ///
    /// Validates `config`, starts the dispatch worker, and serves HTTP. On
    /// shutdown the server stops accepting connections, in-flight requests
    /// finish, and the worker is joined before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be built, or the listen address cannot be bound.
    pub async fn run_server(config: Config) -> Result<()> {
        config.validate().context("Invalid configuration")?;

        let shutdown = CancellationToken::new();
        let limiter = init_rate_limiter(&config);
        let (queue, worker) = init_request_queue(&config, shutdown.clone())
            .context("Failed to initialize upstream HTTP client")?;

        let state = AppState::new(limiter, queue);
        let stats = Arc::clone(&state.stats);
        let start_time = Arc::clone(&state.start_time);

        let listener = match server::bind(&config.bind_address()).await {
            Ok(listener) => listener,
            Err(e) => {
                shutdown_gracefully(shutdown, worker).await;
                return Err(e);
            }
        };

        info!(
            "Forwarding to {} every {:.1}s at most, {} requests per {}s accepted",
            config.upstream_base(),
            config.interval_seconds,
            config.rate_limit_max_calls,
            config.rate_limit_period_seconds
        );

        let signal_token = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            info!("Shutdown signal received");
            signal_token.cancel();
        });

        let result = server::serve(listener, state, shutdown.clone()).await;

        shutdown_gracefully(shutdown, worker).await;
        log_final_statistics(&stats, start_time.elapsed());

        result
    }
}
