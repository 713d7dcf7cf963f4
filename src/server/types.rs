//! Server state and JSON response bodies.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::dispatch::{QueueSnapshot, RequestQueue};
use crate::error_handling::ProcessingStats;
use crate::rate_limiter::RateLimiter;

/// Shared state for every route
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub queue: RequestQueue,
    pub stats: Arc<ProcessingStats>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(limiter: Arc<RateLimiter>, queue: RequestQueue) -> Self {
        AppState {
            limiter,
            queue,
            stats: Arc::new(ProcessingStats::new()),
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON body of every non-image response from `/image.jpg`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// JSON response for `/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub queue_length: usize,
    pub worker_running: bool,
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub queue: QueueSnapshot,
    pub rate_limit: RateLimitInfo,
    pub requests: RequestCounts,
}

#[derive(Debug, Serialize)]
pub struct RateLimitInfo {
    pub max_calls: usize,
    pub period_seconds: f64,
    pub in_window: usize,
}

#[derive(Debug, Serialize)]
pub struct RequestCounts {
    pub served: usize,
    pub failed: usize,
    pub failures: BTreeMap<&'static str, usize>,
}
