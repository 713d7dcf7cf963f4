//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, RateLimitInfo, RequestCounts, StatusResponse};
use crate::config::IMAGE_ENDPOINT_KEY;

/// Queue snapshot, rate limit budget, and outcome counters since startup
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let response = StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        queue: state.queue.snapshot(),
        rate_limit: RateLimitInfo {
            max_calls: state.limiter.max_calls(),
            period_seconds: state.limiter.period().as_secs_f64(),
            in_window: state.limiter.window_len(IMAGE_ENDPOINT_KEY),
        },
        requests: RequestCounts {
            served: state.stats.success_count(),
            failed: state.stats.total_failures(),
            failures: state.stats.failure_breakdown(),
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}
