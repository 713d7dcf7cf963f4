//! `/image.jpg` handler.

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::params::parse_image_query;
use super::super::types::{AppState, ErrorBody};
use crate::config::IMAGE_ENDPOINT_KEY;
use crate::error_handling::FailureKind;
use crate::models::FetchOutcome;

/// Fixed HTTP status for each failure kind.
pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::UpstreamSearchFailed | FailureKind::DownloadFailed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        FailureKind::Timeout => StatusCode::REQUEST_TIMEOUT,
        FailureKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Renders a fetch outcome as an HTTP response.
pub fn outcome_response(outcome: FetchOutcome) -> Response {
    match outcome {
        FetchOutcome::Success {
            bytes,
            content_type,
        } => (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        FetchOutcome::Failure { kind, message } => {
            // Not-found and rate-limit are expected outcomes; no detail needed
            let details = match kind {
                FailureKind::NotFound | FailureKind::RateLimited => None,
                _ => Some(message),
            };
            (
                status_for(kind),
                Json(ErrorBody {
                    error: kind.as_str(),
                    details,
                }),
            )
                .into_response()
        }
    }
}

/// Admits the request against the endpoint budget, then waits on the queue.
pub async fn image_handler(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    if !state.limiter.admit(IMAGE_ENDPOINT_KEY) {
        log::warn!(
            "Rejected {} request: more than {} calls in {}s",
            IMAGE_ENDPOINT_KEY,
            state.limiter.max_calls(),
            state.limiter.period().as_secs()
        );
        state.stats.increment_failure(FailureKind::RateLimited);
        let retry_after = state.limiter.retry_after(IMAGE_ENDPOINT_KEY);
        let mut response = outcome_response(FetchOutcome::failure(
            FailureKind::RateLimited,
            "inbound rate limit",
        ));
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    let query = parse_image_query(raw.as_deref());
    log::info!(
        "Image request: tags='{}' width={:?} order={:?}",
        query.tag_expression(),
        query.target_width,
        query.order_mode
    );

    let outcome = state.queue.submit(query).await;
    match outcome.failure_kind() {
        None => state.stats.increment_success(),
        Some(kind) => state.stats.increment_failure(kind),
    }
    outcome_response(outcome)
}
