//! Error categorization.
//!
//! Maps `reqwest` failures onto the transport error taxonomy so the fetch
//! pipeline can report a precise detail string.

use reqwest::StatusCode;

use super::types::TransportError;

/// Categorizes a `reqwest::Error` into a `TransportError`.
///
/// Status errors never reach this function: the upstream client returns
/// non-2xx responses as values, so only transport-level failures arrive here.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportError {
    let detail = error.to_string();
    if error.is_timeout() {
        TransportError::Timeout(detail)
    } else if error.is_connect() {
        TransportError::Connect(detail)
    } else if error.is_builder() {
        TransportError::Builder(detail)
    } else if error.is_body() || error.is_decode() {
        TransportError::Body(detail)
    } else {
        TransportError::Other(detail)
    }
}

/// Human-readable detail for a non-2xx upstream status.
pub fn describe_status(status: StatusCode, target: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    format!("HTTP status {} {} for {}", status.as_u16(), reason, target)
}
