//! Configuration constants.
//!
//! This module defines the defaults used throughout the proxy, including
//! upstream timeouts, dispatch spacing, and rate limit thresholds.

use std::time::Duration;

/// Default bind host for the HTTP surface
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port for the HTTP surface
pub const DEFAULT_PORT: u16 = 5000;

/// Default base URL of the upstream image board
pub const DEFAULT_UPSTREAM_URL: &str = "https://danbooru.donmai.us";

/// Path of the upstream post search endpoint, relative to the base URL
pub const UPSTREAM_SEARCH_PATH: &str = "/posts.json";

/// Per-call timeout for upstream search and download requests, in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Idle time the dispatcher waits after each job before taking the next one.
/// The service variant ships with 15 seconds.
pub const DEFAULT_DISPATCH_INTERVAL_SECS: f64 = 15.0;

/// How long a caller waits on its queued job before giving up
pub const DEFAULT_QUEUE_TIMEOUT_SECS: u64 = 30;

/// Inbound rate limit for `/image.jpg`: at most this many admissions...
pub const DEFAULT_RATE_LIMIT_MAX_CALLS: usize = 10;
/// ...within this trailing window, in seconds
pub const DEFAULT_RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Identifying User-Agent sent to the upstream API.
///
/// Danbooru rejects generic or empty agents, so this names the proxy.
/// Users can override it via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = "fast-danbooru-proxy/1.0";

/// Referer sent with every upstream request
pub const DEFAULT_REFERER: &str = "https://danbooru.donmai.us/";

/// Content type used when the upstream download omits one
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Upstream results requested per search. The proxy serves exactly one image.
pub const UPSTREAM_RESULT_LIMIT: u32 = 1;

/// Half-width of the accepted width band around a requested width, in pixels
pub const WIDTH_TOLERANCE: u32 = 100;

/// Rate limiter key for the image endpoint
pub const IMAGE_ENDPOINT_KEY: &str = "/image.jpg";

/// Converts a fractional second count into a `Duration`.
///
/// Returns `None` for negative, non-finite, or out-of-range values.
pub fn secs_f64_to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_f64_to_duration() {
        assert_eq!(secs_f64_to_duration(1.5), Some(Duration::from_millis(1500)));
        assert_eq!(secs_f64_to_duration(0.0), Some(Duration::ZERO));
        assert_eq!(secs_f64_to_duration(-3.0), None);
        assert_eq!(secs_f64_to_duration(f64::NAN), None);
        assert_eq!(secs_f64_to_duration(f64::INFINITY), None);
        assert_eq!(secs_f64_to_duration(1e30), None);
    }
}
