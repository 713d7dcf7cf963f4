//! Error type definitions.
//!
//! This module defines the setup errors, the upstream transport error, and the
//! failure taxonomy carried by fetch outcomes.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid configuration values detected at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric or string option is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The upstream base URL is not an http(s) URL.
    #[error("Upstream URL must start with http:// or https://, got {0:?}")]
    InvalidUpstreamUrl(String),
}

/// Transport-level failure talking to the upstream API.
///
/// Distinct from a non-2xx status: a `TransportError` means no usable HTTP
/// response was received at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid request: {0}")]
    Builder(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// Failure categories of a fetch outcome.
///
/// Each kind maps to a fixed HTTP status in the server layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Inbound admission denied (429)
    RateLimited,
    /// Upstream returned zero usable matches (404)
    NotFound,
    /// Search call failed at transport, status, or parse level (500).
    ///
    /// A panic anywhere in a job, download step included, is also reported
    /// under this kind with an "internal error" detail.
    UpstreamSearchFailed,
    /// Asset download failed at transport or status level (500)
    DownloadFailed,
    /// Caller gave up waiting on the queue (408)
    Timeout,
    /// The dispatcher worker is gone, typically during shutdown (503)
    Unavailable,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// User-facing error string for the JSON `error` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "Rate limit exceeded",
            FailureKind::NotFound => "No matching image found",
            FailureKind::UpstreamSearchFailed => "Failed to fetch from Danbooru",
            FailureKind::DownloadFailed => "Failed to download image",
            FailureKind::Timeout => "Request timed out waiting in queue",
            FailureKind::Unavailable => "Image queue is unavailable",
        }
    }

    /// Stable snake_case label used in status counters.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "rate_limited",
            FailureKind::NotFound => "not_found",
            FailureKind::UpstreamSearchFailed => "upstream_search_failed",
            FailureKind::DownloadFailed => "download_failed",
            FailureKind::Timeout => "timeout",
            FailureKind::Unavailable => "unavailable",
        }
    }
}
