//! Request and response values exchanged with an `UpstreamClient`.

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;

use crate::config::UpstreamHeaders;

/// Post search call: query parameters plus the fixed headers and timeout.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub params: Vec<(String, String)>,
    pub headers: UpstreamHeaders,
    pub timeout: Duration,
}

impl SearchRequest {
    /// Looks up the first parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw search response: status code and JSON body text.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Asset download call.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub headers: UpstreamHeaders,
    pub timeout: Duration,
}

/// Raw download response.
#[derive(Debug, Clone)]
pub struct DownloadResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}
