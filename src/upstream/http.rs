//! `reqwest`-backed upstream client.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::UPSTREAM_SEARCH_PATH;
use crate::error_handling::{categorize_reqwest_error, TransportError};

use super::types::{DownloadRequest, DownloadResponse, SearchRequest, SearchResponse};
use super::UpstreamClient;

/// Talks to a Danbooru-compatible API over HTTP.
///
/// Non-2xx responses are returned as values; only transport failures become
/// `TransportError`.
#[derive(Clone)]
pub struct HttpUpstreamClient {
    client: Arc<reqwest::Client>,
    search_url: String,
}

impl HttpUpstreamClient {
    /// Creates a client for the API rooted at `base_url` (no trailing slash).
    pub fn new(client: Arc<reqwest::Client>, base_url: &str) -> Self {
        HttpUpstreamClient {
            client,
            search_url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                UPSTREAM_SEARCH_PATH
            ),
        }
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, TransportError> {
        let builder = self
            .client
            .get(&self.search_url)
            .query(&request.params)
            .timeout(request.timeout);
        let response = request
            .headers
            .apply_to_request_builder(builder)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        let status = response.status();
        log::debug!("Upstream search {} -> {}", response.url(), status);
        let body = response
            .text()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        Ok(SearchResponse { status, body })
    }

    async fn download(
        &self,
        request: &DownloadRequest,
    ) -> Result<DownloadResponse, TransportError> {
        let builder = self.client.get(&request.url).timeout(request.timeout);
        let response = request
            .headers
            .apply_to_request_builder(builder)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        log::debug!(
            "Upstream download {} -> {} ({})",
            request.url,
            status,
            content_type.as_deref().unwrap_or("no content type")
        );
        let bytes = response
            .bytes()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        Ok(DownloadResponse {
            status,
            content_type,
            bytes,
        })
    }
}
