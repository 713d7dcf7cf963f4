//! Search, select, download.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{UpstreamHeaders, DEFAULT_IMAGE_CONTENT_TYPE};
use crate::error_handling::{describe_status, FailureKind};
use crate::models::{FetchOutcome, ImageQuery};
use crate::upstream::{
    parse_posts, DownloadRequest, SearchRequest, UpstreamClient,
};

use super::query::build_search_params;
use super::variant::select_variant;

/// Runs one image query against the upstream API.
///
/// Each of the two upstream calls is attempted exactly once. Every failure is
/// returned as a `FetchOutcome::Failure`; `run` never panics on bad upstream
/// data and never returns early without an outcome.
#[derive(Clone)]
pub struct FetchPipeline {
    client: Arc<dyn UpstreamClient>,
    headers: UpstreamHeaders,
    timeout: Duration,
}

impl FetchPipeline {
    pub fn new(client: Arc<dyn UpstreamClient>, headers: UpstreamHeaders, timeout: Duration) -> Self {
        FetchPipeline {
            client,
            headers,
            timeout,
        }
    }

    pub async fn run(&self, query: &ImageQuery) -> FetchOutcome {
        let search = SearchRequest {
            params: build_search_params(query),
            headers: self.headers.clone(),
            timeout: self.timeout,
        };
        log::debug!("Searching upstream with {:?}", search.params);

        let response = match self.client.search(&search).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Upstream search failed: {}", e);
                return FetchOutcome::failure(FailureKind::UpstreamSearchFailed, e.to_string());
            }
        };
        if !response.status.is_success() {
            let detail = describe_status(response.status, "post search");
            log::warn!("Upstream search rejected: {}", detail);
            return FetchOutcome::failure(FailureKind::UpstreamSearchFailed, detail);
        }

        let posts = match parse_posts(&response.body) {
            Ok(posts) => posts,
            Err(e) => {
                log::warn!("Upstream search returned unparseable JSON: {}", e);
                return FetchOutcome::failure(
                    FailureKind::UpstreamSearchFailed,
                    format!("invalid search response: {}", e),
                );
            }
        };
        let Some(post) = posts.into_iter().next() else {
            log::info!("No upstream match for '{}'", query.tag_expression());
            return FetchOutcome::failure(FailureKind::NotFound, "upstream returned no posts");
        };

        let Some(variant) = select_variant(&post.variants, query.target_width) else {
            log::info!("Post {} has no downloadable variants", post.id);
            return FetchOutcome::failure(
                FailureKind::NotFound,
                format!("post {} has no downloadable variants", post.id),
            );
        };
        log::debug!(
            "Post {}: selected {:?} variant {}x{}",
            post.id,
            variant.kind,
            variant.width,
            variant.height
        );

        let download = DownloadRequest {
            url: variant.url.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout,
        };
        let asset = match self.client.download(&download).await {
            Ok(asset) => asset,
            Err(e) => {
                log::warn!("Download of {} failed: {}", download.url, e);
                return FetchOutcome::failure(FailureKind::DownloadFailed, e.to_string());
            }
        };
        if !asset.status.is_success() {
            let detail = describe_status(asset.status, &download.url);
            log::warn!("Download rejected: {}", detail);
            return FetchOutcome::failure(FailureKind::DownloadFailed, detail);
        }

        let content_type = asset
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string());
        log::info!(
            "Fetched post {} ({} bytes, {})",
            post.id,
            asset.bytes.len(),
            content_type
        );
        FetchOutcome::Success {
            bytes: asset.bytes,
            content_type,
        }
    }
}
