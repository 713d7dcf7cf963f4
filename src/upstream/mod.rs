//! Upstream image board access.
//!
//! The fetch pipeline only sees the `UpstreamClient` trait, which makes two
//! calls: a post search returning JSON and an asset download returning bytes.
//! `HttpUpstreamClient` is the production implementation; tests substitute
//! in-memory clients.

mod http;
mod models;
mod types;

use async_trait::async_trait;

use crate::error_handling::TransportError;

pub use http::HttpUpstreamClient;
pub use models::{parse_posts, MediaAssetDto, PostDto, VariantDto};
pub use types::{
    DownloadRequest, DownloadResponse, SearchRequest, SearchResponse,
};

/// The two outbound calls the fetch pipeline makes.
///
/// Implementations return any HTTP response, including non-2xx, as `Ok`.
/// `Err` is reserved for transport failures (timeouts, refused connections,
/// truncated bodies).
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, TransportError>;

    async fn download(&self, request: &DownloadRequest)
        -> Result<DownloadResponse, TransportError>;
}
