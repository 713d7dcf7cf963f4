//! Upstream request headers.
//!
//! Every call to the image board carries the same identifying headers. They
//! are built once from the configuration and shared by the fetch pipeline.

use super::constants::{DEFAULT_REFERER, DEFAULT_USER_AGENT};

/// Fixed headers attached to upstream search and download calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamHeaders {
    pub user_agent: String,
    pub referer: String,
}

impl UpstreamHeaders {
    pub fn new(user_agent: impl Into<String>, referer: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            referer: referer.into(),
        }
    }

    /// Applies the headers to a `reqwest::RequestBuilder`.
    pub fn apply_to_request_builder(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::REFERER, self.referer.as_str())
    }
}

impl Default for UpstreamHeaders {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT, DEFAULT_REFERER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_identify_proxy() {
        let headers = UpstreamHeaders::default();
        assert_eq!(headers.user_agent, "fast-danbooru-proxy/1.0");
        assert_eq!(headers.referer, "https://danbooru.donmai.us/");
    }

    #[test]
    fn test_apply_to_request_builder_sets_both_headers() {
        let headers = UpstreamHeaders::new("agent/2.0", "https://example.test/");
        let request = headers
            .apply_to_request_builder(reqwest::Client::new().get("https://example.test/posts.json"))
            .build()
            .expect("request should build");
        assert_eq!(request.headers()[reqwest::header::USER_AGENT], "agent/2.0");
        assert_eq!(
            request.headers()[reqwest::header::REFERER],
            "https://example.test/"
        );
    }
}
