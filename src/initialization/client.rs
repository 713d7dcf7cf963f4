//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the shared upstream HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - Connect timeout from the config (per-request timeouts are set on each call)
/// - Rustls TLS backend (no native TLS)
///
/// Identifying headers are not set here; every upstream call carries them
/// through `UpstreamHeaders`.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(config.timeout_seconds))
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_defaults() {
        let client = init_client(&Config::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_init_client_sends_no_user_agent_of_its_own() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let config = Config {
            user_agent: "configured-agent/9.9".to_string(),
            ..Config::default()
        };
        let client = init_client(&config).expect("client should build");
        client
            .get(format!("{}/plain", server.uri()))
            .send()
            .await
            .expect("mock server answers");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);
        let agent = requests[0]
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok());
        assert_ne!(agent, Some("configured-agent/9.9"));
    }
}
