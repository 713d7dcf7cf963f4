// Shared test helpers: proxy wiring over a wiremock upstream.

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use booru_proxy::dispatch::RequestQueue;
use booru_proxy::initialization::{init_rate_limiter, init_request_queue};
use booru_proxy::server::{router, AppState};
use booru_proxy::{Config, LogLevel};

/// Config pointed at `upstream` with no idle interval between jobs.
pub fn test_config(upstream: &str) -> Config {
    Config {
        upstream_url: upstream.to_string(),
        interval_seconds: 0.0,
        queue_timeout_seconds: 5,
        timeout_seconds: 5,
        log_level: LogLevel::Error,
        ..Config::default()
    }
}

/// A running proxy: router plus the handles needed to inspect or stop it.
#[allow(dead_code)] // Not every test file uses every field
pub struct TestProxy {
    pub router: Router,
    pub queue: RequestQueue,
    pub shutdown: CancellationToken,
    pub worker: JoinHandle<()>,
}

pub fn start_proxy(config: &Config) -> TestProxy {
    let shutdown = CancellationToken::new();
    let (queue, worker) =
        init_request_queue(config, shutdown.clone()).expect("client should build");
    let state = AppState::new(init_rate_limiter(config), queue.clone());
    TestProxy {
        router: router(state),
        queue,
        shutdown,
        worker,
    }
}

/// Upstream search body with one post offering a sample and an original.
#[allow(dead_code)]
pub fn one_post(base: &str) -> serde_json::Value {
    serde_json::json!([{
        "id": 4242,
        "media_asset": {
            "variants": [
                {"type": "180x180", "url": format!("{}/preview.jpg", base), "width": 180, "height": 120},
                {"type": "sample", "url": format!("{}/sample.jpg", base), "width": 850, "height": 567},
                {"type": "original", "url": format!("{}/original.png", base), "width": 3000, "height": 2000}
            ]
        }
    }])
}

/// Sends a GET through the router and collects the response.
#[allow(dead_code)]
pub async fn get(router: &Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (status, headers, body)
}

#[allow(dead_code)]
pub fn json(body: &Bytes) -> serde_json::Value {
    serde_json::from_slice(body).expect("body should be JSON")
}
