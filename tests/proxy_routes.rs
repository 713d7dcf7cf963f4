//! End-to-end route tests: router -> rate limiter -> queue -> mock upstream.

mod helpers;

use std::time::Duration;

use axum::http::{header, StatusCode};
use helpers::{get, json, one_post, start_proxy, test_config};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_image(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sample.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(b"\xff\xd8\xff".to_vec()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_image_route_serves_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .and(query_param(
            "search[tags_match]",
            "copyright:genshin_impact character:furina_(genshin_impact) solo smile",
        ))
        .and(query_param("search[order]", "score_desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_post(&server.uri())))
        .expect(1)
        .mount(&server)
        .await;
    mount_image(&server).await;

    let proxy = start_proxy(&test_config(&server.uri()));
    let (status, headers, body) = get(
        &proxy.router,
        "/image.jpg?work_name=genshin_impact&character_name=furina_(genshin_impact)&select_mode=score&tags%5B%5D=solo,%20smile",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(&body[..], b"\xff\xd8\xff");
}

#[tokio::test]
async fn test_image_route_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let proxy = start_proxy(&test_config(&server.uri()));
    let (status, _, body) = get(&proxy.router, "/image.jpg?tags[]=nonexistent_tag").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["error"], "No matching image found");
}

#[tokio::test]
async fn test_image_route_upstream_failure_has_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let proxy = start_proxy(&test_config(&server.uri()));
    let (status, _, body) = get(&proxy.router, "/image.jpg").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert_eq!(body["error"], "Failed to fetch from Danbooru");
    assert!(body["details"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_image_route_rate_limited_after_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_post(&server.uri())))
        .expect(2)
        .mount(&server)
        .await;
    mount_image(&server).await;

    let config = booru_proxy::Config {
        rate_limit_max_calls: 2,
        ..test_config(&server.uri())
    };
    let proxy = start_proxy(&config);

    for _ in 0..2 {
        let (status, _, _) = get(&proxy.router, "/image.jpg").await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, headers, body) = get(&proxy.router, "/image.jpg").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json(&body)["error"], "Rate limit exceeded");
    let retry_after: u64 = headers[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 60);

    // Health and status are not rate limited
    let (status, _, _) = get(&proxy.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_image_route_queue_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = booru_proxy::Config {
        queue_timeout_seconds: 1,
        ..test_config(&server.uri())
    };
    let proxy = start_proxy(&config);
    let (status, _, body) = get(&proxy.router, "/image.jpg").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json(&body)["error"], "Request timed out waiting in queue");

    // The abandoned job still runs to completion
    tokio::time::sleep(Duration::from_millis(1500)).await;
    let snapshot = proxy.queue.snapshot();
    assert_eq!(snapshot.queue_length, 0);
    assert_eq!(snapshot.jobs_processed, 1);
}

#[tokio::test]
async fn test_image_route_unavailable_after_shutdown() {
    let server = MockServer::start().await;
    let proxy = start_proxy(&test_config(&server.uri()));

    proxy.shutdown.cancel();
    proxy.worker.await.expect("worker exits cleanly");

    let (status, _, body) = get(&proxy.router, "/image.jpg").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json(&body)["error"], "Image queue is unavailable");

    let (_, _, body) = get(&proxy.router, "/health").await;
    assert_eq!(json(&body)["worker_running"], false);
}

#[tokio::test]
async fn test_health_route() {
    let server = MockServer::start().await;
    let proxy = start_proxy(&test_config(&server.uri()));

    let (status, _, body) = get(&proxy.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["queue_length"], 0);
    assert_eq!(body["worker_running"], true);
}

#[tokio::test]
async fn test_status_route_reports_config_and_counters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let config = booru_proxy::Config {
        interval_seconds: 0.0,
        rate_limit_max_calls: 7,
        rate_limit_period_seconds: 30,
        ..test_config(&server.uri())
    };
    let proxy = start_proxy(&config);
    let (status, _, _) = get(&proxy.router, "/image.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = get(&proxy.router, "/status").await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["queue"]["queue_length"], 0);
    assert_eq!(body["queue"]["interval_seconds"], 0.0);
    assert_eq!(body["queue"]["worker_running"], true);
    assert_eq!(body["queue"]["jobs_processed"], 1);
    assert_eq!(body["rate_limit"]["max_calls"], 7);
    assert_eq!(body["rate_limit"]["period_seconds"], 30.0);
    assert_eq!(body["rate_limit"]["in_window"], 1);
    assert_eq!(body["requests"]["served"], 0);
    assert_eq!(body["requests"]["failed"], 1);
    assert_eq!(body["requests"]["failures"]["not_found"], 1);
    assert!(body["uptime_seconds"].as_f64().unwrap() >= 0.0);
}
