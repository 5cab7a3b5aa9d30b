// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /digest/today (empty before any cycle)
// - GET /run-digest  (feeds-only cycle, dedup by canonical URL)
// - failing feeds are skipped, not surfaced as 500

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use ai_curator::api::{self, AppState};
use ai_curator::config::AppConfig;
use ai_curator::ingest::types::item_id;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

const FEED_A: &str = include_str!("fixtures/digest_feed_a.xml");
const FEED_B: &str = include_str!("fixtures/digest_feed_b.xml");

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let state = AppState::from_config(AppConfig::default());
    let app = api::router(state);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_digest_today_is_empty_before_first_cycle() {
    let state = AppState::from_config(AppConfig::default());
    let app = api::router(state);

    let (status, v) = get_json(app, "/digest/today").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, serde_json::json!([]));
}

#[tokio::test]
async fn api_run_digest_dedupes_feed_items_by_canonical_url() {
    let mut server = mockito::Server::new_async().await;
    let feed_a = server
        .mock("GET", "/feed-a.xml")
        .with_status(200)
        .with_header("content-type", "application/rss+xml")
        .with_body(FEED_A)
        .create_async()
        .await;
    let feed_b = server
        .mock("GET", "/feed-b.xml")
        .with_status(200)
        .with_header("content-type", "application/rss+xml")
        .with_body(FEED_B)
        .create_async()
        .await;

    // Search-API key unset: only the two feeds contribute.
    let config = AppConfig {
        search_api_key: None,
        feeds: vec![
            format!("{}/feed-a.xml", server.url()),
            format!("{}/feed-b.xml", server.url()),
        ],
        ..AppConfig::default()
    };
    let state = AppState::from_config(config);
    let app = api::router(state);

    // 3 AI-matching entries across the feeds, one duplicate canonical URL.
    let (status, v) = get_json(app.clone(), "/run-digest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, serde_json::json!({ "count": 2 }));

    let (status, v) = get_json(app, "/digest/today").await;
    assert_eq!(status, StatusCode::OK);
    let items = v.as_array().expect("digest is an array");
    assert_eq!(items.len(), 2);

    // First occurrence wins: the feed-A item keeps its raw-URL id.
    assert_eq!(
        items[0]["id"],
        Json::from(item_id("https://news.example/ai-breakthrough?utm_source=rss"))
    );
    assert_eq!(items[0]["title"], "AI breakthrough announced");
    assert_eq!(items[0]["source"], "feed");
    assert_eq!(items[1]["url"], "https://news.example/openai-model");
    assert_eq!(
        items[1]["published_at"],
        "Mon, 24 Aug 2026 10:00:00 GMT"
    );

    feed_a.assert_async().await;
    feed_b.assert_async().await;
}

#[tokio::test]
async fn api_run_digest_skips_failing_feed_instead_of_500() {
    let mut server = mockito::Server::new_async().await;
    let broken = server
        .mock("GET", "/broken.xml")
        .with_status(500)
        .create_async()
        .await;
    let good = server
        .mock("GET", "/feed-a.xml")
        .with_status(200)
        .with_body(FEED_A)
        .create_async()
        .await;

    let config = AppConfig {
        search_api_key: None,
        feeds: vec![
            format!("{}/broken.xml", server.url()),
            format!("{}/feed-a.xml", server.url()),
        ],
        ..AppConfig::default()
    };
    let state = AppState::from_config(config);
    let app = api::router(state);

    let (status, v) = get_json(app, "/run-digest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, serde_json::json!({ "count": 1 }));

    broken.assert_async().await;
    good.assert_async().await;
}
