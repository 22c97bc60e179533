mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_returns_200() {
    let server = common::server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn root_lists_endpoints() {
    let server = common::server();
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["name"], "DriveScope API");
    assert_eq!(body["description"], "Used car listing search and alert API");
    assert!(body["version"].is_string());
    for endpoint in ["/search", "/ingest", "/alerts"] {
        assert!(body["endpoints"].get(endpoint).is_some(), "missing {endpoint}");
    }
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = common::server();
    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
