mod common;

use axum::http::StatusCode;
use common::listing;
use drivescope_core::CarListing;
use serde_json::{json, Value};

async fn search(server: &axum_test::TestServer, filters: Value) -> Vec<CarListing> {
    let response = server.post("/search").json(&filters).await;
    response.assert_status_ok();
    response.json::<Vec<CarListing>>()
}

#[tokio::test]
async fn empty_filters_return_newest_first() {
    let server = common::server();
    common::ingest(&server, vec![listing("Old", "A", 1.0, 5.0)]).await;
    common::ingest(&server, vec![listing("New", "B", 1.0, 5.0)]).await;

    let results = search(&server, json!({})).await;
    let makes: Vec<&str> = results.iter().map(|l| l.make.as_str()).collect();
    assert_eq!(makes, vec!["New", "Old"]);
}

#[tokio::test]
async fn single_bound_is_respected() {
    let server = common::server();
    common::ingest(
        &server,
        vec![
            listing("Ford", "Fiesta", 8_000.0, 5.0),
            listing("Ford", "Mustang", 32_000.0, 9.0),
            listing("BMW", "320i", 10_000.0, 7.0),
        ],
    )
    .await;

    let results = search(&server, json!({ "min_price": 10000 })).await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|l| l.price >= 10_000.0));
}

#[tokio::test]
async fn substring_filters_are_case_insensitive() {
    let server = common::server();
    common::ingest(
        &server,
        vec![
            listing("Toyota", "Corolla", 1.0, 5.0),
            listing("Honda", "Civic", 1.0, 5.0),
        ],
    )
    .await;

    let results = search(&server, json!({ "make": "toy" })).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].make, "Toyota");

    let results = search(&server, json!({ "model": "CIV", "location": "austin" })).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].model, "Civic");
}

#[tokio::test]
async fn zero_mileage_bound_is_applied() {
    let server = common::server();
    common::ingest(&server, vec![listing("Ford", "Focus", 1.0, 5.0)]).await;

    let results = search(&server, json!({ "max_mileage": 0 })).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn pages_are_disjoint_and_contiguous() {
    let server = common::server();
    let batch: Vec<Value> = (0..120)
        .map(|i| listing("Ford", &format!("M{i}"), 1_000.0, 5.0))
        .collect();
    common::ingest(&server, batch).await;

    let first = search(&server, json!({ "limit": 50, "offset": 0 })).await;
    let second = search(&server, json!({ "limit": 50, "offset": 50 })).await;

    assert_eq!(first.len(), 50);
    assert_eq!(second.len(), 50);
    assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
    assert_eq!(first.last().unwrap().id, second.first().unwrap().id + 1);
    assert!(first.last().unwrap().created_at >= second.first().unwrap().created_at);
}

#[tokio::test]
async fn default_page_size_is_fifty() {
    let server = common::server();
    let batch: Vec<Value> = (0..60)
        .map(|i| listing("Ford", &format!("M{i}"), 1_000.0, 5.0))
        .collect();
    common::ingest(&server, batch).await;

    assert_eq!(search(&server, json!({})).await.len(), 50);
}

#[tokio::test]
async fn limit_over_cap_is_rejected() {
    let server = common::server();
    let response = server.post("/search").json(&json!({ "limit": 101 })).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "limit");
}

#[tokio::test]
async fn huge_offset_returns_empty_page() {
    let server = common::server();
    common::ingest(&server, vec![listing("Ford", "Focus", 1.0, 5.0)]).await;

    let results = search(&server, json!({ "limit": 50, "offset": i64::MAX })).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn negative_offset_is_rejected() {
    let server = common::server();
    let response = server.post("/search").json(&json!({ "offset": -1 })).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "offset");
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let server = common::server();
    let response = server
        .post("/search")
        .json(&json!({ "min_year": "recent" }))
        .await;
    assert!(response.status_code().is_client_error());
    assert!(response.json::<Value>()["detail"].is_string());
}
