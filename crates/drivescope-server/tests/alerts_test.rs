mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use drivescope_core::{
    Alert, AlertResponse, AppError, CarListing, IngestOutcome, NewAlert, NewListing, Page,
    SearchQuery,
};
use drivescope_db::CarStore;
use drivescope_server::AppState;
use serde_json::{json, Value};

async fn create(server: &axum_test::TestServer, email: &str) -> AlertResponse {
    let response = server
        .post("/alerts")
        .json(&json!({
            "email": email,
            "filters": { "make": "Toyota", "max_price": 20000 }
        }))
        .await;
    response.assert_status_ok();
    response.json::<AlertResponse>()
}

#[tokio::test]
async fn create_then_list_by_email() {
    let server = common::server();
    let created = create(&server, "a@b.com").await;
    create(&server, "someone@else.com").await;

    assert!(created.active);
    assert!(created.id > 0);

    let response = server
        .get("/alerts")
        .add_query_param("email", "a@b.com")
        .await;
    response.assert_status_ok();

    let alerts = response.json::<Vec<Value>>();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["id"], created.id);
    assert_eq!(alerts[0]["email"], "a@b.com");
    assert!(alerts[0].get("filters").is_none());
}

#[tokio::test]
async fn list_without_email_returns_all() {
    let server = common::server();
    create(&server, "a@b.com").await;
    create(&server, "c@d.com").await;

    let alerts = server.get("/alerts").await.json::<Vec<AlertResponse>>();
    assert_eq!(alerts.len(), 2);
}

#[tokio::test]
async fn list_is_paginated() {
    let server = common::server();
    for _ in 0..3 {
        create(&server, "a@b.com").await;
    }

    let response = server
        .get("/alerts")
        .add_query_param("limit", 2)
        .add_query_param("offset", 2)
        .await;
    assert_eq!(response.json::<Vec<AlertResponse>>().len(), 1);

    let response = server.get("/alerts").add_query_param("limit", 500).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn huge_offset_returns_empty_list() {
    let server = common::server();
    create(&server, "a@b.com").await;

    let response = server
        .get("/alerts")
        .add_query_param("offset", i64::MAX)
        .await;
    response.assert_status_ok();
    assert!(response.json::<Vec<AlertResponse>>().is_empty());
}

#[tokio::test]
async fn inactive_flag_is_kept() {
    let server = common::server();
    let response = server
        .post("/alerts")
        .json(&json!({ "email": "a@b.com", "filters": {}, "active": false }))
        .await;
    assert!(!response.json::<AlertResponse>().active);
}

#[tokio::test]
async fn invalid_alert_is_rejected() {
    let server = common::server();
    let response = server
        .post("/alerts")
        .json(&json!({ "email": "nobody", "filters": {} }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "email");

    let response = server
        .post("/alerts")
        .json(&json!({ "email": "a@b.com", "filters": { "limit": 1000 } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "filters.limit");
}

#[tokio::test]
async fn delete_existing_then_missing() {
    let server = common::server();
    let created = create(&server, "a@b.com").await;

    let response = server.delete(&format!("/alerts/{}", created.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], format!("Alert {} deleted", created.id));

    let remaining = server
        .get("/alerts")
        .add_query_param("email", "a@b.com")
        .await
        .json::<Vec<AlertResponse>>();
    assert!(remaining.is_empty());

    let response = server.delete(&format!("/alerts/{}", created.id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["detail"], "Alert not found");
}

#[tokio::test]
async fn delete_non_integer_id_is_rejected() {
    let server = common::server();
    let response = server.delete("/alerts/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// Store whose every call fails with the given error.
struct FailingStore(fn() -> sqlx::Error);

#[async_trait]
impl CarStore for FailingStore {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<CarListing>, AppError> {
        Err(AppError::DatabaseError((self.0)()))
    }

    async fn ingest(&self, _listings: &[NewListing]) -> Result<IngestOutcome, AppError> {
        Err(AppError::DatabaseError((self.0)()))
    }

    async fn create_alert(&self, _alert: &NewAlert) -> Result<Option<Alert>, AppError> {
        Err(AppError::DatabaseError((self.0)()))
    }

    async fn list_alerts(
        &self,
        _email: Option<&str>,
        _page: Page,
    ) -> Result<Vec<Alert>, AppError> {
        Err(AppError::DatabaseError((self.0)()))
    }

    async fn delete_alert(&self, _id: i64) -> Result<bool, AppError> {
        Err(AppError::DatabaseError((self.0)()))
    }
}

#[tokio::test]
async fn unreachable_store_maps_to_503() {
    let server = common::server_with(AppState::new(FailingStore(|| sqlx::Error::PoolTimedOut)));

    let response = server.get("/alerts").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let response = server.delete("/alerts/1").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn other_store_failures_map_to_500_with_message() {
    let server = common::server_with(AppState::new(FailingStore(|| {
        sqlx::Error::Protocol("unexpected reply".to_string())
    })));

    let response = server.post("/search").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("unexpected reply"));
}

#[tokio::test]
async fn validation_happens_before_the_store() {
    let server = common::server_with(AppState::new(FailingStore(|| sqlx::Error::PoolTimedOut)));
    let response = server.post("/search").json(&json!({ "limit": 101 })).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
