#![allow(dead_code)]

use axum_test::TestServer;
use drivescope_db::InMemoryCarStore;
use drivescope_server::{build_router, cors_layer, AppState};
use serde_json::{json, Value};

pub fn server() -> TestServer {
    server_with(AppState::new(InMemoryCarStore::new()))
}

pub fn server_with(state: AppState) -> TestServer {
    TestServer::new(build_router(state, cors_layer(&[]))).unwrap()
}

pub fn listing(make: &str, model: &str, price: f64, score: f64) -> Value {
    json!({
        "make": make,
        "model": model,
        "year": 2019,
        "price": price,
        "mileage": 42000,
        "score": score,
        "location": "Austin, TX"
    })
}

pub async fn ingest(server: &TestServer, listings: Vec<Value>) -> Value {
    let response = server
        .post("/ingest")
        .json(&json!({ "listings": listings }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}
