//! GET / and GET /health.

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub message: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /`: service metadata and endpoint index.
pub async fn root_handler() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("/search", "Search car listings with filters"),
        ("/ingest", "Ingest new car listings"),
        ("/alerts", "Manage price alerts"),
        ("/health", "Liveness check"),
    ]);
    Json(ServiceInfo {
        name: "DriveScope API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Used car listing search and alert API",
        message: "Welcome to DriveScope API",
        endpoints,
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
