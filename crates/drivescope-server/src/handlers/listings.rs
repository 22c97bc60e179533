//! POST /search and POST /ingest.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use drivescope_core::{CarListing, IngestRequest, SearchFilters, SearchQuery};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::router::AppState;

/// Response body for `POST /ingest`.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub message: String,
    /// Persisted listings with store-assigned `id` and `created_at`.
    pub data: Vec<CarListing>,
}

/// `POST /search`: filter listings, newest first.
///
/// # Errors
///
/// `422` for invalid filters or pagination; store failures per
/// [`ApiError`].
pub async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchFilters>, JsonRejection>,
) -> Result<Json<Vec<CarListing>>, ApiError> {
    let Json(filters) = payload?;
    let filters = filters.validate()?;
    let query = SearchQuery::from_filters(&filters);
    let listings = state.store.search(&query).await?;
    Ok(Json(listings))
}

/// `POST /ingest`: bulk insert listings.
///
/// # Errors
///
/// `422` if any listing fails validation (nothing is inserted); store
/// failures per [`ApiError`].
pub async fn ingest_handler(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let Json(request) = payload?;
    let listings = request.validate()?;
    let outcome = state.store.ingest(&listings).await?;

    info!("Ingested {} listings", outcome.inserted);

    Ok(Json(IngestResponse {
        status: "success",
        message: format!("Successfully ingested {} listings", outcome.inserted),
        data: outcome.listings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_response_serialises() {
        let r = IngestResponse {
            status: "success",
            message: "Successfully ingested 0 listings".to_string(),
            data: Vec::new(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
