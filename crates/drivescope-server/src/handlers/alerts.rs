//! GET/POST /alerts and DELETE /alerts/{alert_id}.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use drivescope_core::{AlertConfig, AlertResponse, AppError, Page};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::router::AppState;

/// Query parameters for `GET /alerts`.
#[derive(Debug, Default, Deserialize)]
pub struct AlertQuery {
    /// Exact email to filter by.
    pub email: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for `DELETE /alerts/{alert_id}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

/// Lists alerts, optionally for one email.
pub async fn list_alerts_handler(
    State(state): State<AppState>,
    params: Result<Query<AlertQuery>, QueryRejection>,
) -> Result<Json<Vec<AlertResponse>>, ApiError> {
    let Query(params) = params?;
    let page = Page::new(params.limit, params.offset)?;
    let alerts = state
        .store
        .list_alerts(params.email.as_deref(), page)
        .await?;
    Ok(Json(alerts.into_iter().map(AlertResponse::from).collect()))
}

/// Creates a price alert.
pub async fn create_alert_handler(
    State(state): State<AppState>,
    payload: Result<Json<AlertConfig>, JsonRejection>,
) -> Result<Json<AlertResponse>, ApiError> {
    let Json(config) = payload?;
    let alert = config.validate()?;
    let created = state
        .store
        .create_alert(&alert)
        .await?
        .ok_or_else(|| AppError::Generic("alert was not created".to_string()))?;

    info!("Created alert {}", created.id);
    Ok(Json(AlertResponse::from(created)))
}

/// `DELETE /alerts/{alert_id}`
///
/// # Errors
///
/// Returns `404` if no alert has this id.
pub async fn delete_alert_handler(
    State(state): State<AppState>,
    alert_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Path(alert_id) = alert_id?;
    if !state.store.delete_alert(alert_id).await? {
        return Err(AppError::AlertNotFound(alert_id).into());
    }

    info!("Deleted alert {}", alert_id);
    Ok(Json(StatusResponse {
        status: "success",
        message: format!("Alert {} deleted", alert_id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_serialises() {
        let r = StatusResponse {
            status: "success",
            message: "Alert 3 deleted".to_string(),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("Alert 3 deleted"));
    }
}
