//! Mapping of application errors onto HTTP responses.
//!
//! | Outcome                           | Status |
//! |-----------------------------------|--------|
//! | validation failure                | 422    |
//! | unreadable body / query / path    | extractor's status (400, 415, 422) |
//! | alert not found                   | 404    |
//! | store constraint violation        | 409    |
//! | store unreachable                 | 503    |
//! | any other failure                 | 500    |
//!
//! Every error body is `{"detail": "..."}`; validation errors also carry
//! `"field"`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use drivescope_core::{AppError, ValidationError};
use serde::Serialize;
use tracing::error;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Rejected(StatusCode, String),
    NotFound(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected(status, _) => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(e) => ApiError::Validation(e),
            AppError::AlertNotFound(_) => ApiError::NotFound(err.user_message()),
            _ if err.is_unavailable() => {
                error!("store unavailable: {}", err);
                ApiError::Unavailable(err.user_message())
            }
            _ if err.is_constraint_violation() => {
                error!("store rejected statement: {}", err);
                ApiError::Conflict(err.user_message())
            }
            _ => {
                error!("request failed: {}", err);
                ApiError::Internal(err.user_message())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(e) => ErrorResponse {
                detail: e.to_string(),
                field: Some(e.field),
            },
            ApiError::Rejected(_, detail)
            | ApiError::NotFound(detail)
            | ApiError::Conflict(detail)
            | ApiError::Unavailable(detail)
            | ApiError::Internal(detail) => ErrorResponse {
                detail,
                field: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
