//! DriveScope Server - HTTP API for car listing search and price alerts.
//!
//! Endpoints:
//!
//! - `GET /` - service metadata
//! - `GET /health` - liveness
//! - `POST /search` - filtered, paginated listing search
//! - `POST /ingest` - bulk listing insert
//! - `GET /alerts`, `POST /alerts`, `DELETE /alerts/{alert_id}` - price alerts

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

pub use config::{Command, Config};
pub use error::{ApiError, ErrorResponse};
pub use router::{build_router, cors_layer, AppState};
