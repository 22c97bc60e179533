//! Axum router construction.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use drivescope_db::CarStore;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers::{
    create_alert_handler, delete_alert_handler, health_handler, ingest_handler,
    list_alerts_handler, root_handler, search_handler,
};

/// Shared application state: the store handle built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CarStore>,
}

impl AppState {
    pub fn new(store: impl CarStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// CORS policy. With no configured origins every origin is mirrored back
/// with credentials allowed; otherwise only the listed origins are.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::very_permissive().allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/search", post(search_handler))
        .route("/ingest", post(ingest_handler))
        .route(
            "/alerts",
            get(list_alerts_handler).post(create_alert_handler),
        )
        .route("/alerts/{alert_id}", delete(delete_alert_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
