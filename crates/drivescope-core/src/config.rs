//! Configuration defaults shared by DriveScope components.

use std::time::Duration;

/// Page size used when a request does not specify `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Hard cap on `limit`; larger values are rejected, never clamped.
pub const MAX_LIMIT: i64 = 100;

/// Largest batch accepted by a single ingest call.
///
/// Nine bound parameters per row keeps one bulk insert well under
/// PostgreSQL's 65535 parameter limit.
pub const MAX_INGEST_BATCH: usize = 1000;

/// Inclusive bounds for a listing score.
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Maximum text lengths (in characters) accepted at the boundary.
pub const MAX_MAKE_LEN: usize = 100;
pub const MAX_MODEL_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 200;
pub const MAX_IMAGE_URL_LEN: usize = 2048;
pub const MAX_DESCRIPTION_LEN: usize = 10_000;
pub const MAX_EMAIL_LEN: usize = 254;

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}
