pub mod alerts;
pub mod listings;
pub mod meta;

pub use alerts::{create_alert_handler, delete_alert_handler, list_alerts_handler};
pub use listings::{ingest_handler, search_handler};
pub use meta::{health_handler, root_handler};
