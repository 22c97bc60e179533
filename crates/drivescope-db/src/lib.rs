//! DriveScope DB - Persistence for car listings and price alerts.
//!
//! - [`store`] - the [`CarStore`] trait every backend implements
//! - [`repository`] - PostgreSQL backend with embedded migrations
//! - [`memory`] - in-memory backend for tests and local runs

pub mod memory;
pub mod repository;
pub mod store;

pub use memory::InMemoryCarStore;
pub use repository::{run_migrations, PgCarRepository, MIGRATOR};
pub use store::CarStore;
