//! DriveScope Core - Domain types, validation, query translation and errors.

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod validation;

pub use config::DbConfig;
pub use error::AppError;
pub use models::{
    Alert, AlertConfig, AlertResponse, CarListing, Criteria, FilterSet, IngestOutcome,
    IngestRequest, NewAlert, NewListing, Page, SearchFilters,
};
pub use query::{Column, Predicate, SearchQuery, Value};
pub use validation::ValidationError;
