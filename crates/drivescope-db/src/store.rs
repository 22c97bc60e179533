//! Persistence port shared by the PostgreSQL and in-memory stores.

use async_trait::async_trait;
use drivescope_core::{
    Alert, AppError, CarListing, IngestOutcome, NewAlert, NewListing, Page, SearchQuery,
};

/// Car listing and alert persistence.
///
/// Each call is one round trip to the backing store. Failures are returned
/// as [`AppError`] carrying the store's message; implementations never retry.
///
/// # Examples
///
/// ```
/// use drivescope_core::{FilterSet, SearchQuery};
/// use drivescope_db::{CarStore, InMemoryCarStore};
///
/// # async fn example() -> Result<(), drivescope_core::AppError> {
/// let store = InMemoryCarStore::new();
/// let query = SearchQuery::from_filters(&FilterSet::default());
/// let listings = store.search(&query).await?;
/// assert!(listings.is_empty());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Runs a translated search, newest listings first, bounded by the
    /// query's row window.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CarListing>, AppError>;

    /// Inserts a batch in a single statement and returns the stored rows.
    async fn ingest(&self, listings: &[NewListing]) -> Result<IngestOutcome, AppError>;

    /// Persists an alert. `None` if the store reported no row created.
    async fn create_alert(&self, alert: &NewAlert) -> Result<Option<Alert>, AppError>;

    /// Lists alerts, newest first, optionally restricted to an exact email.
    async fn list_alerts(&self, email: Option<&str>, page: Page) -> Result<Vec<Alert>, AppError>;

    /// Deletes an alert. Returns true if a row was removed.
    async fn delete_alert(&self, id: i64) -> Result<bool, AppError>;
}
