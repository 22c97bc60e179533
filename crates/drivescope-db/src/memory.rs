//! In-memory implementation of [`CarStore`].
//!
//! Evaluates translated queries directly against stored rows. Used by the
//! HTTP tests and by `drivescope serve --in-memory` for local demos.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use drivescope_core::{
    Alert, AppError, CarListing, IngestOutcome, NewAlert, NewListing, Page, SearchQuery,
};
use tokio::sync::RwLock;

use crate::store::CarStore;

#[derive(Debug, Default)]
struct State {
    listings: Vec<CarListing>,
    alerts: BTreeMap<i64, Alert>,
    next_listing_id: i64,
    next_alert_id: i64,
}

/// Thread-safe in-memory car store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCarStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryCarStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored listings.
    pub async fn listing_count(&self) -> usize {
        self.state.read().await.listings.len()
    }
}

fn paginate<T>(mut rows: Vec<T>, page: Page) -> Vec<T> {
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    if start >= rows.len() {
        return Vec::new();
    }
    rows.drain(start..).take(limit).collect()
}

#[async_trait]
impl CarStore for InMemoryCarStore {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CarListing>, AppError> {
        let state = self.state.read().await;
        let mut matching: Vec<CarListing> = state
            .listings
            .iter()
            .filter(|listing| query.matches(listing))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(paginate(matching, query.page()))
    }

    async fn ingest(&self, listings: &[NewListing]) -> Result<IngestOutcome, AppError> {
        let mut state = self.state.write().await;
        // One timestamp per batch, like a single INSERT statement.
        let created_at = Utc::now();
        let mut inserted = Vec::with_capacity(listings.len());

        for listing in listings {
            state.next_listing_id += 1;
            let row = CarListing {
                id: state.next_listing_id,
                make: listing.make.clone(),
                model: listing.model.clone(),
                year: listing.year,
                price: listing.price,
                mileage: listing.mileage,
                score: listing.score,
                image_url: listing.image_url.clone(),
                location: listing.location.clone(),
                description: listing.description.clone(),
                created_at,
            };
            state.listings.push(row.clone());
            inserted.push(row);
        }

        Ok(IngestOutcome::new(inserted))
    }

    async fn create_alert(&self, alert: &NewAlert) -> Result<Option<Alert>, AppError> {
        let mut state = self.state.write().await;
        state.next_alert_id += 1;
        let stored = Alert {
            id: state.next_alert_id,
            email: alert.email.clone(),
            filters: alert.filters.clone(),
            active: alert.active,
            created_at: Utc::now(),
        };
        state.alerts.insert(stored.id, stored.clone());
        Ok(Some(stored))
    }

    async fn list_alerts(&self, email: Option<&str>, page: Page) -> Result<Vec<Alert>, AppError> {
        let state = self.state.read().await;
        // Ids are assigned in creation order, so reverse id order is newest first.
        let alerts: Vec<Alert> = state
            .alerts
            .values()
            .rev()
            .filter(|alert| email.is_none_or(|e| alert.email == e))
            .cloned()
            .collect();
        Ok(paginate(alerts, page))
    }

    async fn delete_alert(&self, id: i64) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        Ok(state.alerts.remove(&id).is_some())
    }
}
