//! Listing, filter and alert types.
//!
//! Request types (`NewListing`, `SearchFilters`, `AlertConfig`) mirror the JSON
//! accepted at the HTTP boundary and are checked with `validate`, which yields
//! the typed value the query translator and the stores work with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::config::{
    DEFAULT_LIMIT, MAX_DESCRIPTION_LEN, MAX_EMAIL_LEN, MAX_IMAGE_URL_LEN, MAX_INGEST_BATCH,
    MAX_LIMIT, MAX_LOCATION_LEN, MAX_MAKE_LEN, MAX_MODEL_LEN, MAX_SCORE, MIN_SCORE,
};
use crate::validation::{
    check_email, check_finite, check_len, check_min, check_not_blank, check_optional_len,
    check_range, ValidationError,
};

/// A persisted row of the `car_listings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CarListing {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i64,
    pub score: f64,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A listing as submitted for ingest.
///
/// `id` and `created_at` are assigned by the store; if a client sends them
/// they are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i64,
    pub score: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewListing {
    /// Checks score, numeric and text bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_blank("make", &self.make)?;
        check_len("make", &self.make, MAX_MAKE_LEN)?;
        check_not_blank("model", &self.model)?;
        check_len("model", &self.model, MAX_MODEL_LEN)?;
        check_finite("price", self.price)?;
        check_min("price", self.price, 0.0)?;
        check_min("mileage", self.mileage, 0)?;
        check_finite("score", self.score)?;
        check_range("score", self.score, MIN_SCORE, MAX_SCORE)?;
        check_optional_len("image_url", self.image_url.as_deref(), MAX_IMAGE_URL_LEN)?;
        check_optional_len("location", self.location.as_deref(), MAX_LOCATION_LEN)?;
        check_optional_len("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        Ok(())
    }
}

/// Body of `POST /ingest`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    pub listings: Vec<NewListing>,
}

impl IngestRequest {
    /// Validates every listing and the batch size.
    ///
    /// A single invalid listing rejects the whole batch; the error field is
    /// prefixed with its position, e.g. `listings[3].score`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an oversized batch or the first
    /// invalid listing.
    pub fn validate(self) -> Result<Vec<NewListing>, ValidationError> {
        if self.listings.len() > MAX_INGEST_BATCH {
            return Err(ValidationError::new(
                "listings",
                format!(
                    "batch of {} exceeds the maximum of {}",
                    self.listings.len(),
                    MAX_INGEST_BATCH
                ),
            ));
        }
        for (i, listing) in self.listings.iter().enumerate() {
            listing
                .validate()
                .map_err(|e| e.within(&format!("listings[{}]", i)))?;
        }
        Ok(self.listings)
    }
}

/// Result of a bulk insert.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub inserted: usize,
    /// Inserted rows with their store-assigned `id` and `created_at`.
    pub listings: Vec<CarListing>,
}

impl IngestOutcome {
    pub fn new(listings: Vec<CarListing>) -> Self {
        Self {
            inserted: listings.len(),
            listings,
        }
    }
}

/// Optional search criteria.
///
/// `None` means "not searched on this dimension"; a present value always
/// constrains the search, even when it is zero or an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Criteria {
    fn validate(&self) -> Result<(), ValidationError> {
        check_optional_len("make", self.make.as_deref(), MAX_MAKE_LEN)?;
        check_optional_len("model", self.model.as_deref(), MAX_MODEL_LEN)?;
        check_optional_len("location", self.location.as_deref(), MAX_LOCATION_LEN)?;
        for (field, value) in [
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("min_score", self.min_score),
        ] {
            if let Some(v) = value {
                check_finite(field, v)?;
            }
        }
        Ok(())
    }
}

/// A validated row window: `limit` rows starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Applies the defaults (50 / 0) and checks `1 <= limit <= 100` and
    /// `offset >= 0`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming `limit` or `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivescope_core::Page;
    ///
    /// let page = Page::new(None, Some(50)).unwrap();
    /// assert_eq!((page.limit(), page.offset()), (50, 50));
    /// assert!(Page::new(Some(101), None).is_err());
    /// ```
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, ValidationError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(0);
        check_range("limit", limit, 1, MAX_LIMIT)?;
        check_min("offset", offset, 0)?;
        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Inclusive row window `[offset, offset + limit - 1]`, saturating at
    /// `i64::MAX`.
    pub fn window(&self) -> (i64, i64) {
        (self.offset, self.offset.saturating_add(self.limit - 1))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Body of `POST /search`, also embedded in [`AlertConfig`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchFilters {
    #[serde(flatten)]
    pub criteria: Criteria,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl SearchFilters {
    /// Checks criteria and pagination, producing a [`FilterSet`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an over-long text filter, a
    /// non-finite number, `limit` outside `1..=100` or a negative `offset`.
    pub fn validate(self) -> Result<FilterSet, ValidationError> {
        self.criteria.validate()?;
        let page = Page::new(self.limit, self.offset)?;
        Ok(FilterSet {
            criteria: self.criteria,
            page,
        })
    }
}

/// A validated filter set, ready for translation.
///
/// This is also the shape persisted inside an alert's `filters` column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(flatten)]
    pub criteria: Criteria,
    #[serde(flatten)]
    pub page: Page,
}

/// Body of `POST /alerts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    pub email: String,
    pub filters: SearchFilters,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl AlertConfig {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a malformed email or invalid filters
    /// (filter errors are prefixed with `filters.`).
    pub fn validate(self) -> Result<NewAlert, ValidationError> {
        check_email("email", &self.email, MAX_EMAIL_LEN)?;
        let filters = self.filters.validate().map_err(|e| e.within("filters"))?;
        Ok(NewAlert {
            email: self.email,
            filters,
            active: self.active,
        })
    }
}

/// A validated alert waiting to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub email: String,
    pub filters: FilterSet,
    pub active: bool,
}

/// A persisted alert with its embedded filter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: i64,
    pub email: String,
    pub filters: FilterSet,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Client-facing view of an alert, without its filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResponse {
    pub id: i64,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Alert> for AlertResponse {
    fn from(alert: Alert) -> Self {
        Self {
            id: alert.id,
            email: alert.email,
            active: alert.active,
            created_at: alert.created_at,
        }
    }
}
