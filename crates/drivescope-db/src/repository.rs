//! Car listing and alert repository for PostgreSQL.
//!
//! Search statements are composed with [`QueryBuilder`] from a translated
//! [`SearchQuery`]; every user-supplied value is a bound parameter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drivescope_core::error::AppError;
use drivescope_core::query::{contains_pattern, LIKE_ESCAPE, ORDER_BY};
use drivescope_core::{
    Alert, CarListing, FilterSet, IngestOutcome, NewAlert, NewListing, Page, Predicate,
    SearchQuery, Value,
};
use sqlx::migrate::Migrator;
use sqlx::types::Json;
use sqlx::{PgPool, Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::store::CarStore;

/// Column list for listing SELECT/RETURNING clauses. Must remain a const
/// literal since it is spliced into SQL text.
const LISTING_COLUMNS: &str =
    "id, make, model, year, price, mileage, score, image_url, location, description, created_at";

const ALERT_COLUMNS: &str = "id, email, filters, active, created_at";

/// Embedded schema migrations for `car_listings` and `alerts`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies any pending migrations.
///
/// # Errors
///
/// Returns `AppError::MigrationError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Repository for car listings and alerts in PostgreSQL.
///
/// # Examples
///
/// ```no_run
/// use sqlx::postgres::PgPoolOptions;
/// use drivescope_db::PgCarRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = PgPoolOptions::new()
///     .max_connections(5)
///     .connect("postgresql://localhost/drivescope")
///     .await?;
///
/// let repo = PgCarRepository::new(pool);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PgCarRepository {
    pool: Pool<Postgres>,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Renders a translated search into a parameterised `SELECT`.
pub fn search_statement(query: &SearchQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM car_listings", LISTING_COLUMNS));

    for (i, predicate) in query.predicates().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            Predicate::Contains { column, needle } => {
                builder
                    .push(column.as_str())
                    .push(" ILIKE ")
                    .push_bind(contains_pattern(needle))
                    .push(format!(" ESCAPE '{}'", LIKE_ESCAPE));
            }
            Predicate::AtLeast { column, value } => {
                builder.push(column.as_str()).push(" >= ");
                push_value(&mut builder, *value);
            }
            Predicate::AtMost { column, value } => {
                builder.push(column.as_str()).push(" <= ");
                push_value(&mut builder, *value);
            }
        }
    }

    builder
        .push(format!(" ORDER BY {} LIMIT ", ORDER_BY))
        .push_bind(query.limit())
        .push(" OFFSET ")
        .push_bind(query.offset());

    builder
}

fn push_value(builder: &mut QueryBuilder<'static, Postgres>, value: Value) {
    match value {
        Value::Int(v) => builder.push_bind(v),
        Value::Float(v) => builder.push_bind(v),
    };
}

/// Renders a multi-row `INSERT … RETURNING` for a non-empty batch.
pub fn ingest_statement(listings: &[NewListing]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO car_listings \
         (make, model, year, price, mileage, score, image_url, location, description) ",
    );
    builder.push_values(listings, |mut row, listing| {
        row.push_bind(listing.make.clone())
            .push_bind(listing.model.clone())
            .push_bind(listing.year)
            .push_bind(listing.price)
            .push_bind(listing.mileage)
            .push_bind(listing.score)
            .push_bind(listing.image_url.clone())
            .push_bind(listing.location.clone())
            .push_bind(listing.description.clone());
    });
    builder.push(format!(" RETURNING {}", LISTING_COLUMNS));
    builder
}

#[async_trait]
impl CarStore for PgCarRepository {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CarListing>, AppError> {
        let mut statement = search_statement(query);
        let listings = statement
            .build_query_as::<CarListing>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        debug!(
            predicates = query.predicates().len(),
            rows = listings.len(),
            "search executed"
        );
        Ok(listings)
    }

    /// An empty batch returns immediately without touching the database.
    async fn ingest(&self, listings: &[NewListing]) -> Result<IngestOutcome, AppError> {
        if listings.is_empty() {
            return Ok(IngestOutcome::new(Vec::new()));
        }

        let mut statement = ingest_statement(listings);
        let inserted = statement
            .build_query_as::<CarListing>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        debug!(batch = listings.len(), inserted = inserted.len(), "ingest executed");
        Ok(IngestOutcome::new(inserted))
    }

    async fn create_alert(&self, alert: &NewAlert) -> Result<Option<Alert>, AppError> {
        let query = format!(
            "INSERT INTO alerts (email, filters, active) VALUES ($1, $2, $3) RETURNING {}",
            ALERT_COLUMNS
        );
        let row = sqlx::query_as::<_, AlertRow>(&query)
            .bind(&alert.email)
            .bind(Json(&alert.filters))
            .bind(alert.active)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(row.map(Alert::from))
    }

    async fn list_alerts(&self, email: Option<&str>, page: Page) -> Result<Vec<Alert>, AppError> {
        let query = format!(
            "SELECT {} FROM alerts WHERE ($1::text IS NULL OR email = $1) \
             ORDER BY {} LIMIT $2 OFFSET $3",
            ALERT_COLUMNS, ORDER_BY
        );
        let rows = sqlx::query_as::<_, AlertRow>(&query)
            .bind(email)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(rows.into_iter().map(Alert::from).collect())
    }

    async fn delete_alert(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Helper struct for deserializing alert rows with their JSONB filters
#[derive(sqlx::FromRow)]
struct AlertRow {
    id: i64,
    email: String,
    filters: Json<FilterSet>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<AlertRow> for Alert {
    fn from(row: AlertRow) -> Self {
        Alert {
            id: row.id,
            email: row.email,
            filters: row.filters.0,
            active: row.active,
            created_at: row.created_at,
        }
    }
}
