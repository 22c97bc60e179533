use thiserror::Error;

use crate::validation::ValidationError;

/// Application-wide error types.
///
/// Store failures are carried through unchanged with the store's message;
/// nothing in DriveScope retries them. The helper predicates below let the
/// HTTP layer pick a status code without parsing messages.
///
/// # Error Conversion
///
/// - `sqlx::Error` → `AppError::DatabaseError`
/// - `sqlx::migrate::MigrateError` → `AppError::MigrationError`
/// - [`ValidationError`] → `AppError::Validation`
///
/// # Examples
///
/// ```
/// use drivescope_core::error::AppError;
///
/// let err = AppError::AlertNotFound(42);
/// assert_eq!(err.to_string(), "Alert not found: 42");
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed.
    ///
    /// Wraps every error from SQLx: connection failures, query errors and
    /// constraint violations alike.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Applying embedded migrations failed.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Request input failed a boundary rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No alert with the given id exists.
    #[error("Alert not found: {0}")]
    AlertNotFound(i64),

    /// Generic application error for cases not covered by specific variants.
    #[error("Error: {0}")]
    Generic(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for API clients and logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DatabaseError(e) if self.is_unavailable() => {
                format!("Database unavailable: {}", e)
            }
            AppError::DatabaseError(sqlx::Error::Database(db)) => db.message().to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::AlertNotFound(_) => "Alert not found".to_string(),
            _ => self.to_string(),
        }
    }

    /// Returns true if the store could not be reached at all (pool exhausted
    /// or closed, socket or TLS failure).
    ///
    /// # Examples
    ///
    /// ```
    /// use drivescope_core::error::AppError;
    ///
    /// assert!(AppError::DatabaseError(sqlx::Error::PoolTimedOut).is_unavailable());
    /// assert!(!AppError::Generic("boom".to_string()).is_unavailable());
    /// ```
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::WorkerCrashed
            )
        )
    }

    /// Returns true if the store rejected the statement with an integrity
    /// constraint violation (SQLSTATE class `23`).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            AppError::DatabaseError(sqlx::Error::Database(db)) => db
                .code()
                .map(|code| code.starts_with("23"))
                .unwrap_or(false),
            _ => false,
        }
    }
}
