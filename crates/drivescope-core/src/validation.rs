//! Boundary validation helpers.
//!
//! Every request type is checked here before it is turned into a query or a
//! statement. Nothing is clamped or corrected: the first rule that fails
//! rejects the whole request with a [`ValidationError`] naming the field.

use std::fmt::Display;

use thiserror::Error;

/// A request field failed a type or bounds rule.
///
/// # Examples
///
/// ```
/// use drivescope_core::ValidationError;
///
/// let err = ValidationError::new("score", "10.1 is out of range [0, 10]");
/// assert_eq!(err.to_string(), "score: 10.1 is out of range [0, 10]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `score` or `listings[2].score`.
    pub field: String,
    /// What is wrong with the value.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Prefixes the field path, used when validating nested collections.
    pub fn within(self, parent: &str) -> Self {
        Self {
            field: format!("{}.{}", parent, self.field),
            message: self.message,
        }
    }
}

pub(crate) fn check_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("{} is out of range [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}

pub(crate) fn check_min<T>(field: &str, value: T, min: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Display + Copy,
{
    if value < min {
        return Err(ValidationError::new(
            field,
            format!("{} must be at least {}", value, min),
        ));
    }
    Ok(())
}

/// NaN and infinities can never be range-compared by the store.
pub(crate) fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "must be a finite number"));
    }
    Ok(())
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("length {} exceeds the maximum of {}", len, max),
        ));
    }
    Ok(())
}

pub(crate) fn check_not_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}

pub(crate) fn check_optional_len(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check_len(field, v, max),
        None => Ok(()),
    }
}

/// Minimal structural email check: one `@`, non-empty local part and domain,
/// no whitespace.
pub(crate) fn check_email(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    check_len(field, value, max)?;

    let mut parts = value.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    let well_formed = parts.next().is_none()
        && !local.is_empty()
        && !domain.is_empty()
        && !value.chars().any(char::is_whitespace);

    if !well_formed {
        return Err(ValidationError::new(
            field,
            format!("'{}' is not a valid email address", value),
        ));
    }
    Ok(())
}
