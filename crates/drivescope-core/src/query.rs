//! Filter-to-query translation.
//!
//! [`SearchQuery::from_filters`] turns a validated [`FilterSet`] into a
//! conjunction of [`Predicate`]s plus a row window. The translation is pure;
//! stores either render it to SQL or evaluate it directly with
//! [`SearchQuery::matches`].

use std::cmp::Ordering;

use crate::models::{CarListing, FilterSet, Page};

/// Ordering applied to every search. Rows sharing a timestamp (one bulk
/// insert) fall back to the newest id first so pages never overlap.
pub const ORDER_BY: &str = "created_at DESC, id DESC";

/// Escape character used in rendered `ILIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Searchable columns of `car_listings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Make,
    Model,
    Location,
    Year,
    Price,
    Mileage,
    Score,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Make => "make",
            Column::Model => "model",
            Column::Location => "location",
            Column::Year => "year",
            Column::Price => "price",
            Column::Mileage => "mileage",
            Column::Score => "score",
        }
    }

    fn text<'a>(&self, listing: &'a CarListing) -> Option<&'a str> {
        match self {
            Column::Make => Some(listing.make.as_str()),
            Column::Model => Some(listing.model.as_str()),
            Column::Location => listing.location.as_deref(),
            _ => None,
        }
    }

    fn number(&self, listing: &CarListing) -> Option<Value> {
        match self {
            Column::Year => Some(Value::Int(i64::from(listing.year))),
            Column::Mileage => Some(Value::Int(listing.mileage)),
            Column::Price => Some(Value::Float(listing.price)),
            Column::Score => Some(Value::Float(listing.score)),
            _ => None,
        }
    }
}

/// A numeric bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
        }
    }
}

/// One term of the conjunctive `WHERE` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match on a text column.
    Contains { column: Column, needle: String },
    /// `column >= value`
    AtLeast { column: Column, value: Value },
    /// `column <= value`
    AtMost { column: Column, value: Value },
}

impl Predicate {
    /// Evaluates the predicate against a listing.
    ///
    /// A missing text value (e.g. no `location`) never matches, like `NULL`
    /// in SQL.
    pub fn matches(&self, listing: &CarListing) -> bool {
        match self {
            Predicate::Contains { column, needle } => column
                .text(listing)
                .map(|text| text.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            Predicate::AtLeast { column, value } => column
                .number(listing)
                .and_then(|actual| actual.compare(value))
                .is_some_and(|ord| ord != Ordering::Less),
            Predicate::AtMost { column, value } => column
                .number(listing)
                .and_then(|actual| actual.compare(value))
                .is_some_and(|ord| ord != Ordering::Greater),
        }
    }
}

/// A translated search: predicates, fixed ordering and a row window.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    predicates: Vec<Predicate>,
    page: Page,
}

impl SearchQuery {
    /// Appends one predicate per present criterion. Absent criteria add
    /// nothing, so an empty filter set matches every row.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivescope_core::{Criteria, FilterSet, SearchQuery};
    ///
    /// let filters = FilterSet {
    ///     criteria: Criteria { max_mileage: Some(0), ..Criteria::default() },
    ///     ..FilterSet::default()
    /// };
    /// assert_eq!(SearchQuery::from_filters(&filters).predicates().len(), 1);
    /// ```
    pub fn from_filters(filters: &FilterSet) -> Self {
        let c = &filters.criteria;
        let mut predicates = Vec::new();

        let text = [
            (Column::Make, &c.make),
            (Column::Model, &c.model),
            (Column::Location, &c.location),
        ];
        for (column, value) in text {
            if let Some(needle) = value {
                predicates.push(Predicate::Contains {
                    column,
                    needle: needle.clone(),
                });
            }
        }

        let lower = [
            (Column::Year, c.min_year.map(|v| Value::Int(i64::from(v)))),
            (Column::Price, c.min_price.map(Value::Float)),
            (Column::Score, c.min_score.map(Value::Float)),
        ];
        for (column, value) in lower {
            if let Some(value) = value {
                predicates.push(Predicate::AtLeast { column, value });
            }
        }

        let upper = [
            (Column::Year, c.max_year.map(|v| Value::Int(i64::from(v)))),
            (Column::Price, c.max_price.map(Value::Float)),
            (Column::Mileage, c.max_mileage.map(Value::Int)),
        ];
        for (column, value) in upper {
            if let Some(value) = value {
                predicates.push(Predicate::AtMost { column, value });
            }
        }

        Self {
            predicates,
            page: filters.page,
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.page.limit()
    }

    pub fn offset(&self) -> i64 {
        self.page.offset()
    }

    /// True when every predicate holds for `listing`.
    pub fn matches(&self, listing: &CarListing) -> bool {
        self.predicates.iter().all(|p| p.matches(listing))
    }
}

/// Escapes `ILIKE` wildcards (`%`, `_`) and the escape character itself so
/// the raw value is matched literally.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Builds the `%…%` substring pattern for a raw needle.
pub fn contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}
