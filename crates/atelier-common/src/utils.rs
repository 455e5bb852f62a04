//! Utility functions used across the Atelier analytics engine

use crate::error::{AtelierError, Result};
use crate::types::{EntityId, Timestamp};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Generate a new random entity identifier
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Current UTC timestamp
pub fn now() -> Timestamp {
    Utc::now()
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date string.
///
/// Malformed input is a date range problem from the caller's point of
/// view, so it surfaces as [`AtelierError::InvalidDateRange`].
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AtelierError::invalid_date_range(format!(
            "malformed date '{value}', expected YYYY-MM-DD"
        ))
    })
}
