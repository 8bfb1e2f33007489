//! Analytic error model.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type used across the analytic crates.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Analytic-level error.
///
/// Validation failures are raised before any scan of the data; malformed rows
/// are the only non-fatal kind and are skipped and counted by the consumer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A row is missing a required field (transaction or item identifier).
    #[error("invalid row data: {0}")]
    InvalidRowData(String),

    /// End of the requested range precedes its start.
    #[error("invalid date range: end {end} precedes start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A support/confidence/z-score parameter is outside its valid domain.
    #[error("threshold out of range: {0}")]
    ThresholdOutOfRange(String),

    /// Itemset size cap below the minimum of 2.
    #[error("invalid itemset size: max_items must be at least 2, got {0}")]
    InvalidItemsetSize(usize),

    /// A limit parameter that must be positive was zero or negative.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

impl AnalyticsError {
    pub fn invalid_row(msg: impl Into<String>) -> Self {
        Self::InvalidRowData(msg.into())
    }

    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::InvalidDateRange { start, end }
    }

    pub fn threshold(msg: impl Into<String>) -> Self {
        Self::ThresholdOutOfRange(msg.into())
    }

    pub fn invalid_limit(msg: impl Into<String>) -> Self {
        Self::InvalidLimit(msg.into())
    }
}
