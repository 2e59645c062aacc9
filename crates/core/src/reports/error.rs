//! Report error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Unrecognized period token.
    #[error("Unknown report period: {0}")]
    InvalidPeriod(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start of the range.
        start: DateTime<Utc>,
        /// End of the range.
        end: DateTime<Utc>,
    },

    /// The data access adapter failed; the report build is aborted.
    #[error("Data access failed: {0}")]
    Adapter(String),
}
