//! Report errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A report window whose start falls after its end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Requested window start.
        start: NaiveDate,
        /// Requested window end.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Returns a stable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "REPORT_INVALID_DATE_RANGE",
        }
    }
}
