//! Planner errors.

use thiserror::Error;

use super::period::PeriodType;

/// Errors from planner operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// A period label that does not match the period type's format.
    #[error("invalid {period_type:?} period label: {label}")]
    InvalidPeriodLabel {
        /// The rejected label.
        label: String,
        /// The period type it was validated against.
        period_type: PeriodType,
    },
}

impl PlannerError {
    /// Returns a stable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriodLabel { .. } => "PLANNER_INVALID_PERIOD_LABEL",
        }
    }
}
