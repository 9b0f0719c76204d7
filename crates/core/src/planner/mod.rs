//! Period planning: planned vs. actual receipts, payments and expenses.
//!
//! Plans live per (period, entity) pair and roll over at period boundaries
//! with explicit archive-and-reset semantics. Actuals measure cash movement
//! within the period, not accrual activity.

pub mod error;
pub mod period;
pub mod rollover;
pub mod types;

pub use error::PlannerError;
pub use period::{PeriodType, PeriodWindow};
pub use rollover::{PeriodPlanner, PlannerViewRow, RolloverDecision, RolloverOutcome, calculate_period_actuals};
pub use types::{EntityKind, PlannerEntry};
