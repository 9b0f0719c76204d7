//! Signed balance resolution.
//!
//! Every ledger-style figure in the engine comes from this module:
//! raw and type-signed balances, the opening/activity/closing split, and
//! orphaned-entry surfacing.

pub mod resolver;

pub use resolver::{BalanceResolver, PeriodBalance, find_orphans};
