//! Chart of accounts.
//!
//! - Account records and type/role classification
//! - Normal-balance sign rules per account type
//! - One-level hierarchy roll-ups with dangling/cycle safety

pub mod hierarchy;
pub mod types;

pub use hierarchy::{AggregatedAccount, aggregate};
pub use types::{Account, AccountRole, AccountType};
