//! Core ledger and reporting engine for Tradeledger.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Balances, roll-ups and reports are derived functions of an
//! append-only ledger snapshot; the persistence layer delivers typed records
//! and the caller supplies the current date.
//!
//! # Modules
//!
//! - `ledger` - Append-only ledger entries, indexed store, double-entry audit
//! - `balance` - Signed balance resolution and opening/activity/closing math
//! - `accounts` - Chart of accounts and hierarchy roll-ups
//! - `partners` - Customer/supplier balance classification
//! - `planner` - Periodic planning rollover state machine
//! - `reports` - Financial report composition and memoization
//! - `diagnostics` - Data-integrity conditions reported alongside results

pub mod accounts;
pub mod balance;
pub mod diagnostics;
pub mod ledger;
pub mod partners;
pub mod planner;
pub mod reports;
