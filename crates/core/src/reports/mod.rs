//! Financial report generation.
//!
//! Pure composition over the ledger, balance, accounts and partners modules:
//! - Profit & Loss
//! - Balance Sheet
//! - Trial Balance
//! - General Ledger
//! - Day Book
//! - Cash Movement
//! - Receivable/Payable Aging
//! - Full-ledger audit

pub mod cache;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use cache::ReportCache;
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
