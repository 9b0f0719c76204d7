//! Append-only double-entry ledger.
//!
//! This module implements the fact table the rest of the engine derives from:
//! - Ledger entry records and voucher classification
//! - The indexed, versioned ledger store
//! - Structural validation and the double-entry audit
//! - The voided-voucher archive trail

pub mod archive;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use archive::{ArchiveEntry, ArchiveLog};
pub use error::LedgerError;
pub use store::LedgerStore;
pub use types::{FcyAmount, LedgerEntry, VoucherType};
pub use validation::{audit_double_entry, validate_entry};
