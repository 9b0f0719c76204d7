//! Ledger error types.
//!
//! Hard failures are reserved for structurally invalid input. Integrity
//! conditions found in structurally valid data flow through
//! [`crate::diagnostics`] instead.

use thiserror::Error;
use tradeledger_shared::LedgerEntryId;

/// Errors raised when a ledger entry is structurally invalid.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Debit or credit amount is negative.
    #[error("ledger entry {0} has a negative debit or credit amount")]
    NegativeAmount(LedgerEntryId),

    /// The account/partner reference is blank.
    #[error("ledger entry {0} has a blank account/partner reference")]
    BlankEntityId(LedgerEntryId),

    /// The voucher reference is blank.
    #[error("ledger entry {0} has a blank voucher reference")]
    BlankVoucherId(LedgerEntryId),

    /// The foreign-currency shadow carries a non-positive exchange rate.
    #[error("ledger entry {0} has a non-positive exchange rate")]
    InvalidExchangeRate(LedgerEntryId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::BlankEntityId(_) => "BLANK_ENTITY_ID",
            Self::BlankVoucherId(_) => "BLANK_VOUCHER_ID",
            Self::InvalidExchangeRate(_) => "INVALID_EXCHANGE_RATE",
        }
    }
}
