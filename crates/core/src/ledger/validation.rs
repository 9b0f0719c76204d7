//! Structural validation and the double-entry audit.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tradeledger_shared::{VoucherId, within_tolerance};

use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::LedgerEntry;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Validates that a ledger entry is structurally sound.
///
/// # Errors
///
/// Returns a [`LedgerError`] for negative amounts, blank references or a
/// non-positive exchange rate. These are hard failures; everything else is a
/// diagnostic, not an error.
pub fn validate_entry(entry: &LedgerEntry) -> Result<(), LedgerError> {
    if entry.debit < Decimal::ZERO || entry.credit < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount(entry.id));
    }
    if entry.entity_id.is_blank() {
        return Err(LedgerError::BlankEntityId(entry.id));
    }
    if entry.voucher_id.is_blank() {
        return Err(LedgerError::BlankVoucherId(entry.id));
    }
    if let Some(fcy) = &entry.fcy {
        if fcy.exchange_rate <= Decimal::ZERO {
            return Err(LedgerError::InvalidExchangeRate(entry.id));
        }
    }
    Ok(())
}

/// Audits the fundamental double-entry law over a ledger snapshot.
///
/// For every voucher, sum(debit) must equal sum(credit) within tolerance over
/// its financial entries; reporting-only rows are display duplicates and do
/// not participate. Violations are a data-integrity defect to report, never
/// to auto-correct.
#[must_use]
pub fn audit_double_entry(store: &LedgerStore) -> Diagnostics {
    let mut totals: BTreeMap<&VoucherId, (Decimal, Decimal)> = BTreeMap::new();

    for entry in store.entries().iter().filter(|e| e.counts_in_financials()) {
        let (debit, credit) = totals.entry(&entry.voucher_id).or_default();
        *debit += entry.debit;
        *credit += entry.credit;
    }

    let mut diagnostics = Diagnostics::new();
    for (voucher_id, (debit_total, credit_total)) in totals {
        if !within_tolerance(debit_total, credit_total) {
            diagnostics.push(Diagnostic::UnbalancedVoucher {
                voucher_id: voucher_id.clone(),
                debit_total,
                credit_total,
                difference: debit_total - credit_total,
            });
        }
    }
    diagnostics
}
