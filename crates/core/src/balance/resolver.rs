//! Balance resolution over a ledger snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tradeledger_shared::EntityId;

use crate::accounts::AccountType;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::ledger::LedgerStore;

/// The opening/activity/closing split for one account and period.
///
/// All figures are in raw debit-minus-credit terms; the caller applies the
/// account type's sign convention where needed. Every ledger-style report
/// uses this one primitive instead of re-deriving the split ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodBalance {
    /// Balance from all entries strictly before the period start.
    pub opening: Decimal,
    /// Debit total within the period (inclusive bounds).
    pub debit: Decimal,
    /// Credit total within the period (inclusive bounds).
    pub credit: Decimal,
}

impl PeriodBalance {
    /// Closing balance: opening + period debit - period credit.
    #[must_use]
    pub fn closing(&self) -> Decimal {
        self.opening + self.debit - self.credit
    }
}

/// Computes balances for any account/partner identifier from the ledger.
///
/// Only entries that count toward financial totals participate;
/// reporting-only rows are display duplicates and are skipped throughout.
#[derive(Clone, Copy)]
pub struct BalanceResolver<'a> {
    store: &'a LedgerStore,
}

impl<'a> BalanceResolver<'a> {
    /// Creates a resolver over a ledger snapshot.
    #[must_use]
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Debit and credit totals for one id, optionally up to `as_of` (inclusive).
    #[must_use]
    pub fn debit_credit_totals(
        &self,
        entity_id: &EntityId,
        as_of: Option<NaiveDate>,
    ) -> (Decimal, Decimal) {
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for entry in self.store.financial_entries_for_account(entity_id) {
            if as_of.is_some_and(|cutoff| entry.date > cutoff) {
                continue;
            }
            debit += entry.debit;
            credit += entry.credit;
        }
        (debit, credit)
    }

    /// Raw balance in debit-minus-credit terms.
    ///
    /// Partner advances and discrepancy handling need this unsigned direction
    /// rather than the type-normalized figure.
    #[must_use]
    pub fn raw_balance(&self, entity_id: &EntityId, as_of: Option<NaiveDate>) -> Decimal {
        let (debit, credit) = self.debit_credit_totals(entity_id, as_of);
        debit - credit
    }

    /// Balance with the account type's sign convention applied.
    #[must_use]
    pub fn typed_balance(
        &self,
        entity_id: &EntityId,
        account_type: AccountType,
        as_of: Option<NaiveDate>,
    ) -> Decimal {
        let (debit, credit) = self.debit_credit_totals(entity_id, as_of);
        account_type.signed_balance(debit, credit)
    }

    /// Raw balance from entries strictly before `period_start`.
    #[must_use]
    pub fn opening_balance(&self, entity_id: &EntityId, period_start: NaiveDate) -> Decimal {
        let mut balance = Decimal::ZERO;
        for entry in self.store.financial_entries_for_account(entity_id) {
            if entry.date < period_start {
                balance += entry.signed_amount();
            }
        }
        balance
    }

    /// The opening/activity/closing split for `[period_start, period_end]`.
    #[must_use]
    pub fn period_activity(
        &self,
        entity_id: &EntityId,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> PeriodBalance {
        let mut opening = Decimal::ZERO;
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for entry in self.store.financial_entries_for_account(entity_id) {
            if entry.date < period_start {
                opening += entry.signed_amount();
            } else if entry.date <= period_end {
                debit += entry.debit;
                credit += entry.credit;
            }
        }
        PeriodBalance {
            opening,
            debit,
            credit,
        }
    }
}

/// Surfaces ledger entries whose id matches no known account or partner.
///
/// Orphans are excluded from normal account totals, so their amounts must be
/// reported separately for report totals to explain "missing" money rather
/// than just being wrong. Conditions are aggregated per unknown id.
#[must_use]
pub fn find_orphans<F>(store: &LedgerStore, is_known: F) -> Diagnostics
where
    F: Fn(&EntityId) -> bool,
{
    let mut orphans: BTreeMap<&EntityId, (usize, Decimal, Decimal)> = BTreeMap::new();
    for entry in store.entries().iter().filter(|e| e.counts_in_financials()) {
        if !is_known(&entry.entity_id) {
            let (count, debit, credit) = orphans.entry(&entry.entity_id).or_default();
            *count += 1;
            *debit += entry.debit;
            *credit += entry.credit;
        }
    }

    let mut diagnostics = Diagnostics::new();
    for (entity_id, (entry_count, debit_total, credit_total)) in orphans {
        diagnostics.push(Diagnostic::OrphanedEntries {
            entity_id: entity_id.clone(),
            entry_count,
            debit_total,
            credit_total,
        });
    }
    diagnostics
}
