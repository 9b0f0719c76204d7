//! Data-integrity conditions detected while deriving balances and reports.
//!
//! These are conditions to detect and report, never to silently fix. They are
//! collected and returned alongside normal results so the reporting layer can
//! still render what it can; only structurally invalid input is a hard error
//! (see [`crate::ledger::LedgerError`]).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tradeledger_shared::{EntityId, VoucherId};

use crate::planner::PeriodType;

/// A single detected integrity condition.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A voucher whose summed debits and credits disagree beyond tolerance.
    #[error("voucher {voucher_id} is unbalanced: debit {debit_total}, credit {credit_total}, difference {difference}")]
    UnbalancedVoucher {
        /// The voucher number.
        voucher_id: VoucherId,
        /// Summed debit amounts over the voucher's financial entries.
        debit_total: Decimal,
        /// Summed credit amounts over the voucher's financial entries.
        credit_total: Decimal,
        /// Debit total minus credit total.
        difference: Decimal,
    },

    /// Ledger entries referencing an id that matches no account or partner.
    #[error("{entry_count} ledger entries reference unknown id {entity_id} (debit {debit_total}, credit {credit_total})")]
    OrphanedEntries {
        /// The unresolvable account/partner id.
        entity_id: EntityId,
        /// How many entries reference it.
        entry_count: usize,
        /// Their summed debit amount.
        debit_total: Decimal,
        /// Their summed credit amount.
        credit_total: Decimal,
    },

    /// An account whose declared parent does not resolve within its type group.
    #[error("account {account_id} references missing parent {parent_id}; promoted to top level")]
    DanglingParentReference {
        /// The child account.
        account_id: EntityId,
        /// The parent id that did not resolve.
        parent_id: EntityId,
    },

    /// An account caught in a parent-reference cycle.
    #[error("account {account_id} is part of a parent-reference cycle; promoted to top level")]
    CyclicParentReference {
        /// The account on the cycle.
        account_id: EntityId,
    },

    /// A stored balance field disagreeing with the ledger-derived value.
    #[error("cached balance for {entity_id} is stale: cached {cached}, live {live}")]
    StaleBalanceCache {
        /// The account or partner whose cache is stale.
        entity_id: EntityId,
        /// The stored balance field.
        cached: Decimal,
        /// The balance derived live from the ledger.
        live: Decimal,
    },

    /// A rollover decision applied to a period boundary already resolved.
    #[error("rollover for {period_type:?} boundary {boundary} was already resolved; ignoring")]
    RolloverReentry {
        /// The planner period type.
        period_type: PeriodType,
        /// Start date of the period boundary in question.
        boundary: NaiveDate,
    },
}

/// An ordered collection of detected integrity conditions.
///
/// Every derivation that can observe bad data returns one of these next to
/// its normal result. Pushing a diagnostic also emits a `tracing` warning so
/// operators see integrity drift without inspecting report payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a detected condition.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "ledger integrity condition detected");
        self.items.push(diagnostic);
    }

    /// Absorbs all conditions from another collection.
    pub fn merge(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// Returns true if no conditions were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of detected conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates over the detected conditions.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Consumes the collection, returning the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
