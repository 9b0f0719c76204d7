//! The rollover state machine.
//!
//! A plan row lives for one period. When a period boundary is crossed the
//! caller must choose, exactly once per boundary, between archiving into a
//! fresh plan and carrying the old plan forward. The choice is serialized
//! through a single persisted reset date per period type, so re-evaluating
//! the same boundary is a recorded no-op rather than a double archive.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeledger_shared::{EntityId, PlannerEntryId};

use super::error::PlannerError;
use super::period::{PeriodType, PeriodWindow};
use super::types::{EntityKind, PlannerEntry};
use crate::balance::BalanceResolver;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::ledger::types::VoucherType;
use crate::ledger::LedgerStore;

/// How a pending rollover is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloverDecision {
    /// Archive the completed period's plans and start fresh rows at zero.
    StartNewPlan,
    /// Keep the existing plan values; only acknowledge the boundary.
    ContinueOldPlan,
}

/// The result of applying a rollover decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolloverOutcome {
    /// Whether the decision actually fired. False when the boundary had
    /// already been resolved.
    pub applied: bool,
    /// The decision that was requested.
    pub decision: RolloverDecision,
    /// Start of the new period the boundary leads into.
    pub boundary: NaiveDate,
    /// How many plan rows were archived into new-period rows.
    pub archived_count: usize,
}

/// One row of the planning screen.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerViewRow {
    /// The account or partner the row targets.
    pub entity_id: EntityId,
    /// What kind of entity the row targets.
    pub entity_kind: EntityKind,
    /// The entity's live raw balance from the ledger.
    pub current_balance: Decimal,
    /// Prior period's plan, archived at rollover.
    pub last_plan: Decimal,
    /// Prior period's actual, archived at rollover.
    pub last_actual: Decimal,
    /// This period's planned amount.
    pub current_plan: Decimal,
}

/// Cash movement for one entity within a period window.
///
/// Deliberately narrower than "all activity": customers count only the
/// credit side of receipts, suppliers only the debit side of payments, and
/// expense accounts the debit side of expense, purchase-bill and journal
/// vouchers. Reporting-only rows never count.
#[must_use]
pub fn calculate_period_actuals(
    store: &LedgerStore,
    entity_id: &EntityId,
    entity_kind: EntityKind,
    window: PeriodWindow,
) -> Decimal {
    let mut actual = Decimal::ZERO;
    for entry in store.financial_entries_for_account(entity_id) {
        if !window.contains(entry.date) {
            continue;
        }
        match entity_kind {
            EntityKind::Customer => {
                if entry.voucher_type == VoucherType::Receipt {
                    actual += entry.credit;
                }
            }
            EntityKind::Supplier => {
                if entry.voucher_type == VoucherType::Payment {
                    actual += entry.debit;
                }
            }
            EntityKind::Expense => {
                if matches!(
                    entry.voucher_type,
                    VoucherType::Expense | VoucherType::PurchaseBill | VoucherType::Journal
                ) {
                    actual += entry.debit;
                }
            }
        }
    }
    actual
}

/// Planner state: plan rows plus the persisted reset date per period type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodPlanner {
    entries: Vec<PlannerEntry>,
    last_reset: HashMap<PeriodType, NaiveDate>,
}

impl PeriodPlanner {
    /// Creates an empty planner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a planner from persisted rows and reset dates.
    #[must_use]
    pub fn from_state(
        entries: Vec<PlannerEntry>,
        last_reset: HashMap<PeriodType, NaiveDate>,
    ) -> Self {
        Self { entries, last_reset }
    }

    /// All plan rows, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[PlannerEntry] {
        &self.entries
    }

    /// The persisted reset date for a period type, if any.
    #[must_use]
    pub fn last_reset(&self, period_type: PeriodType) -> Option<NaiveDate> {
        self.last_reset.get(&period_type).copied()
    }

    /// Creates or updates the plan row for one (period, entity) pair.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidPeriodLabel`] if `period` does not
    /// match the period type's label format.
    pub fn set_plan(
        &mut self,
        period_type: PeriodType,
        period: &str,
        entity_id: EntityId,
        entity_kind: EntityKind,
        planned_amount: Decimal,
    ) -> Result<&PlannerEntry, PlannerError> {
        period_type.validate_label(period)?;

        let position = self
            .entries
            .iter()
            .position(|e| e.period == period && e.entity_id == entity_id);
        let i = match position {
            Some(i) => {
                self.entries[i].planned_amount = planned_amount;
                i
            }
            None => {
                self.entries.push(PlannerEntry {
                    id: PlannerEntryId::new(),
                    period: period.to_string(),
                    entity_id,
                    entity_kind,
                    planned_amount,
                    last_plan_amount: Decimal::ZERO,
                    last_actual_amount: Decimal::ZERO,
                });
                self.entries.len() - 1
            }
        };
        Ok(&self.entries[i])
    }

    /// Whether a rollover decision is pending for `today`'s period boundary.
    ///
    /// A boundary is pending when the current period started after the
    /// persisted reset date. A planner with no reset date yet recorded is
    /// always pending.
    #[must_use]
    pub fn rollover_pending(&self, period_type: PeriodType, today: NaiveDate) -> bool {
        let current_start = period_type.window_containing(today).start;
        match self.last_reset(period_type) {
            None => true,
            Some(reset) => current_start > reset,
        }
    }

    /// Applies a rollover decision for the boundary at `today`.
    ///
    /// If the boundary was already resolved this is a no-op: the outcome
    /// comes back with `applied == false` and a reentry condition is
    /// recorded, never a double archive.
    pub fn apply_decision(
        &mut self,
        period_type: PeriodType,
        decision: RolloverDecision,
        today: NaiveDate,
        store: &LedgerStore,
    ) -> (RolloverOutcome, Diagnostics) {
        let boundary = period_type.window_containing(today).start;
        let mut diagnostics = Diagnostics::new();

        if !self.rollover_pending(period_type, today) {
            diagnostics.push(Diagnostic::RolloverReentry {
                period_type,
                boundary,
            });
            return (
                RolloverOutcome {
                    applied: false,
                    decision,
                    boundary,
                    archived_count: 0,
                },
                diagnostics,
            );
        }

        let archived_count = match decision {
            RolloverDecision::ContinueOldPlan => 0,
            RolloverDecision::StartNewPlan => self.archive_completed_period(period_type, today, store),
        };

        // Persisting the reset date is what makes the decision fire at most
        // once per boundary.
        self.last_reset.insert(period_type, today);
        tracing::debug!(
            ?period_type,
            ?decision,
            %boundary,
            archived_count,
            "rollover decision applied"
        );

        (
            RolloverOutcome {
                applied: true,
                decision,
                boundary,
                archived_count,
            },
            diagnostics,
        )
    }

    /// Archives every row of the most recently completed period into a row
    /// for the new period, computing actuals over the completed window.
    fn archive_completed_period(
        &mut self,
        period_type: PeriodType,
        today: NaiveDate,
        store: &LedgerStore,
    ) -> usize {
        let completed = period_type.previous_window(today);
        let completed_label = period_type.label(completed.start);
        let new_label = period_type.label(today);

        let old_rows: Vec<(EntityId, EntityKind, Decimal)> = self
            .entries
            .iter()
            .filter(|e| e.period == completed_label)
            .map(|e| (e.entity_id.clone(), e.entity_kind, e.planned_amount))
            .collect();

        for (entity_id, entity_kind, old_plan) in &old_rows {
            let actual = calculate_period_actuals(store, entity_id, *entity_kind, completed);
            let position = self
                .entries
                .iter()
                .position(|e| e.period == new_label && e.entity_id == *entity_id);
            match position {
                Some(i) => {
                    let row = &mut self.entries[i];
                    row.last_plan_amount = *old_plan;
                    row.last_actual_amount = actual;
                    row.planned_amount = Decimal::ZERO;
                }
                None => {
                    self.entries.push(PlannerEntry {
                        id: PlannerEntryId::new(),
                        period: new_label.clone(),
                        entity_id: entity_id.clone(),
                        entity_kind: *entity_kind,
                        planned_amount: Decimal::ZERO,
                        last_plan_amount: *old_plan,
                        last_actual_amount: actual,
                    });
                }
            }
        }
        old_rows.len()
    }

    /// The planning screen for the period containing `today`.
    #[must_use]
    pub fn view(
        &self,
        period_type: PeriodType,
        today: NaiveDate,
        resolver: &BalanceResolver<'_>,
    ) -> Vec<PlannerViewRow> {
        let label = period_type.label(today);
        self.entries
            .iter()
            .filter(|e| e.period == label)
            .map(|e| PlannerViewRow {
                entity_id: e.entity_id.clone(),
                entity_kind: e.entity_kind,
                current_balance: resolver.raw_balance(&e.entity_id, None),
                last_plan: e.last_plan_amount,
                last_actual: e.last_actual_amount,
                current_plan: e.planned_amount,
            })
            .collect()
    }
}
