//! Planner record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeledger_shared::{EntityId, PlannerEntryId};

/// What kind of entity a plan row targets. Determines which vouchers count
/// toward the row's actuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Expected receipts from a customer.
    Customer,
    /// Expected payments to a supplier.
    Supplier,
    /// Expected spend on an expense account.
    Expense,
}

/// One planned amount for one entity in one period.
///
/// The `last_*` fields are archived from the prior period at rollover time
/// and are zero until the row has survived at least one rollover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerEntry {
    /// Unique identifier.
    pub id: PlannerEntryId,
    /// Period label: `YYYY-MM` (monthly) or `YYYY-Www` (weekly).
    pub period: String,
    /// The account or partner this plan row targets.
    pub entity_id: EntityId,
    /// What kind of entity the row targets.
    pub entity_kind: EntityKind,
    /// This period's target amount.
    pub planned_amount: Decimal,
    /// The prior period's planned amount, archived at rollover.
    pub last_plan_amount: Decimal,
    /// The prior period's computed actual, archived at rollover.
    pub last_actual_amount: Decimal,
}
