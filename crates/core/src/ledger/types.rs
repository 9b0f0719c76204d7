//! Ledger entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeledger_shared::{EntityId, LedgerEntryId, VoucherId};

/// Voucher type classification.
///
/// Categorizes the transaction a ledger entry belongs to. The planner's
/// actuals computation and several reports dispatch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// Sales invoice to a customer.
    SalesInvoice,
    /// Purchase bill from a supplier.
    PurchaseBill,
    /// Money received (usually from a customer).
    Receipt,
    /// Money paid out (usually to a supplier).
    Payment,
    /// Expense voucher.
    Expense,
    /// General journal entry.
    Journal,
    /// Transfer between accounts.
    Transfer,
    /// Production/manufacturing movement.
    Production,
    /// Opening balance entry.
    OpeningBalance,
    /// Inventory adjustment.
    InventoryAdjustment,
    /// Discrepancy/suspense posting used to explain unmatched differences.
    Discrepancy,
}

/// Optional foreign-currency shadow of a USD-denominated amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcyAmount {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Exchange rate applied (foreign to USD).
    pub exchange_rate: Decimal,
    /// The amount in the foreign currency.
    pub amount: Decimal,
}

/// A single immutable ledger fact.
///
/// Entries are append-only from this engine's perspective; writes happen
/// upstream. `entity_id` references either a chart-of-accounts account or a
/// partner - both share one identifier namespace.
///
/// Exactly one of `debit`/`credit` is typically nonzero, but both may be
/// nonzero for contra-entries; every derivation here handles that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The voucher this entry belongs to.
    pub voucher_id: VoucherId,
    /// The voucher's transaction type.
    pub voucher_type: VoucherType,
    /// The account or partner affected by this entry.
    pub entity_id: EntityId,
    /// Denormalized display name of the account/partner.
    pub entity_name: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Entry/audit timestamp; may differ from the transaction date.
    pub created_at: Option<DateTime<Utc>>,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Optional foreign-currency shadow of the amount.
    pub fcy: Option<FcyAmount>,
    /// Free-text narration.
    pub narration: Option<String>,
    /// Excluded from financial totals (duplicate/summary display rows).
    #[serde(default)]
    pub reporting_only: bool,
    /// Marks an adjustment entry.
    #[serde(default)]
    pub is_adjustment: bool,
}

impl LedgerEntry {
    /// Returns the signed amount in debit-minus-credit terms.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if this entry contributes to financial totals.
    #[must_use]
    pub fn counts_in_financials(&self) -> bool {
        !self.reporting_only
    }
}
