//! Account domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeledger_shared::EntityId;

/// Account types for balance calculation rules.
///
/// - Asset/Expense: balance = debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance = credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    Asset,
    /// Liability account (credit-normal).
    Liability,
    /// Equity account (credit-normal).
    Equity,
    /// Revenue account (credit-normal).
    Revenue,
    /// Expense account (debit-normal).
    Expense,
}

impl AccountType {
    /// Returns true for debit-normal account types.
    #[must_use]
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Applies the type's sign convention to raw debit/credit totals.
    #[must_use]
    pub fn signed_balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        if self.is_debit_normal() {
            debit - credit
        } else {
            credit - debit
        }
    }
}

/// Presentation role of an account in the profit and loss statement.
///
/// Replaces the legacy name-substring special-casing ("Raw Material
/// Consumption", "Sales Discount") with an explicit flag. Roles change only
/// how an account is presented in the P&L; they never change the balance
/// sheet's net-income plug, which must stay the raw accounting net for the
/// balancing identity to hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Ordinary P&L or balance sheet line.
    #[default]
    Standard,
    /// Inventory-movement account (e.g. raw material consumption); excluded
    /// from P&L expense totals.
    InventoryMovement,
    /// Contra-revenue account (e.g. sales discount); subtracted from revenue
    /// instead of listed as an expense.
    ContraRevenue,
}

/// A chart-of-accounts record.
///
/// `cached_balance` is a derived value maintained upstream; it can go stale
/// after bulk restores or backdated postings and is treated as a hint, never
/// as a source of truth for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Identifier in the shared account/partner namespace.
    pub id: EntityId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Presentation role.
    #[serde(default)]
    pub role: AccountRole,
    /// Optional parent account; absent or blank means top-level.
    pub parent_account_id: Option<EntityId>,
    /// Cached balance maintained by the posting side.
    pub cached_balance: Decimal,
}

impl Account {
    /// Returns the parent reference, treating a blank id as no parent.
    #[must_use]
    pub fn parent(&self) -> Option<&EntityId> {
        self.parent_account_id.as_ref().filter(|p| !p.is_blank())
    }
}
