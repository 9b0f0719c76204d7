//! Partner domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeledger_shared::EntityId;

/// Partner type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerType {
    /// A customer we sell to.
    Customer,
    /// A supplier we buy from.
    Supplier,
    /// A sub-supplier rolling into a parent supplier's figures.
    SubSupplier,
    /// A general vendor.
    Vendor,
    /// A freight forwarder.
    FreightForwarder,
    /// A customs clearing agent.
    ClearingAgent,
    /// A commission agent.
    CommissionAgent,
}

impl PartnerType {
    /// Returns true for the customer side of the ledger.
    #[must_use]
    pub fn is_customer(self) -> bool {
        matches!(self, Self::Customer)
    }

    /// Returns true for supplier-like partners (everything except customers).
    #[must_use]
    pub fn is_supplier_side(self) -> bool {
        !self.is_customer()
    }

    /// Returns true if this partner participates in top-level balance sheet
    /// aggregates. Sub-suppliers are excluded exactly: they roll into their
    /// parent supplier's figures elsewhere.
    #[must_use]
    pub fn in_balance_sheet(self) -> bool {
        self != Self::SubSupplier
    }
}

/// A customer/supplier/agent record.
///
/// `cached_balance` is maintained by the posting side and treated purely as a
/// hint; reporting always derives the live figure from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    /// Identifier in the shared account/partner namespace.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Partner type.
    pub partner_type: PartnerType,
    /// Cached balance maintained by the posting side.
    pub cached_balance: Decimal,
    /// Default display currency (ISO 4217).
    pub default_currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_side_covers_all_non_customers() {
        for pt in [
            PartnerType::Supplier,
            PartnerType::SubSupplier,
            PartnerType::Vendor,
            PartnerType::FreightForwarder,
            PartnerType::ClearingAgent,
            PartnerType::CommissionAgent,
        ] {
            assert!(pt.is_supplier_side());
        }
        assert!(!PartnerType::Customer.is_supplier_side());
    }

    #[test]
    fn test_only_sub_supplier_excluded_from_balance_sheet() {
        assert!(!PartnerType::SubSupplier.in_balance_sheet());
        assert!(PartnerType::Customer.in_balance_sheet());
        assert!(PartnerType::Supplier.in_balance_sheet());
        assert!(PartnerType::CommissionAgent.in_balance_sheet());
    }
}
