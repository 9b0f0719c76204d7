//! Balance-sheet classification of partner balances.
//!
//! A partner balance lands on exactly one of four balance sheet lines
//! depending on the partner's side and the sign of the raw debit-minus-credit
//! balance. The classification amount is always positive; direction is in the
//! role.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tradeledger_shared::{EntityId, within_tolerance};

use super::types::Partner;
use crate::balance::BalanceResolver;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Which balance sheet line a partner balance belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerRole {
    /// Customer owes us money (asset).
    Receivable,
    /// We owe a supplier money (liability).
    Payable,
    /// A customer has paid ahead of delivery (liability).
    AdvanceFromCustomer,
    /// We have paid a supplier ahead of delivery (asset).
    AdvanceToSupplier,
}

/// A partner's classified balance for balance sheet presentation.
#[derive(Debug, Clone, Serialize)]
pub struct PartnerClassification {
    /// The classified partner.
    pub partner_id: EntityId,
    /// Which line the balance lands on.
    pub role: PartnerRole,
    /// Always positive; the role carries the direction.
    pub amount: Decimal,
}

/// The partner's live balance, derived from the ledger.
///
/// The cached balance on the partner record is only a hint: when it disagrees
/// with the ledger beyond tolerance a stale-cache condition is recorded and
/// the live figure wins.
#[must_use]
pub fn live_balance(
    resolver: &BalanceResolver<'_>,
    partner: &Partner,
    as_of: Option<NaiveDate>,
    diagnostics: &mut Diagnostics,
) -> Decimal {
    let live = resolver.raw_balance(&partner.id, as_of);
    if as_of.is_none() && !within_tolerance(partner.cached_balance, live) {
        diagnostics.push(Diagnostic::StaleBalanceCache {
            entity_id: partner.id.clone(),
            cached: partner.cached_balance,
            live,
        });
    }
    live
}

/// Classifies one partner's balance onto its balance sheet line.
///
/// Returns `None` for a zero balance (within tolerance): the partner simply
/// does not appear on the balance sheet. Sub-suppliers are still classified
/// here; the caller filters them from top-level aggregates via
/// [`super::PartnerType::in_balance_sheet`].
#[must_use]
pub fn classify(
    resolver: &BalanceResolver<'_>,
    partner: &Partner,
    as_of: Option<NaiveDate>,
    diagnostics: &mut Diagnostics,
) -> Option<PartnerClassification> {
    let balance = live_balance(resolver, partner, as_of, diagnostics);
    if within_tolerance(balance, Decimal::ZERO) {
        return None;
    }

    let role = if partner.partner_type.is_customer() {
        if balance > Decimal::ZERO {
            PartnerRole::Receivable
        } else {
            PartnerRole::AdvanceFromCustomer
        }
    } else if balance < Decimal::ZERO {
        PartnerRole::Payable
    } else {
        PartnerRole::AdvanceToSupplier
    };

    Some(PartnerClassification {
        partner_id: partner.id.clone(),
        role,
        amount: balance.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{LedgerEntry, VoucherType};
    use crate::ledger::LedgerStore;
    use crate::partners::types::PartnerType;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tradeledger_shared::{LedgerEntryId, VoucherId};

    fn entry(voucher: &str, entity: &str, debit: Decimal, credit: Decimal) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            voucher_id: VoucherId::from(voucher),
            voucher_type: VoucherType::Journal,
            entity_id: EntityId::from(entity),
            entity_name: entity.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: None,
            debit,
            credit,
            fcy: None,
            narration: None,
            reporting_only: false,
            is_adjustment: false,
        }
    }

    fn partner(id: &str, partner_type: PartnerType, cached: Decimal) -> Partner {
        Partner {
            id: EntityId::from(id),
            name: id.to_string(),
            partner_type,
            cached_balance: cached,
            default_currency: "USD".to_string(),
        }
    }

    #[rstest]
    #[case(PartnerType::Customer, dec!(500), dec!(0), PartnerRole::Receivable, dec!(500))]
    #[case(PartnerType::Customer, dec!(0), dec!(300), PartnerRole::AdvanceFromCustomer, dec!(300))]
    #[case(PartnerType::Supplier, dec!(0), dec!(700), PartnerRole::Payable, dec!(700))]
    #[case(PartnerType::Supplier, dec!(250), dec!(0), PartnerRole::AdvanceToSupplier, dec!(250))]
    #[case(PartnerType::Vendor, dec!(0), dec!(80), PartnerRole::Payable, dec!(80))]
    #[case(PartnerType::FreightForwarder, dec!(120), dec!(0), PartnerRole::AdvanceToSupplier, dec!(120))]
    fn test_classification_rule_table(
        #[case] partner_type: PartnerType,
        #[case] debit: Decimal,
        #[case] credit: Decimal,
        #[case] expected_role: PartnerRole,
        #[case] expected_amount: Decimal,
    ) {
        let store = LedgerStore::from_entries(vec![entry("JV-1", "p-1", debit, credit)]).unwrap();
        let resolver = BalanceResolver::new(&store);
        let p = partner("p-1", partner_type, debit - credit);
        let mut diagnostics = Diagnostics::new();

        let classified = classify(&resolver, &p, None, &mut diagnostics).unwrap();
        assert_eq!(classified.role, expected_role);
        assert_eq!(classified.amount, expected_amount);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_zero_balance_is_not_classified() {
        let store = LedgerStore::from_entries(vec![
            entry("SI-1", "cust", dec!(100), dec!(0)),
            entry("RC-1", "cust", dec!(0), dec!(100)),
        ])
        .unwrap();
        let resolver = BalanceResolver::new(&store);
        let p = partner("cust", PartnerType::Customer, dec!(0));
        let mut diagnostics = Diagnostics::new();

        assert!(classify(&resolver, &p, None, &mut diagnostics).is_none());
    }

    #[test]
    fn test_stale_cache_surfaces_and_live_wins() {
        let store = LedgerStore::from_entries(vec![entry("SI-1", "cust", dec!(500), dec!(0))]).unwrap();
        let resolver = BalanceResolver::new(&store);
        let p = partner("cust", PartnerType::Customer, dec!(450));
        let mut diagnostics = Diagnostics::new();

        let classified = classify(&resolver, &p, None, &mut diagnostics).unwrap();
        assert_eq!(classified.amount, dec!(500));
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics.iter().next().unwrap(),
            Diagnostic::StaleBalanceCache { cached, live, .. }
                if *cached == dec!(450) && *live == dec!(500)
        ));
    }

    #[test]
    fn test_historical_as_of_skips_stale_cache_check() {
        // The cached field reflects today; comparing it to a historical
        // cutoff would be a false positive.
        let store = LedgerStore::from_entries(vec![entry("SI-1", "cust", dec!(500), dec!(0))]).unwrap();
        let resolver = BalanceResolver::new(&store);
        let p = partner("cust", PartnerType::Customer, dec!(500));
        let mut diagnostics = Diagnostics::new();

        let cutoff = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let classified = classify(&resolver, &p, Some(cutoff), &mut diagnostics);
        assert!(classified.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_sub_supplier_is_classified_but_filterable() {
        let store = LedgerStore::from_entries(vec![entry("PB-1", "sub", dec!(0), dec!(90))]).unwrap();
        let resolver = BalanceResolver::new(&store);
        let p = partner("sub", PartnerType::SubSupplier, dec!(-90));
        let mut diagnostics = Diagnostics::new();

        let classified = classify(&resolver, &p, None, &mut diagnostics).unwrap();
        assert_eq!(classified.role, PartnerRole::Payable);
        assert!(!p.partner_type.in_balance_sheet());
    }
}
