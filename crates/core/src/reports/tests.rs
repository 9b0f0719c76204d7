//! Scenario tests for report composition.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tradeledger_shared::{EntityId, LedgerEntryId, VoucherId};

use super::error::ReportError;
use super::service::ReportService;
use crate::accounts::{Account, AccountRole, AccountType};
use crate::diagnostics::Diagnostic;
use crate::ledger::types::{LedgerEntry, VoucherType};
use crate::ledger::LedgerStore;
use crate::partners::{Partner, PartnerRole, PartnerType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(
    voucher: &str,
    voucher_type: VoucherType,
    entity: &str,
    d: NaiveDate,
    debit: Decimal,
    credit: Decimal,
) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::new(),
        voucher_id: VoucherId::from(voucher),
        voucher_type,
        entity_id: EntityId::from(entity),
        entity_name: entity.to_string(),
        date: d,
        created_at: None,
        debit,
        credit,
        fcy: None,
        narration: None,
        reporting_only: false,
        is_adjustment: false,
    }
}

fn account(id: &str, account_type: AccountType, role: AccountRole, cached: Decimal) -> Account {
    Account {
        id: EntityId::from(id),
        code: id.to_string(),
        name: id.to_string(),
        account_type,
        role,
        parent_account_id: None,
        cached_balance: cached,
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

/// A small trading quarter: one sale with a discount, a part receipt, one
/// purchase with a part payment, and rent paid from the bank.
fn fixture_store() -> LedgerStore {
    let mut reporting_copy = entry(
        "SI-1",
        VoucherType::SalesInvoice,
        "cust-a",
        date(2024, 1, 10),
        dec!(500),
        dec!(0),
    );
    reporting_copy.reporting_only = true;

    LedgerStore::from_entries(vec![
        entry("SI-1", VoucherType::SalesInvoice, "cust-a", date(2024, 1, 10), dec!(500), dec!(0)),
        entry("SI-1", VoucherType::SalesInvoice, "sales", date(2024, 1, 10), dec!(0), dec!(500)),
        reporting_copy,
        entry("RC-1", VoucherType::Receipt, "bank", date(2024, 1, 20), dec!(200), dec!(0)),
        entry("RC-1", VoucherType::Receipt, "cust-a", date(2024, 1, 20), dec!(0), dec!(200)),
        entry("JV-1", VoucherType::Journal, "sales-discount", date(2024, 1, 25), dec!(20), dec!(0)),
        entry("JV-1", VoucherType::Journal, "cust-a", date(2024, 1, 25), dec!(0), dec!(20)),
        entry("PB-1", VoucherType::PurchaseBill, "purchases", date(2024, 2, 5), dec!(120), dec!(0)),
        entry("PB-1", VoucherType::PurchaseBill, "supp-a", date(2024, 2, 5), dec!(0), dec!(120)),
        entry("PY-1", VoucherType::Payment, "supp-a", date(2024, 2, 10), dec!(70), dec!(0)),
        entry("PY-1", VoucherType::Payment, "bank", date(2024, 2, 10), dec!(0), dec!(70)),
        entry("EX-1", VoucherType::Expense, "rent", date(2024, 2, 3), dec!(50), dec!(0)),
        entry("EX-1", VoucherType::Expense, "bank", date(2024, 2, 3), dec!(0), dec!(50)),
    ])
    .unwrap()
}

fn fixture_accounts() -> Vec<Account> {
    vec![
        account("bank", AccountType::Asset, AccountRole::Standard, dec!(80)),
        account("sales", AccountType::Revenue, AccountRole::Standard, dec!(500)),
        account("sales-discount", AccountType::Revenue, AccountRole::ContraRevenue, dec!(-20)),
        account("rent", AccountType::Expense, AccountRole::Standard, dec!(50)),
        account("purchases", AccountType::Expense, AccountRole::Standard, dec!(120)),
    ]
}

fn fixture_partners() -> Vec<Partner> {
    vec![
        partner("cust-a", PartnerType::Customer, dec!(280)),
        partner("supp-a", PartnerType::Supplier, dec!(-50)),
    ]
}

#[test]
fn test_balance_sheet_identity_holds() {
    let store = fixture_store();
    let (report, diagnostics) =
        ReportService::balance_sheet(&store, &fixture_accounts(), &fixture_partners(), None);

    assert!(diagnostics.is_empty());
    assert_eq!(report.receivables.total, dec!(280));
    assert_eq!(report.payables.total, dec!(50));
    assert_eq!(report.total_assets, dec!(360));
    assert_eq!(report.net_income, dec!(310));
    assert_eq!(report.liabilities_and_equity, dec!(360));
    assert_eq!(report.unmatched_difference, dec!(0));
    assert!(report.is_balanced);
}

#[test]
fn test_balance_sheet_exposes_unmatched_difference() {
    // Drop the revenue account from the chart: its 500 credit no longer
    // enters the net-income plug and the sheet must say so, not hide it.
    let store = fixture_store();
    let accounts: Vec<Account> = fixture_accounts()
        .into_iter()
        .filter(|a| a.id.as_str() != "sales")
        .collect();

    let (report, _) = ReportService::balance_sheet(&store, &accounts, &fixture_partners(), None);
    assert!(!report.is_balanced);
    assert_eq!(report.unmatched_difference, dec!(500));
}

#[test]
fn test_profit_and_loss_nets_contra_revenue() {
    let store = fixture_store();
    let report = ReportService::profit_and_loss(
        &store,
        &fixture_accounts(),
        date(2024, 1, 1),
        date(2024, 2, 29),
    )
    .unwrap();

    assert_eq!(report.revenue.total, dec!(500));
    assert_eq!(report.contra_revenue.total, dec!(20));
    assert_eq!(report.net_revenue, dec!(480));
    assert_eq!(report.expenses.total, dec!(170));
    assert_eq!(report.net_income, dec!(310));
    assert!(report.inventory_movement.lines.is_empty());
}

#[test]
fn test_profit_and_loss_excludes_inventory_movement_from_expenses() {
    let store = LedgerStore::from_entries(vec![
        entry("PR-1", VoucherType::Production, "raw-material-consumption", date(2024, 3, 1), dec!(90), dec!(0)),
        entry("PR-1", VoucherType::Production, "stock", date(2024, 3, 1), dec!(0), dec!(90)),
        entry("EX-1", VoucherType::Expense, "wages", date(2024, 3, 2), dec!(40), dec!(0)),
        entry("EX-1", VoucherType::Expense, "bank", date(2024, 3, 2), dec!(0), dec!(40)),
    ])
    .unwrap();
    let accounts = vec![
        account("raw-material-consumption", AccountType::Expense, AccountRole::InventoryMovement, dec!(90)),
        account("wages", AccountType::Expense, AccountRole::Standard, dec!(40)),
    ];

    let report =
        ReportService::profit_and_loss(&store, &accounts, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
    assert_eq!(report.expenses.total, dec!(40));
    assert_eq!(report.inventory_movement.total, dec!(90));
    assert_eq!(report.net_income, dec!(-40));
}

#[test]
fn test_profit_and_loss_rejects_inverted_window() {
    let store = fixture_store();
    let err = ReportService::profit_and_loss(
        &store,
        &fixture_accounts(),
        date(2024, 3, 1),
        date(2024, 2, 1),
    )
    .unwrap_err();
    assert!(matches!(err, ReportError::InvalidDateRange { .. }));
}

#[test]
fn test_trial_balance_is_balanced() {
    let store = fixture_store();
    let report = ReportService::trial_balance(&store, None);

    assert_eq!(report.total_debit, report.total_credit);
    assert!(report.is_balanced);
    let cust = report
        .rows
        .iter()
        .find(|r| r.entity_id.as_str() == "cust-a")
        .unwrap();
    assert_eq!(cust.debit_total, dec!(500));
    assert_eq!(cust.credit_total, dec!(220));
}

#[test]
fn test_trial_balance_respects_cutoff() {
    let store = fixture_store();
    let report = ReportService::trial_balance(&store, Some(date(2024, 1, 31)));

    assert!(report.rows.iter().all(|r| r.entity_id.as_str() != "supp-a"));
    assert_eq!(report.total_debit, dec!(720));
    assert!(report.is_balanced);
}

#[test]
fn test_general_ledger_running_balance() {
    let store = fixture_store();
    let report = ReportService::general_ledger(
        &store,
        &EntityId::from("cust-a"),
        date(2024, 1, 1),
        date(2024, 1, 31),
    )
    .unwrap();

    assert_eq!(report.opening, dec!(0));
    let balances: Vec<Decimal> = report.rows.iter().map(|r| r.running_balance).collect();
    assert_eq!(balances, vec![dec!(500), dec!(300), dec!(280)]);
    assert_eq!(report.closing, dec!(280));
    // The reporting-only duplicate of SI-1 must not appear.
    assert_eq!(report.total_debit, dec!(500));
}

#[test]
fn test_day_book_shows_reporting_rows_but_totals_financial() {
    let store = fixture_store();
    let report = ReportService::day_book(&store, date(2024, 1, 10));

    assert_eq!(report.vouchers.len(), 1);
    let voucher = &report.vouchers[0];
    assert_eq!(voucher.voucher_id.as_str(), "SI-1");
    assert_eq!(voucher.entries.len(), 3);
    assert_eq!(voucher.debit_total, dec!(500));
    assert_eq!(voucher.credit_total, dec!(500));
    assert_eq!(report.total_debit, report.total_credit);
}

#[test]
fn test_cash_movement_for_bank_account() {
    let store = fixture_store();
    let accounts = fixture_accounts();
    let bank: Vec<Account> = accounts
        .into_iter()
        .filter(|a| a.id.as_str() == "bank")
        .collect();

    let report =
        ReportService::cash_movement(&store, &bank, date(2024, 2, 1), date(2024, 2, 29)).unwrap();
    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.opening, dec!(200));
    assert_eq!(row.inflow, dec!(0));
    assert_eq!(row.outflow, dec!(120));
    assert_eq!(row.closing, dec!(80));
}

#[test]
fn test_aging_buckets_sum_to_classified_balance() {
    let store = fixture_store();
    let (report, diagnostics) =
        ReportService::aging(&store, &fixture_partners(), date(2024, 3, 31));
    assert!(diagnostics.is_empty());

    let cust = report
        .rows
        .iter()
        .find(|r| r.partner_id.as_str() == "cust-a")
        .unwrap();
    assert_eq!(cust.role, PartnerRole::Receivable);
    // All customer activity is 61-90 days old at the end of March.
    assert_eq!(cust.buckets.days_61_90, dec!(280));
    assert_eq!(cust.buckets.total(), dec!(280));

    let supp = report
        .rows
        .iter()
        .find(|r| r.partner_id.as_str() == "supp-a")
        .unwrap();
    assert_eq!(supp.role, PartnerRole::Payable);
    assert_eq!(supp.buckets.days_31_60, dec!(50));
    assert_eq!(supp.buckets.total(), dec!(50));
}

#[test]
fn test_audit_is_clean_on_consistent_data() {
    let store = fixture_store();
    let diagnostics = ReportService::audit(&store, &fixture_accounts(), &fixture_partners());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_audit_surfaces_every_condition() {
    let mut store = fixture_store();
    // Lone entry: unbalances its voucher and references an unknown id.
    store
        .append(entry("JV-9", VoucherType::Journal, "ghost-123", date(2024, 2, 20), dec!(33), dec!(0)))
        .unwrap();

    let mut accounts = fixture_accounts();
    accounts[0].cached_balance = dec!(999);
    let mut partners = fixture_partners();
    partners[0].cached_balance = dec!(0);

    let diagnostics = ReportService::audit(&store, &accounts, &partners);
    let has = |f: fn(&Diagnostic) -> bool| diagnostics.iter().any(f);
    assert!(has(|d| matches!(d, Diagnostic::UnbalancedVoucher { .. })));
    assert!(has(|d| matches!(d, Diagnostic::OrphanedEntries { .. })));
    assert!(has(
        |d| matches!(d, Diagnostic::StaleBalanceCache { entity_id, .. } if entity_id.as_str() == "bank")
    ));
    assert!(has(
        |d| matches!(d, Diagnostic::StaleBalanceCache { entity_id, .. } if entity_id.as_str() == "cust-a")
    ));
}

proptest! {
    /// For any set of balanced vouchers over a known chart of accounts, the
    /// balance sheet identity holds: assets == liabilities + equity + net
    /// income, with no unmatched difference.
    #[test]
    fn prop_balance_sheet_identity(
        vouchers in prop::collection::vec((0usize..5, 0usize..5, 1i64..1_000_000), 1..30),
    ) {
        let chart = [
            ("bank", AccountType::Asset),
            ("loan", AccountType::Liability),
            ("capital", AccountType::Equity),
            ("sales", AccountType::Revenue),
            ("rent", AccountType::Expense),
        ];
        let mut store = LedgerStore::new();
        for (i, (debit_idx, credit_idx, cents)) in vouchers.iter().enumerate() {
            let amount = Decimal::new(*cents, 2);
            let voucher = format!("JV-{i}");
            let day = (i % 28 + 1) as u32;
            store
                .append(entry(&voucher, VoucherType::Journal, chart[*debit_idx].0, date(2024, 1, day), amount, Decimal::ZERO))
                .unwrap();
            store
                .append(entry(&voucher, VoucherType::Journal, chart[*credit_idx].0, date(2024, 1, day), Decimal::ZERO, amount))
                .unwrap();
        }
        let accounts: Vec<Account> = chart
            .iter()
            .map(|&(id, account_type)| account(id, account_type, AccountRole::Standard, Decimal::ZERO))
            .collect();

        let (report, _) = ReportService::balance_sheet(&store, &accounts, &[], None);
        prop_assert_eq!(report.unmatched_difference, Decimal::ZERO);
        prop_assert!(report.is_balanced);
    }
}
