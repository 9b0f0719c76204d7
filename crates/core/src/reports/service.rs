//! Report generation.
//!
//! Pure composition over the ledger, balance, accounts and partners modules:
//! every figure is derived from the current [`LedgerStore`] snapshot on
//! demand. Detected integrity conditions ride along as [`Diagnostics`]
//! instead of failing the report.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tradeledger_shared::{EntityId, within_tolerance};

use super::error::ReportError;
use super::types::{
    AgingBuckets, AgingReport, AgingRow, BalanceSheetReport, CashMovementReport, CashMovementRow,
    DayBookReport, DayBookVoucher, GeneralLedgerReport, GeneralLedgerRow, ProfitAndLossReport,
    ReportLine, ReportSection, TrialBalanceReport, TrialBalanceRow,
};
use crate::accounts::{Account, AccountRole, AccountType, aggregate};
use crate::balance::{BalanceResolver, find_orphans};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::ledger::{LedgerStore, audit_double_entry};
use crate::partners::{Partner, PartnerRole, classify, live_balance};

/// Financial report composition over a ledger snapshot.
pub struct ReportService;

impl ReportService {
    /// Profit and loss over `[period_start, period_end]`.
    ///
    /// Line amounts are absolute; contra-revenue is netted off revenue and
    /// inventory-movement lines are excluded from the expense total.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if the window is inverted.
    pub fn profit_and_loss(
        store: &LedgerStore,
        accounts: &[Account],
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<ProfitAndLossReport, ReportError> {
        check_range(period_start, period_end)?;
        let resolver = BalanceResolver::new(store);

        let mut revenue = ReportSection::default();
        let mut contra_revenue = ReportSection::default();
        let mut expenses = ReportSection::default();
        let mut inventory_movement = ReportSection::default();

        for account in accounts {
            if !matches!(
                account.account_type,
                AccountType::Revenue | AccountType::Expense
            ) {
                continue;
            }
            let activity = resolver.period_activity(&account.id, period_start, period_end);
            let amount = account
                .account_type
                .signed_balance(activity.debit, activity.credit);
            if within_tolerance(amount, Decimal::ZERO) {
                continue;
            }
            let line = ReportLine {
                entity_id: account.id.clone(),
                name: account.name.clone(),
                amount: amount.abs(),
            };
            match (account.role, account.account_type) {
                (AccountRole::ContraRevenue, _) => contra_revenue.push(line),
                (AccountRole::InventoryMovement, _) => inventory_movement.push(line),
                (AccountRole::Standard, AccountType::Revenue) => revenue.push(line),
                (AccountRole::Standard, _) => expenses.push(line),
            }
        }

        let net_revenue = revenue.total - contra_revenue.total;
        let net_income = net_revenue - expenses.total;
        Ok(ProfitAndLossReport {
            period_start,
            period_end,
            revenue,
            contra_revenue,
            net_revenue,
            expenses,
            inventory_movement,
            net_income,
        })
    }

    /// Balance sheet at `as_of` (`None` for the full ledger).
    ///
    /// Net income is plugged into equity from the raw credit-minus-debit
    /// activity of every revenue and expense account, ignoring presentation
    /// roles; the identity cannot hold otherwise. A residual is exposed as
    /// `unmatched_difference`.
    #[must_use]
    pub fn balance_sheet(
        store: &LedgerStore,
        accounts: &[Account],
        partners: &[Partner],
        as_of: Option<NaiveDate>,
    ) -> (BalanceSheetReport, Diagnostics) {
        let resolver = BalanceResolver::new(store);
        let mut diagnostics = Diagnostics::new();

        let mut grouped: BTreeMap<&str, Vec<Account>> = BTreeMap::new();
        for account in accounts {
            let key = match account.account_type {
                AccountType::Asset => "asset",
                AccountType::Liability => "liability",
                AccountType::Equity => "equity",
                AccountType::Revenue | AccountType::Expense => continue,
            };
            grouped.entry(key).or_default().push(account.clone());
        }

        let mut section = |key: &str, account_type: AccountType| {
            let group = grouped.remove(key).unwrap_or_default();
            let (rows, group_diagnostics) = aggregate(&group, |a| {
                resolver.typed_balance(&a.id, account_type, as_of)
            });
            diagnostics.merge(group_diagnostics);
            rows
        };
        let assets = section("asset", AccountType::Asset);
        let liabilities = section("liability", AccountType::Liability);
        let equity = section("equity", AccountType::Equity);

        let mut receivables = ReportSection::default();
        let mut payables = ReportSection::default();
        let mut advances_from_customers = ReportSection::default();
        let mut advances_to_suppliers = ReportSection::default();
        for partner in partners {
            if !partner.partner_type.in_balance_sheet() {
                continue;
            }
            let Some(classified) = classify(&resolver, partner, as_of, &mut diagnostics) else {
                continue;
            };
            let line = ReportLine {
                entity_id: partner.id.clone(),
                name: partner.name.clone(),
                amount: classified.amount,
            };
            match classified.role {
                PartnerRole::Receivable => receivables.push(line),
                PartnerRole::Payable => payables.push(line),
                PartnerRole::AdvanceFromCustomer => advances_from_customers.push(line),
                PartnerRole::AdvanceToSupplier => advances_to_suppliers.push(line),
            }
        }

        let net_income: Decimal = accounts
            .iter()
            .filter(|a| {
                matches!(
                    a.account_type,
                    AccountType::Revenue | AccountType::Expense
                )
            })
            .map(|a| {
                let (debit, credit) = resolver.debit_credit_totals(&a.id, as_of);
                credit - debit
            })
            .sum();

        let account_assets: Decimal = assets.iter().map(|r| r.balance).sum();
        let account_liabilities: Decimal = liabilities.iter().map(|r| r.balance).sum();
        let total_equity: Decimal = equity.iter().map(|r| r.balance).sum();

        let total_assets = account_assets + receivables.total + advances_to_suppliers.total;
        let total_liabilities =
            account_liabilities + payables.total + advances_from_customers.total;
        let liabilities_and_equity = total_liabilities + total_equity + net_income;
        let unmatched_difference = total_assets - liabilities_and_equity;
        let is_balanced = within_tolerance(unmatched_difference, Decimal::ZERO);

        (
            BalanceSheetReport {
                as_of,
                assets,
                liabilities,
                equity,
                receivables,
                payables,
                advances_from_customers,
                advances_to_suppliers,
                total_assets,
                total_liabilities,
                total_equity,
                net_income,
                liabilities_and_equity,
                unmatched_difference,
                is_balanced,
            },
            diagnostics,
        )
    }

    /// Trial balance: per-id debit/credit totals up to `as_of`.
    #[must_use]
    pub fn trial_balance(store: &LedgerStore, as_of: Option<NaiveDate>) -> TrialBalanceReport {
        let resolver = BalanceResolver::new(store);

        let mut ids: Vec<&EntityId> = store.entity_ids().collect();
        ids.sort();

        let mut rows = Vec::with_capacity(ids.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for id in ids {
            let (debit_total, credit_total) = resolver.debit_credit_totals(id, as_of);
            if debit_total == Decimal::ZERO && credit_total == Decimal::ZERO {
                continue;
            }
            let name = store
                .entries_for_account(id)
                .last()
                .map(|e| e.entity_name.clone())
                .unwrap_or_default();
            total_debit += debit_total;
            total_credit += credit_total;
            rows.push(TrialBalanceRow {
                entity_id: id.clone(),
                name,
                debit_total,
                credit_total,
            });
        }

        let is_balanced = within_tolerance(total_debit, total_credit);
        TrialBalanceReport {
            as_of,
            rows,
            total_debit,
            total_credit,
            is_balanced,
        }
    }

    /// Account statement with opening, dated movements and closing.
    ///
    /// Reporting-only rows are excluded; they would corrupt the running
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if the window is inverted.
    pub fn general_ledger(
        store: &LedgerStore,
        entity_id: &EntityId,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<GeneralLedgerReport, ReportError> {
        check_range(period_start, period_end)?;
        let resolver = BalanceResolver::new(store);
        let opening = resolver.opening_balance(entity_id, period_start);

        let mut window: Vec<_> = store
            .financial_entries_for_account(entity_id)
            .into_iter()
            .filter(|e| e.date >= period_start && e.date <= period_end)
            .cloned()
            .collect();
        window.sort_by_key(|e| e.date);

        let mut running = opening;
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let mut rows = Vec::with_capacity(window.len());
        for entry in window {
            running += entry.signed_amount();
            total_debit += entry.debit;
            total_credit += entry.credit;
            rows.push(GeneralLedgerRow {
                entry,
                running_balance: running,
            });
        }

        Ok(GeneralLedgerReport {
            entity_id: entity_id.clone(),
            period_start,
            period_end,
            opening,
            rows,
            total_debit,
            total_credit,
            closing: opening + total_debit - total_credit,
        })
    }

    /// Day book: every entry of one date grouped by voucher.
    ///
    /// Reporting-only rows are shown (it is a display/audit query) but the
    /// totals cover financial rows only, so the day still sums to zero.
    #[must_use]
    pub fn day_book(store: &LedgerStore, date: NaiveDate) -> DayBookReport {
        let mut grouped: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for entry in store.entries_on(date) {
            grouped
                .entry(entry.voucher_id.clone())
                .or_default()
                .push(entry.clone());
        }

        let mut vouchers = Vec::with_capacity(grouped.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for (voucher_id, entries) in grouped {
            let voucher_type = entries[0].voucher_type;
            let mut debit_total = Decimal::ZERO;
            let mut credit_total = Decimal::ZERO;
            for entry in entries.iter().filter(|e| e.counts_in_financials()) {
                debit_total += entry.debit;
                credit_total += entry.credit;
            }
            total_debit += debit_total;
            total_credit += credit_total;
            vouchers.push(DayBookVoucher {
                voucher_id,
                voucher_type,
                entries,
                debit_total,
                credit_total,
            });
        }

        DayBookReport {
            date,
            vouchers,
            total_debit,
            total_credit,
        }
    }

    /// Inflow/outflow per cash or bank account over a period.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if the window is inverted.
    pub fn cash_movement(
        store: &LedgerStore,
        cash_accounts: &[Account],
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<CashMovementReport, ReportError> {
        check_range(period_start, period_end)?;
        let resolver = BalanceResolver::new(store);

        let mut rows = Vec::with_capacity(cash_accounts.len());
        let mut total_inflow = Decimal::ZERO;
        let mut total_outflow = Decimal::ZERO;
        for account in cash_accounts {
            let split = resolver.period_activity(&account.id, period_start, period_end);
            total_inflow += split.debit;
            total_outflow += split.credit;
            rows.push(CashMovementRow {
                entity_id: account.id.clone(),
                name: account.name.clone(),
                opening: split.opening,
                inflow: split.debit,
                outflow: split.credit,
                closing: split.closing(),
            });
        }

        Ok(CashMovementReport {
            period_start,
            period_end,
            rows,
            total_inflow,
            total_outflow,
        })
    }

    /// Receivable/payable aging at `as_of` in 30-day bands.
    ///
    /// Bucket amounts are oriented so a row's band total matches its
    /// classified balance; payments land in their own bands, so individual
    /// bands can go negative.
    #[must_use]
    pub fn aging(
        store: &LedgerStore,
        partners: &[Partner],
        as_of: NaiveDate,
    ) -> (AgingReport, Diagnostics) {
        let resolver = BalanceResolver::new(store);
        let mut diagnostics = Diagnostics::new();

        let mut rows = Vec::new();
        for partner in partners {
            if !partner.partner_type.in_balance_sheet() {
                continue;
            }
            let Some(classified) = classify(&resolver, partner, Some(as_of), &mut diagnostics)
            else {
                continue;
            };
            // Asset-side roles read debit-minus-credit as positive.
            let debit_positive = matches!(
                classified.role,
                PartnerRole::Receivable | PartnerRole::AdvanceToSupplier
            );

            let mut buckets = AgingBuckets::default();
            for entry in store.financial_entries_for_account(&partner.id) {
                if entry.date > as_of {
                    continue;
                }
                let signed = entry.signed_amount();
                let oriented = if debit_positive { signed } else { -signed };
                let age = (as_of - entry.date).num_days();
                match age {
                    0..=30 => buckets.current += oriented,
                    31..=60 => buckets.days_31_60 += oriented,
                    61..=90 => buckets.days_61_90 += oriented,
                    _ => buckets.over_90 += oriented,
                }
            }

            rows.push(AgingRow {
                partner_id: partner.id.clone(),
                name: partner.name.clone(),
                role: classified.role,
                buckets,
            });
        }

        (AgingReport { as_of, rows }, diagnostics)
    }

    /// Runs every integrity detector over the ledger and master data.
    ///
    /// Covers unbalanced vouchers, orphaned entries, dangling and cyclic
    /// parent references, and stale cached balances on both accounts and
    /// partners.
    #[must_use]
    pub fn audit(
        store: &LedgerStore,
        accounts: &[Account],
        partners: &[Partner],
    ) -> Diagnostics {
        let resolver = BalanceResolver::new(store);
        let mut diagnostics = audit_double_entry(store);

        let known: HashSet<&EntityId> = accounts
            .iter()
            .map(|a| &a.id)
            .chain(partners.iter().map(|p| &p.id))
            .collect();
        diagnostics.merge(find_orphans(store, |id| known.contains(id)));

        for account in accounts {
            let live = resolver.typed_balance(&account.id, account.account_type, None);
            if !within_tolerance(account.cached_balance, live) {
                diagnostics.push(Diagnostic::StaleBalanceCache {
                    entity_id: account.id.clone(),
                    cached: account.cached_balance,
                    live,
                });
            }
        }
        for account_type in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            let group: Vec<Account> = accounts
                .iter()
                .filter(|a| a.account_type == account_type)
                .cloned()
                .collect();
            let (_, group_diagnostics) = aggregate(&group, |a| {
                resolver.typed_balance(&a.id, account_type, None)
            });
            diagnostics.merge(group_diagnostics);
        }

        for partner in partners {
            live_balance(&resolver, partner, None, &mut diagnostics);
        }

        diagnostics
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ReportError> {
    if start > end {
        return Err(ReportError::InvalidDateRange { start, end });
    }
    Ok(())
}
