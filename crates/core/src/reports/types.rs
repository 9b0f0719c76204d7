//! Typed report records.
//!
//! Reports are plain serializable values; rendering belongs to the excluded
//! UI layer. Amounts inside presentation sections are absolute where noted;
//! sign lives in which section a line landed in.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tradeledger_shared::{EntityId, VoucherId};

use crate::accounts::AggregatedAccount;
use crate::ledger::types::{LedgerEntry, VoucherType};
use crate::partners::PartnerRole;

/// One named amount in a report section.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    /// The account or partner behind the line.
    pub entity_id: EntityId,
    /// Display name.
    pub name: String,
    /// The line amount; absolute in presentation sections.
    pub amount: Decimal,
}

/// A group of report lines with their running total.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSection {
    /// The lines of the section.
    pub lines: Vec<ReportLine>,
    /// Sum of the line amounts.
    pub total: Decimal,
}

impl ReportSection {
    /// Appends a line and folds it into the total.
    pub fn push(&mut self, line: ReportLine) {
        self.total += line.amount;
        self.lines.push(line);
    }
}

/// Profit and loss over a period.
///
/// Contra-revenue lines are netted off revenue rather than listed as
/// expenses; inventory-movement lines are shown but excluded from the
/// expense total and from net income.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitAndLossReport {
    /// First day of the reporting window.
    pub period_start: NaiveDate,
    /// Last day of the reporting window.
    pub period_end: NaiveDate,
    /// Revenue lines (absolute amounts).
    pub revenue: ReportSection,
    /// Contra-revenue lines netted off revenue (absolute amounts).
    pub contra_revenue: ReportSection,
    /// Revenue total minus contra-revenue total.
    pub net_revenue: Decimal,
    /// Expense lines (absolute amounts).
    pub expenses: ReportSection,
    /// Inventory-movement lines shown outside the expense total.
    pub inventory_movement: ReportSection,
    /// Net revenue minus expense total.
    pub net_income: Decimal,
}

/// Balance sheet at a cutoff date.
///
/// Net income enters equity as a plug computed over all revenue and expense
/// activity regardless of presentation roles; anything the plug cannot
/// explain is exposed as `unmatched_difference` rather than hidden.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheetReport {
    /// Cutoff date; `None` means the full ledger.
    pub as_of: Option<NaiveDate>,
    /// Asset account rows after hierarchy roll-up.
    pub assets: Vec<AggregatedAccount>,
    /// Liability account rows after hierarchy roll-up.
    pub liabilities: Vec<AggregatedAccount>,
    /// Equity account rows after hierarchy roll-up.
    pub equity: Vec<AggregatedAccount>,
    /// Customer balances owed to us.
    pub receivables: ReportSection,
    /// Supplier balances we owe.
    pub payables: ReportSection,
    /// Customer money received ahead of delivery (liability side).
    pub advances_from_customers: ReportSection,
    /// Money paid to suppliers ahead of delivery (asset side).
    pub advances_to_suppliers: ReportSection,
    /// Account assets + receivables + advances to suppliers.
    pub total_assets: Decimal,
    /// Account liabilities + payables + advances from customers.
    pub total_liabilities: Decimal,
    /// Equity account rows, before the net-income plug.
    pub total_equity: Decimal,
    /// Net income plugged into equity.
    pub net_income: Decimal,
    /// Total liabilities + total equity + net income.
    pub liabilities_and_equity: Decimal,
    /// Total assets minus liabilities-and-equity; zero when balanced.
    pub unmatched_difference: Decimal,
    /// Whether the unmatched difference is within tolerance.
    pub is_balanced: bool,
}

/// One account row of the trial balance.
#[derive(Debug, Clone, Serialize)]
pub struct TrialBalanceRow {
    /// The account or partner id.
    pub entity_id: EntityId,
    /// Display name taken from the latest entry.
    pub name: String,
    /// Summed debits up to the cutoff.
    pub debit_total: Decimal,
    /// Summed credits up to the cutoff.
    pub credit_total: Decimal,
}

/// Whole-ledger debit/credit totals per account.
#[derive(Debug, Clone, Serialize)]
pub struct TrialBalanceReport {
    /// Cutoff date; `None` means the full ledger.
    pub as_of: Option<NaiveDate>,
    /// One row per id seen in the ledger, ordered by id.
    pub rows: Vec<TrialBalanceRow>,
    /// Grand total of debits.
    pub total_debit: Decimal,
    /// Grand total of credits.
    pub total_credit: Decimal,
    /// Whether the grand totals agree within tolerance.
    pub is_balanced: bool,
}

/// One movement row of a general ledger statement.
#[derive(Debug, Clone, Serialize)]
pub struct GeneralLedgerRow {
    /// The underlying ledger entry.
    pub entry: LedgerEntry,
    /// Balance after this row, in debit-minus-credit terms.
    pub running_balance: Decimal,
}

/// Account statement with opening, movements and closing.
#[derive(Debug, Clone, Serialize)]
pub struct GeneralLedgerReport {
    /// The account or partner the statement covers.
    pub entity_id: EntityId,
    /// First day of the statement window.
    pub period_start: NaiveDate,
    /// Last day of the statement window.
    pub period_end: NaiveDate,
    /// Balance before the window, in debit-minus-credit terms.
    pub opening: Decimal,
    /// Movement rows in date order with running balances.
    pub rows: Vec<GeneralLedgerRow>,
    /// Summed debits within the window.
    pub total_debit: Decimal,
    /// Summed credits within the window.
    pub total_credit: Decimal,
    /// Opening plus window debits minus window credits.
    pub closing: Decimal,
}

/// One voucher group in the day book.
#[derive(Debug, Clone, Serialize)]
pub struct DayBookVoucher {
    /// The voucher number.
    pub voucher_id: VoucherId,
    /// The voucher type.
    pub voucher_type: VoucherType,
    /// All of the voucher's rows on the date, reporting-only included.
    pub entries: Vec<LedgerEntry>,
    /// Debit total over the voucher's financial rows.
    pub debit_total: Decimal,
    /// Credit total over the voucher's financial rows.
    pub credit_total: Decimal,
}

/// All vouchers of one entry date.
#[derive(Debug, Clone, Serialize)]
pub struct DayBookReport {
    /// The entry date covered.
    pub date: NaiveDate,
    /// Voucher groups ordered by voucher number.
    pub vouchers: Vec<DayBookVoucher>,
    /// Debit grand total over financial rows.
    pub total_debit: Decimal,
    /// Credit grand total over financial rows.
    pub total_credit: Decimal,
}

/// Period movement of one cash or bank account.
#[derive(Debug, Clone, Serialize)]
pub struct CashMovementRow {
    /// The cash/bank account.
    pub entity_id: EntityId,
    /// Display name.
    pub name: String,
    /// Balance before the window.
    pub opening: Decimal,
    /// Debits within the window (money in).
    pub inflow: Decimal,
    /// Credits within the window (money out).
    pub outflow: Decimal,
    /// Opening plus inflow minus outflow.
    pub closing: Decimal,
}

/// Cash and bank movement over a period.
#[derive(Debug, Clone, Serialize)]
pub struct CashMovementReport {
    /// First day of the window.
    pub period_start: NaiveDate,
    /// Last day of the window.
    pub period_end: NaiveDate,
    /// One row per cash/bank account, in the order supplied.
    pub rows: Vec<CashMovementRow>,
    /// Summed inflow across rows.
    pub total_inflow: Decimal,
    /// Summed outflow across rows.
    pub total_outflow: Decimal,
}

/// Age-band totals for one partner balance.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AgingBuckets {
    /// Entries up to 30 days old.
    pub current: Decimal,
    /// Entries 31 to 60 days old.
    pub days_31_60: Decimal,
    /// Entries 61 to 90 days old.
    pub days_61_90: Decimal,
    /// Entries more than 90 days old.
    pub over_90: Decimal,
}

impl AgingBuckets {
    /// Sum across all four bands.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.current + self.days_31_60 + self.days_61_90 + self.over_90
    }
}

/// One partner row of the aging report.
#[derive(Debug, Clone, Serialize)]
pub struct AgingRow {
    /// The partner.
    pub partner_id: EntityId,
    /// Display name.
    pub name: String,
    /// Which balance sheet line the partner's balance is on.
    pub role: PartnerRole,
    /// Net amounts per age band, oriented so the row total is positive.
    pub buckets: AgingBuckets,
}

/// Receivable/payable balances split into age bands.
#[derive(Debug, Clone, Serialize)]
pub struct AgingReport {
    /// The date ages are measured against.
    pub as_of: NaiveDate,
    /// One row per partner with a nonzero classified balance.
    pub rows: Vec<AgingRow>,
}
