//! The report aggregation and export core.
//!
//! A report is built from an immutable snapshot of transactions plus
//! optional date bounds: the bounds narrow the snapshot, then three
//! independent passes derive the monthly roll-up, the running balance
//! trend, and the per-category expense totals. The derived views feed the
//! UI charts directly and the two export artifacts (CSV and printable
//! document).
//!
//! The aggregation passes are synchronous pure functions over the snapshot;
//! only the document export suspends, and it is guarded against re-entrant
//! generation per report context.

pub mod aggregate;
mod charts;
pub mod csv_export;
pub mod document;
pub mod range;

use serde::Serialize;

use crate::{Error, transaction::Transaction};

use self::{
    aggregate::{BalancePoint, CategoryTotal, MonthlyBucket},
    range::DateBounds,
};

/// Headline totals over the transactions in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportSummary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expenses: f64,
    /// Income minus expenses, on top of the opening balance.
    pub net_balance: f64,
}

/// A point-in-time report over a transaction snapshot.
///
/// Holds the filtered record set and every derived view, computed once at
/// construction. The report never mutates the caller's snapshot and never
/// reaches into ambient storage; re-building a report from the same
/// snapshot yields identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    bounds: DateBounds,
    transactions: Vec<Transaction>,
    monthly_buckets: Vec<MonthlyBucket>,
    balance_trend: Vec<BalancePoint>,
    category_totals: Vec<CategoryTotal>,
    summary: ReportSummary,
}

impl Report {
    /// Build a report over the records of `snapshot` that fall within
    /// `bounds`, with the balance trend starting from zero.
    ///
    /// A zero opening balance makes the trend reset at the range boundary
    /// rather than continue from history; use
    /// [Report::with_opening_balance] to seed it instead.
    pub fn new(snapshot: &[Transaction], bounds: DateBounds) -> Self {
        Self::with_opening_balance(snapshot, bounds, 0.0)
    }

    /// Build a report whose balance trend starts from `opening_balance`,
    /// e.g. the net of all history before the range.
    pub fn with_opening_balance(
        snapshot: &[Transaction],
        bounds: DateBounds,
        opening_balance: f64,
    ) -> Self {
        let transactions = bounds.filter(snapshot);

        let monthly_buckets = aggregate::monthly_buckets(&transactions);
        let balance_trend = aggregate::running_balance(&transactions, opening_balance);
        let category_totals = aggregate::category_totals(&transactions);

        let total_income: f64 = monthly_buckets.iter().map(|b| b.income_total).sum();
        let total_expenses: f64 = monthly_buckets.iter().map(|b| b.expense_total).sum();
        let summary = ReportSummary {
            total_income,
            total_expenses,
            net_balance: opening_balance + total_income - total_expenses,
        };

        Self {
            bounds,
            transactions,
            monthly_buckets,
            balance_trend,
            category_totals,
            summary,
        }
    }

    /// The bounds the report was narrowed to.
    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    /// The transactions in range, in snapshot order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Monthly income/expense totals, sorted ascending by month key.
    pub fn monthly_buckets(&self) -> &[MonthlyBucket] {
        &self.monthly_buckets
    }

    /// The running balance trend, one point per transaction in
    /// chronological order.
    pub fn balance_trend(&self) -> &[BalancePoint] {
        &self.balance_trend
    }

    /// Expense totals per category, in order of first appearance.
    pub fn category_totals(&self) -> &[CategoryTotal] {
        &self.category_totals
    }

    /// Headline totals over the transactions in range.
    pub fn summary(&self) -> ReportSummary {
        self.summary
    }

    /// Serializes the transactions in range as a CSV document.
    ///
    /// See [csv_export::write_csv].
    pub fn to_csv(&self) -> Result<String, Error> {
        csv_export::write_csv(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Report, range::DateBounds};
    use crate::transaction::{Transaction, TransactionKind};

    fn sample_snapshot() -> Vec<Transaction> {
        vec![
            Transaction::build(TransactionKind::Income, 2500.0, date!(2025 - 06 - 01))
                .finalise(1)
                .unwrap(),
            Transaction::build(TransactionKind::Expense, 450.0, date!(2025 - 06 - 08))
                .category("Food")
                .finalise(2)
                .unwrap(),
            Transaction::build(TransactionKind::Income, 2500.0, date!(2025 - 07 - 01))
                .finalise(3)
                .unwrap(),
            Transaction::build(TransactionKind::Expense, 2200.0, date!(2025 - 07 - 14))
                .category("Bills")
                .finalise(4)
                .unwrap(),
        ]
    }

    #[test]
    fn report_derives_all_views_from_the_filtered_set() {
        let snapshot = sample_snapshot();
        let bounds = DateBounds::new(Some(date!(2025 - 07 - 01)), None);

        let report = Report::new(&snapshot, bounds);

        assert_eq!(report.transactions().len(), 2);
        assert_eq!(report.monthly_buckets().len(), 1);
        assert_eq!(report.monthly_buckets()[0].month, "2025-07");
        assert_eq!(report.balance_trend().len(), 2);
        assert_eq!(report.balance_trend()[1].balance, 300.0);
        assert_eq!(report.category_totals().len(), 1);
        assert_eq!(report.category_totals()[0].category, "Bills");
    }

    #[test]
    fn summary_matches_dashboard_stat_cards() {
        let report = Report::new(&sample_snapshot(), DateBounds::default());

        let summary = report.summary();
        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.total_expenses, 2650.0);
        assert_eq!(summary.net_balance, 2350.0);
    }

    #[test]
    fn opening_balance_seeds_trend_and_summary() {
        let snapshot = sample_snapshot();
        let bounds = DateBounds::new(Some(date!(2025 - 07 - 01)), None);

        let report = Report::with_opening_balance(&snapshot, bounds, 2050.0);

        assert_eq!(report.balance_trend()[0].balance, 4550.0);
        assert_eq!(report.summary().net_balance, 2350.0);
    }

    #[test]
    fn rebuilding_from_the_same_snapshot_is_identical() {
        let snapshot = sample_snapshot();
        let bounds = DateBounds::new(None, Some(date!(2025 - 06 - 30)));

        assert_eq!(Report::new(&snapshot, bounds), Report::new(&snapshot, bounds));
    }

    #[test]
    fn empty_snapshot_yields_empty_report_and_header_only_csv() {
        let report = Report::new(&[], DateBounds::default());

        assert!(report.transactions().is_empty());
        assert!(report.monthly_buckets().is_empty());
        assert!(report.balance_trend().is_empty());
        assert!(report.category_totals().is_empty());
        assert_eq!(report.summary().net_balance, 0.0);
        assert_eq!(report.to_csv().unwrap(), "Date,Category,Amount,Type,Note\n");
    }
}
