//! Pure aggregation passes over a transaction snapshot.
//!
//! Provides the three derived views the dashboard and report exports are
//! built from: monthly income/expense roll-ups, the running balance trend,
//! and per-category expense totals. Each pass is a total, deterministic
//! function of its input; re-running one on the same snapshot yields
//! identical output.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// The month key in fixed-width `YYYY-MM` form.
    pub month: String,
    /// The sum of income amounts that month.
    pub income_total: f64,
    /// The sum of expense amounts that month.
    pub expense_total: f64,
}

/// The balance after applying one transaction, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    /// The date of the transaction this point reflects.
    pub date: Date,
    /// The cumulative net of income minus expense up to and including the
    /// transaction.
    pub balance: f64,
}

/// The total spent in one expense category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category label, matched by exact string equality.
    pub category: String,
    /// The sum of expense amounts in the category.
    pub total: f64,
}

/// The `YYYY-MM` grouping key for a date.
///
/// The key must stay fixed-width and zero-padded: bucket ordering is plain
/// string comparison, which matches chronological order only for this form.
fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Groups transactions by calendar month and sums amounts by kind.
///
/// # Returns
/// One [MonthlyBucket] per month that has at least one transaction, sorted
/// ascending by month key. Months with no records never appear; gaps are
/// not zero-filled.
pub fn monthly_buckets(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut totals: HashMap<String, (f64, f64)> = HashMap::new();

    for transaction in transactions {
        let (income, expense) = totals.entry(month_key(transaction.date)).or_default();

        match transaction.kind {
            TransactionKind::Income => *income += transaction.amount,
            TransactionKind::Expense => *expense += transaction.amount,
        }
    }

    let mut buckets: Vec<MonthlyBucket> = totals
        .into_iter()
        .map(|(month, (income_total, expense_total))| MonthlyBucket {
            month,
            income_total,
            expense_total,
        })
        .collect();
    buckets.sort_by(|a, b| a.month.cmp(&b.month));

    buckets
}

/// Computes the chronological running balance of a snapshot.
///
/// Sorts a copy of the input by date (stable, so same-day transactions keep
/// their snapshot order) and folds left to right from `opening_balance`,
/// adding income and subtracting expenses. Emits one [BalancePoint] per
/// transaction, reflecting the balance after applying it.
///
/// The fold never consults records outside the given snapshot. Callers that
/// want the trend to continue from history before the filtered range must
/// supply that history's net as `opening_balance`; passing `0.0` makes the
/// trend reset at the range boundary.
pub fn running_balance(transactions: &[Transaction], opening_balance: f64) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut balance = opening_balance;
    ordered
        .into_iter()
        .map(|transaction| {
            balance += signed_amount(transaction);
            BalancePoint {
                date: transaction.date,
                balance,
            }
        })
        .collect()
}

/// Sums expense amounts per category.
///
/// Income transactions are ignored. Categories are grouped by exact string
/// equality, with no case or whitespace normalization, and appear in order
/// of first appearance in the snapshot; consumers that need a fixed sort
/// apply their own.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_category: HashMap<String, usize> = HashMap::new();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        match index_by_category.get(&transaction.category) {
            Some(&index) => totals[index].total += transaction.amount,
            None => {
                index_by_category.insert(transaction.category.clone(), totals.len());
                totals.push(CategoryTotal {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                });
            }
        }
    }

    totals
}

/// The signed contribution of a transaction to a balance.
pub(crate) fn signed_amount(transaction: &Transaction) -> f64 {
    match transaction.kind {
        TransactionKind::Income => transaction.amount,
        TransactionKind::Expense => -transaction.amount,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{category_totals, monthly_buckets, month_key, running_balance};
    use crate::transaction::{Transaction, TransactionKind};

    fn transaction(
        id: i64,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        date: time::Date,
    ) -> Transaction {
        Transaction::build(kind, amount, date)
            .category(category)
            .finalise(id)
            .unwrap()
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            transaction(
                1,
                TransactionKind::Income,
                "Salary",
                2500.0,
                date!(2025 - 06 - 01),
            ),
            transaction(
                2,
                TransactionKind::Expense,
                "Food",
                450.0,
                date!(2025 - 06 - 08),
            ),
            transaction(
                3,
                TransactionKind::Expense,
                "Food",
                120.0,
                date!(2025 - 07 - 02),
            ),
            transaction(
                4,
                TransactionKind::Expense,
                "Bills",
                2200.0,
                date!(2025 - 07 - 14),
            ),
            transaction(
                5,
                TransactionKind::Income,
                "Salary",
                2500.0,
                date!(2025 - 07 - 01),
            ),
        ]
    }

    #[test]
    fn buckets_group_by_month_and_kind() {
        let buckets = monthly_buckets(&sample_transactions());

        assert_eq!(buckets.len(), 2, "want 2 months, got {buckets:#?}");

        assert_eq!(buckets[0].month, "2025-06");
        assert_eq!(buckets[0].income_total, 2500.0);
        assert_eq!(buckets[0].expense_total, 450.0);

        assert_eq!(buckets[1].month, "2025-07");
        assert_eq!(buckets[1].income_total, 2500.0);
        assert_eq!(buckets[1].expense_total, 2320.0);
    }

    #[test]
    fn buckets_conserve_totals() {
        let transactions = sample_transactions();
        let buckets = monthly_buckets(&transactions);

        let bucket_income: f64 = buckets.iter().map(|b| b.income_total).sum();
        let bucket_expense: f64 = buckets.iter().map(|b| b.expense_total).sum();

        let input_income: f64 = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let input_expense: f64 = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        assert_eq!(bucket_income, input_income);
        assert_eq!(bucket_expense, input_expense);
    }

    #[test]
    fn month_keys_are_zero_padded() {
        // Bucket ordering is plain string comparison, which is only
        // chronological while the key stays fixed-width.
        assert_eq!(month_key(date!(2025 - 08 - 31)), "2025-08");
        assert_eq!(month_key(date!(2025 - 12 - 01)), "2025-12");
        assert!(month_key(date!(2025 - 08 - 31)) < month_key(date!(2025 - 12 - 01)));
    }

    #[test]
    fn balance_fold_applies_sign_by_kind() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Income,
                "Salary",
                100.0,
                date!(2025 - 07 - 01),
            ),
            transaction(
                2,
                TransactionKind::Expense,
                "Food",
                40.0,
                date!(2025 - 07 - 02),
            ),
            transaction(
                3,
                TransactionKind::Income,
                "Refund",
                10.0,
                date!(2025 - 07 - 03),
            ),
        ];

        let points = running_balance(&transactions, 0.0);

        let balances: Vec<f64> = points.iter().map(|p| p.balance).collect();
        assert_eq!(balances, vec![100.0, 60.0, 70.0]);
    }

    #[test]
    fn balance_fold_sorts_by_date_without_mutating_input() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Expense,
                "Food",
                40.0,
                date!(2025 - 07 - 02),
            ),
            transaction(
                2,
                TransactionKind::Income,
                "Salary",
                100.0,
                date!(2025 - 07 - 01),
            ),
        ];
        let snapshot = transactions.clone();

        let points = running_balance(&transactions, 0.0);

        assert_eq!(points[0].date, date!(2025 - 07 - 01));
        assert_eq!(points[0].balance, 100.0);
        assert_eq!(points[1].balance, 60.0);
        assert_eq!(transactions, snapshot, "want input order untouched");
    }

    #[test]
    fn balance_fold_keeps_same_day_ties_in_snapshot_order() {
        let same_day = date!(2025 - 07 - 01);
        let transactions = vec![
            transaction(1, TransactionKind::Income, "Salary", 100.0, same_day),
            transaction(2, TransactionKind::Expense, "Food", 30.0, same_day),
            transaction(3, TransactionKind::Expense, "Bills", 20.0, same_day),
        ];

        let points = running_balance(&transactions, 0.0);

        let balances: Vec<f64> = points.iter().map(|p| p.balance).collect();
        assert_eq!(balances, vec![100.0, 70.0, 50.0]);
    }

    #[test]
    fn balance_fold_starts_from_opening_balance() {
        let transactions = vec![transaction(
            1,
            TransactionKind::Expense,
            "Food",
            40.0,
            date!(2025 - 07 - 02),
        )];

        let points = running_balance(&transactions, 1000.0);

        assert_eq!(points[0].balance, 960.0);
    }

    #[test]
    fn category_totals_sum_expenses_and_ignore_income() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Expense,
                "Food",
                450.0,
                date!(2025 - 07 - 01),
            ),
            transaction(
                2,
                TransactionKind::Income,
                "Salary",
                2500.0,
                date!(2025 - 07 - 01),
            ),
            transaction(
                3,
                TransactionKind::Expense,
                "Food",
                120.0,
                date!(2025 - 07 - 02),
            ),
            transaction(
                4,
                TransactionKind::Expense,
                "Bills",
                2200.0,
                date!(2025 - 07 - 03),
            ),
        ];

        let totals = category_totals(&transactions);

        assert_eq!(totals.len(), 2, "want income excluded, got {totals:#?}");
        assert_eq!(totals[0].category, "Food");
        assert_eq!(totals[0].total, 570.0);
        assert_eq!(totals[1].category, "Bills");
        assert_eq!(totals[1].total, 2200.0);
    }

    #[test]
    fn category_totals_keep_first_appearance_order_and_exact_labels() {
        let transactions = vec![
            transaction(
                1,
                TransactionKind::Expense,
                "bills",
                10.0,
                date!(2025 - 07 - 01),
            ),
            transaction(
                2,
                TransactionKind::Expense,
                "Bills",
                20.0,
                date!(2025 - 07 - 02),
            ),
            transaction(
                3,
                TransactionKind::Expense,
                "bills",
                5.0,
                date!(2025 - 07 - 03),
            ),
        ];

        let totals = category_totals(&transactions);

        // No case normalization: "bills" and "Bills" are distinct groups.
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "bills");
        assert_eq!(totals[0].total, 15.0);
        assert_eq!(totals[1].category, "Bills");
    }

    #[test]
    fn aggregates_are_idempotent() {
        let transactions = sample_transactions();

        assert_eq!(
            monthly_buckets(&transactions),
            monthly_buckets(&transactions)
        );
        assert_eq!(
            running_balance(&transactions, 0.0),
            running_balance(&transactions, 0.0)
        );
        assert_eq!(
            category_totals(&transactions),
            category_totals(&transactions)
        );
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        assert!(monthly_buckets(&[]).is_empty());
        assert!(running_balance(&[], 0.0).is_empty());
        assert!(category_totals(&[]).is_empty());
    }
}
