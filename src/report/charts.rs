//! Chart construction for report exports.
//!
//! Builds the three ECharts visualizations of a report:
//! - **Monthly Income vs Expense**: grouped bar chart of monthly totals
//! - **Balance Trend**: line chart of the running balance
//! - **Expenses by Category**: pie chart of per-category expense totals
//!
//! The charts are plain `charming` configurations; the document export path
//! rasterizes them server-side, and callers embedding charts client-side can
//! serialize them to ECharts JSON instead.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, ItemStyle, Tooltip, Trigger},
    series::{Bar, Line, Pie},
};

use super::aggregate::{BalancePoint, CategoryTotal, MonthlyBucket};

const INCOME_COLOR: &str = "#22c55e";
const EXPENSE_COLOR: &str = "#ef4444";
const BALANCE_COLOR: &str = "#3b82f6";

/// Builds the monthly income vs expense bar chart.
///
/// One bar pair per [MonthlyBucket], in the order given (the bucketer
/// already sorts months ascending). Empty input produces a chart with empty
/// series rather than failing.
pub(super) fn monthly_chart(buckets: &[MonthlyBucket]) -> Chart {
    let labels: Vec<String> = buckets.iter().map(|bucket| bucket.month.clone()).collect();
    let income: Vec<f64> = buckets.iter().map(|bucket| bucket.income_total).collect();
    let expense: Vec<f64> = buckets.iter().map(|bucket| bucket.expense_total).collect();

    Chart::new()
        .title(Title::new().text("Monthly Income vs Expense"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            Bar::new()
                .name("Expense")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expense),
        )
}

/// Builds the running balance line chart, one point per transaction.
pub(super) fn balance_chart(points: &[BalancePoint]) -> Chart {
    let labels: Vec<String> = points.iter().map(|point| point.date.to_string()).collect();
    let balances: Vec<f64> = points.iter().map(|point| point.balance).collect();

    Chart::new()
        .title(Title::new().text("Balance Trend"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            Line::new()
                .name("Balance")
                .item_style(ItemStyle::new().color(BALANCE_COLOR))
                .data(balances),
        )
}

/// Builds the expenses-by-category pie chart.
pub(super) fn category_chart(totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|total| (total.total, total.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Expenses").radius("60%").data(data))
}
