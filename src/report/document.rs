//! The printable document export of a report.
//!
//! Produces a self-contained, paginated HTML artifact: a header with the
//! active date range, the three report charts rasterized to SVG, and the
//! full transaction table on a separate page. The artifact is meant to be
//! opened for the user (and printed to PDF from there) rather than
//! downloaded like the CSV export.

use std::sync::atomic::{AtomicBool, Ordering};

use charming::{Chart, ImageRenderer};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

use super::{Report, charts};
use crate::Error;

/// The MIME type of the document export.
pub const DOCUMENT_MIME_TYPE: &str = "text/html";

/// The suggested file name of the document export.
pub const DOCUMENT_FILE_NAME: &str = "financial_report.html";

/// The currency symbol prefixed to amounts in the transaction table.
pub const CURRENCY_PREFIX: &str = "₹";

const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 420;

const DOCUMENT_STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; color: #1f2937; }
h1 { margin-bottom: 0.25rem; }
.date-range { color: #6b7280; margin-bottom: 2rem; }
.chart { margin-bottom: 2rem; }
.page-break { page-break-before: always; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #d1d5db; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f3f4f6; }
.empty { color: #6b7280; font-style: italic; }
";

/// Generates document exports for one report context.
///
/// Only one export may be in flight per exporter at a time: the chart
/// rasterization steps share rendering surfaces, so a second generation
/// pass is rejected with [Error::ExportInProgress] until the first
/// completes or aborts.
#[derive(Debug, Default)]
pub struct DocumentExporter {
    generating: AtomicBool,
}

/// Clears the in-flight flag when an export finishes, on both the success
/// and failure paths.
struct GenerationGuard<'a>(&'a AtomicBool);

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DocumentExporter {
    /// Create an exporter with no export in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document export is currently in flight.
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// Renders the report as a paginated HTML document.
    ///
    /// The three charts are rasterized concurrently on blocking threads;
    /// assembly waits for all of them before producing the artifact. A
    /// report with no transactions still succeeds, producing empty chart
    /// series and a header-only table.
    ///
    /// # Errors
    /// Returns [Error::ExportInProgress] if another export is in flight on
    /// this exporter, or [Error::ChartRender] if any rasterization step
    /// fails. On failure no partial artifact is exposed and the in-flight
    /// flag is cleared.
    pub async fn export(&self, report: &Report) -> Result<String, Error> {
        self.generating
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .map_err(|_| Error::ExportInProgress)?;
        let _guard = GenerationGuard(&self.generating);

        let monthly = charts::monthly_chart(report.monthly_buckets());
        let balance = charts::balance_chart(report.balance_trend());
        let category = charts::category_chart(report.category_totals());

        let (monthly_svg, balance_svg, category_svg) = tokio::try_join!(
            tokio::task::spawn_blocking(move || rasterize(&monthly)),
            tokio::task::spawn_blocking(move || rasterize(&balance)),
            tokio::task::spawn_blocking(move || rasterize(&category)),
        )
        .map_err(|error| {
            tracing::error!("chart rasterization task failed: {error}");
            Error::ChartRender(error.to_string())
        })?;

        let document = document_view(report, &monthly_svg?, &balance_svg?, &category_svg?);

        Ok(document.into_string())
    }
}

/// Rasterizes a chart to an SVG image.
fn rasterize(chart: &Chart) -> Result<String, Error> {
    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);

    renderer.render(chart).map_err(|error| {
        tracing::error!("could not render chart: {error:?}");
        Error::ChartRender(format!("{error:?}"))
    })
}

/// Assembles the full document from the report and its rendered charts.
fn document_view(
    report: &Report,
    monthly_svg: &str,
    balance_svg: &str,
    category_svg: &str,
) -> Markup {
    html!(
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Financial Report" }
                style { (PreEscaped(DOCUMENT_STYLE)) }
            }
            body {
                h1 { "Financial Report" }
                p class="date-range" {
                    (report.bounds().start_label()) " to " (report.bounds().end_label())
                }

                div class="chart" { (PreEscaped(monthly_svg)) }
                div class="chart" { (PreEscaped(balance_svg)) }
                div class="chart" { (PreEscaped(category_svg)) }

                section class="page-break" {
                    h2 { "Transactions" }
                    (transaction_table(report))
                }
            }
        }
    )
}

/// Renders the transaction table, or an empty-state row when the report
/// has no transactions in range.
fn transaction_table(report: &Report) -> Markup {
    html!(
        table {
            thead {
                tr {
                    th { "Date" }
                    th { "Category" }
                    th { "Amount" }
                    th { "Type" }
                    th { "Note" }
                }
            }
            tbody {
                @if report.transactions().is_empty() {
                    tr {
                        td class="empty" colspan="5" { "No transactions in range" }
                    }
                } @else {
                    @for transaction in report.transactions() {
                        tr {
                            td { (transaction.date) }
                            td { (transaction.category) }
                            td { (currency(transaction.amount)) }
                            td { (transaction.kind.as_str()) }
                            td { (transaction.note.as_deref().unwrap_or("")) }
                        }
                    }
                }
            }
        }
    )
}

/// Formats an amount with the fixed currency prefix, e.g. "₹2500.00".
fn currency(amount: f64) -> String {
    let mut formatter = Formatter::currency(CURRENCY_PREFIX)
        .expect("static currency prefix is valid")
        .precision(Precision::Decimals(2));

    let mut formatted = if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        format!("{CURRENCY_PREFIX}0.00")
    } else {
        formatter.fmt_string(amount)
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    // A sub-cent amount may round to a bare "0" with no decimal point at
    // all, so the point cannot be assumed to be present.
    match formatted.rfind('.') {
        Some(point) if formatted.len() - point == 2 => formatted = format!("{formatted}0"),
        Some(_) => {}
        None => formatted = format!("{formatted}.00"),
    }

    formatted
}
