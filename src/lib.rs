//! Finreport is the report aggregation and export engine of a personal
//! finance tracker.
//!
//! The surrounding application owns persistence, HTTP, and the UI; this
//! library consumes an immutable snapshot of transaction records per call
//! and produces aggregated views (monthly roll-ups, running balance trend,
//! category totals) plus two export artifacts: a CSV download and a
//! printable document with embedded charts.

#![warn(missing_docs)]

mod error;
mod report;
mod transaction;

pub use error::Error;
pub use report::{
    Report, ReportSummary,
    csv_export::{CSV_FILE_NAME, CSV_MIME_TYPE, write_csv},
    document::{CURRENCY_PREFIX, DOCUMENT_FILE_NAME, DOCUMENT_MIME_TYPE, DocumentExporter},
    range::{DateBounds, UNBOUNDED_END_LABEL, UNBOUNDED_START_LABEL},
};
pub use report::aggregate::{
    BalancePoint, CategoryTotal, MonthlyBucket, category_totals, monthly_buckets, running_balance,
};
pub use transaction::{
    INCOME_LABEL, Transaction, TransactionBuilder, TransactionId, TransactionKind,
};
