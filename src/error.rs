//! Defines the crate level error type.

/// The errors that may occur while building transactions or exporting reports.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A negative amount was used to create a transaction.
    ///
    /// Amounts are stored unsigned; whether a transaction adds to or
    /// subtracts from a balance is decided by its kind, never by the sign
    /// of the stored amount.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(f64),

    /// An empty string was used as the category of an expense.
    #[error("expense transactions must have a non-empty category")]
    EmptyCategory,

    /// A document export was requested while another one was still in
    /// flight for the same report context.
    ///
    /// Exports share rendering surfaces, so a second generation pass must
    /// not start until the first completes or aborts. Callers should retry
    /// once the active export finishes.
    #[error("a document export is already in progress")]
    ExportInProgress,

    /// A chart could not be rasterized during document export.
    ///
    /// The export is aborted as a whole; no partial artifact is produced.
    #[error("could not render chart: {0}")]
    ChartRender(String),

    /// The tabular export could not be written.
    #[error("could not write CSV export: {0}")]
    Csv(String),
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error.to_string())
    }
}
