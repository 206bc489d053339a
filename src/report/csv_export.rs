//! The tabular (CSV) export of a filtered transaction set.

use crate::{Error, transaction::Transaction};

/// The MIME type of the tabular export.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// The download file name of the tabular export.
pub const CSV_FILE_NAME: &str = "transactions.csv";

const CSV_HEADER: [&str; 5] = ["Date", "Category", "Amount", "Type", "Note"];

/// Serializes transactions as a CSV document.
///
/// Writes the header row followed by one row per transaction in the order
/// given. Category and note fields with embedded separators or quotes are
/// quoted per RFC 4180; an absent note is written as an empty field. An
/// empty input produces a header-only document.
///
/// # Errors
/// Returns [Error::Csv] if the underlying writer fails.
pub fn write_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        writer.write_record([
            transaction.date.to_string().as_str(),
            &transaction.category,
            &transaction.amount.to_string(),
            transaction.kind.as_str(),
            transaction.note.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::Csv(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::Csv(error.to_string()))
}
