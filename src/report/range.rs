//! Date-range narrowing for report snapshots.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::Transaction;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The placeholder shown in report headers when no start bound is set.
pub const UNBOUNDED_START_LABEL: &str = "Start";

/// The placeholder shown in report headers when no end bound is set.
pub const UNBOUNDED_END_LABEL: &str = "End";

/// An optional, inclusive date interval used to narrow a report to a
/// sub-range of the snapshot.
///
/// Either side may be absent, meaning unbounded on that side. The default
/// value has no bounds and therefore matches every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    /// The inclusive lower bound, if any.
    pub start: Option<Date>,
    /// The inclusive upper bound, if any.
    pub end: Option<Date>,
}

impl DateBounds {
    /// Create bounds from already-parsed dates.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// Parse bounds from `YYYY-MM-DD` strings.
    ///
    /// The filter is a convenience narrowing, not a validation gate: a
    /// bound that fails to parse is treated as absent rather than raised
    /// as an error, and is logged at the debug level.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: parse_bound("start", start),
            end: parse_bound("end", end),
        }
    }

    /// Whether `date` falls within the bounds.
    ///
    /// An absent bound imposes no constraint on that side.
    pub fn contains(&self, date: Date) -> bool {
        if let Some(start) = self.start
            && date < start
        {
            return false;
        }

        if let Some(end) = self.end
            && date > end
        {
            return false;
        }

        true
    }

    /// Return the subset of `transactions` whose date falls within the
    /// bounds, preserving input order.
    ///
    /// An empty result is valid and handled by every downstream aggregate
    /// without special-casing.
    pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.contains(transaction.date))
            .cloned()
            .collect()
    }

    /// The start bound in `YYYY-MM-DD` form, or [UNBOUNDED_START_LABEL].
    pub fn start_label(&self) -> String {
        match self.start {
            Some(date) => date.to_string(),
            None => UNBOUNDED_START_LABEL.to_owned(),
        }
    }

    /// The end bound in `YYYY-MM-DD` form, or [UNBOUNDED_END_LABEL].
    pub fn end_label(&self) -> String {
        match self.end {
            Some(date) => date.to_string(),
            None => UNBOUNDED_END_LABEL.to_owned(),
        }
    }
}

fn parse_bound(side: &str, value: Option<&str>) -> Option<Date> {
    let text = value?;

    match Date::parse(text, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(error) => {
            tracing::debug!("ignoring unparseable {side} bound {text:?}: {error}");
            None
        }
    }
}
