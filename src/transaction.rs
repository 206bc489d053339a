//! Defines the core transaction record consumed by the reporting engine.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The category label assigned to income transactions created without an
/// explicit category.
pub const INCOME_LABEL: &str = "Income";

/// The ID of a transaction.
///
/// IDs are assigned by the persistence layer when a record is created and
/// are opaque to the reporting engine, which only relies on their
/// uniqueness within a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Wrap a raw ID produced by the persistence layer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw ID as assigned by the persistence layer.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TransactionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Whether a transaction adds money to or removes money from the balance.
///
/// The stored amount of a transaction is always non-negative; the kind alone
/// decides the sign of its contribution to every aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The lowercase label used in exports, e.g. "income".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The label the transaction is grouped under in category breakdowns.
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always non-negative; see [TransactionKind] for the sign convention.
    pub amount: f64,
    /// The calendar date the transaction happened on.
    ///
    /// There are no time-of-day semantics; grouping and ordering operate on
    /// the date alone. Its `YYYY-MM-DD` textual form sorts lexicographically
    /// equal to chronological order, which the aggregation code relies on.
    pub date: Date,
    /// An optional free-text annotation.
    pub note: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(kind: TransactionKind, amount: f64, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            date,
            category: None,
            note: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Provides defaults for the optional fields and enforces the record
/// invariants when [TransactionBuilder::finalise] is called.
///
/// # Examples
///
/// ```
/// use time::macros::date;
///
/// use finreport::{Transaction, TransactionKind};
///
/// let groceries = Transaction::build(TransactionKind::Expense, 45.99, date!(2025 - 01 - 15))
///     .category("Food")
///     .note("Weekly shop")
///     .finalise(1)
///     .unwrap();
///
/// assert_eq!(groceries.category, "Food");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    kind: TransactionKind,
    amount: f64,
    date: Date,
    category: Option<String>,
    note: Option<String>,
}

impl TransactionBuilder {
    /// Set the category label for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Set the free-text note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_owned());
        self
    }

    /// Create the transaction, assigning it `id`.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if the amount is negative, or
    /// [Error::EmptyCategory] if an expense has no category. Income
    /// transactions without a category fall back to [INCOME_LABEL].
    pub fn finalise(self, id: impl Into<TransactionId>) -> Result<Transaction, Error> {
        if self.amount < 0.0 {
            return Err(Error::NegativeAmount(self.amount));
        }

        let category = match (self.kind, self.category) {
            (_, Some(category)) if !category.trim().is_empty() => category,
            (TransactionKind::Income, _) => INCOME_LABEL.to_owned(),
            (TransactionKind::Expense, _) => return Err(Error::EmptyCategory),
        };

        Ok(Transaction {
            id: id.into(),
            kind: self.kind,
            category,
            amount: self.amount,
            date: self.date,
            note: self.note,
        })
    }
}
