use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

/// Opaque transaction identifier. Ids read back from storage are kept verbatim.
pub type TransactionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (salary, refunds, interest)
    Income,
    /// Money going out
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded income or expense event.
/// Transactions are immutable once created; they are only ever removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    pub category: String,
    /// Calendar date the event happened on
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a new transaction with a freshly generated id.
    pub fn new(
        kind: TransactionType,
        amount_cents: Cents,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        assert!(amount_cents > 0, "Transaction amount must be positive");
        Self {
            id: generate_id(),
            kind,
            amount_cents,
            category: category.into(),
            date,
            note: None,
        }
    }

    pub fn income(amount_cents: Cents, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Income, amount_cents, category, date)
    }

    pub fn expense(amount_cents: Cents, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Expense, amount_cents, category, date)
    }

    /// Attach a note. Blank notes are dropped.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }

    pub fn with_id(mut self, id: impl Into<TransactionId>) -> Self {
        self.id = id.into();
        self
    }

    /// ISO `yyyy-mm-dd` rendering of the date, the form month filters match against.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Signed contribution to the balance: positive for income, negative for expense.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            TransactionType::Income => self.amount_cents,
            TransactionType::Expense => -self.amount_cents,
        }
    }
}

/// Generate a new opaque transaction id.
pub fn generate_id() -> TransactionId {
    format!("t_{}", Uuid::new_v4().simple())
}
