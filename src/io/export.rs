use chrono::{DateTime, Utc};
use csv::{QuoteStyle, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::Write;

use crate::application::AppError;
use crate::domain::{Ledger, Transaction, format_cents};

/// File name offered for CSV downloads
pub const CSV_FILE_NAME: &str = "transactions.csv";

pub const CSV_MIME_TYPE: &str = "text/csv";

pub const CSV_HEADER: [&str; 6] = ["id", "type", "amount", "category", "date", "note"];

/// Full ledger snapshot for JSON backups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
}

/// Write the whole ledger as CSV, every field quoted. Returns the number of
/// records written.
///
/// Line breaks inside text fields are written as single spaces, so N records
/// always take exactly N+1 lines. Active view filters do not apply: export
/// always covers the full ledger.
pub fn write_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize, AppError> {
    if ledger.is_empty() {
        return Err(AppError::NothingToExport);
    }

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for transaction in ledger.transactions() {
        let amount = format_cents(transaction.amount_cents);
        let date = transaction.date_string();
        let id = single_line(&transaction.id);
        let category = single_line(&transaction.category);
        let note = single_line(transaction.note.as_deref().unwrap_or_default());
        csv_writer.write_record([
            &*id,
            transaction.kind.as_str(),
            amount.as_str(),
            &*category,
            date.as_str(),
            &*note,
        ])?;
    }

    csv_writer.flush()?;
    Ok(ledger.len())
}

fn single_line(field: &str) -> Cow<'_, str> {
    if !field.contains(['\r', '\n']) {
        return Cow::Borrowed(field);
    }
    let joined = field
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Cow::Owned(joined)
}

/// Render the whole ledger as CSV text.
pub fn to_csv(ledger: &Ledger) -> Result<String, AppError> {
    let mut buffer = Vec::new();
    write_csv(ledger, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| AppError::Io(std::io::Error::other(e)))
}

/// Write the whole ledger as a pretty-printed JSON snapshot.
pub fn write_json<W: Write>(ledger: &Ledger, mut writer: W) -> Result<LedgerSnapshot, AppError> {
    if ledger.is_empty() {
        return Err(AppError::NothingToExport);
    }

    let snapshot = LedgerSnapshot {
        version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: Utc::now(),
        transactions: ledger.transactions().to_vec(),
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;

    Ok(snapshot)
}
