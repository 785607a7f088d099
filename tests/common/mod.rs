// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use kharcha::application::{LedgerConfig, LedgerService, NewTransaction};
use kharcha::domain::{Transaction, TransactionType};
use tempfile::TempDir;

/// Helper to build a config pointing at a database inside `temp_dir`
pub fn test_config(temp_dir: &TempDir) -> LedgerConfig {
    let db_path = temp_dir.path().join("test.db");
    LedgerConfig::default().with_database(db_path.to_str().unwrap())
}

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = LedgerService::open(&test_config(&temp_dir)).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub async fn record(
    service: &mut LedgerService,
    kind: TransactionType,
    amount: i64,
    category: &str,
    date: &str,
) -> Result<Transaction> {
    let input = NewTransaction::new(kind, amount, category).on(parse_date(date));
    Ok(service.record(input).await?)
}

/// Test fixture: a few months of typical activity
pub struct SampleLedger;

impl SampleLedger {
    /// Salary on 2024-01-05 and a Food expense on 2024-01-10
    pub async fn salary_and_food(service: &mut LedgerService) -> Result<()> {
        record(service, TransactionType::Income, 100000, "Salary", "2024-01-05").await?;
        record(service, TransactionType::Expense, 25000, "Food", "2024-01-10").await?;
        Ok(())
    }

    /// January through March with notes, mixed categories and a shared date
    pub async fn quarter(service: &mut LedgerService) -> Result<()> {
        Self::salary_and_food(service).await?;

        let entries = [
            (TransactionType::Expense, 4500, "Transport", "2024-01-22", Some("Metro card")),
            (TransactionType::Income, 100000, "Salary", "2024-02-05", None),
            (TransactionType::Expense, 1800, "Food", "2024-02-14", Some("Pizza with Asha")),
            (TransactionType::Expense, 60000, "Rent", "2024-03-01", None),
            (TransactionType::Income, 100000, "Salary", "2024-03-05", None),
            (TransactionType::Expense, 3200, "Groceries", "2024-03-05", Some("weekly shop")),
            (TransactionType::Income, 2000, "Refund", "2024-03-18", Some("pizza overcharge")),
        ];
        for (kind, amount, category, date, note) in entries {
            let mut input = NewTransaction::new(kind, amount, category).on(parse_date(date));
            if let Some(note) = note {
                input = input.with_note(note);
            }
            service.record(input).await?;
        }
        Ok(())
    }
}
