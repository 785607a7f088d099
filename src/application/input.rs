use chrono::NaiveDate;

use crate::domain::{Cents, MAX_AMOUNT_CENTS, TransactionType, format_cents, parse_cents};

use super::AppError;

/// Validate a raw amount as typed by the user: must be numeric and positive.
pub fn parse_amount(input: &str) -> Result<Cents, AppError> {
    let cents = parse_cents(input)
        .map_err(|e| AppError::InvalidAmount(format!("'{}': {}", input.trim(), e)))?;
    if cents <= 0 {
        return Err(AppError::InvalidAmount(format!(
            "'{}': amount must be positive",
            input.trim()
        )));
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err(AppError::InvalidAmount(format!(
            "'{}': amount exceeds the maximum of {}",
            input.trim(),
            format_cents(MAX_AMOUNT_CENTS)
        )));
    }
    Ok(cents)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(input.to_string()))
}

pub fn parse_transaction_type(input: &str) -> Result<TransactionType, AppError> {
    input
        .parse()
        .map_err(|_| {
            AppError::InvalidTransactionType(format!("'{}'. Valid: income, expense", input))
        })
}
