use thiserror::Error;

use crate::domain::{LedgerError, TransactionId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Transaction already exists: {0}")]
    DuplicateTransaction(TransactionId),

    #[error("No transactions to export")]
    NothingToExport,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicateId(id) => AppError::DuplicateTransaction(id),
            LedgerError::NonPositiveAmount { amount, .. } => {
                AppError::InvalidAmount(format!("{} cents is not positive", amount))
            }
            err @ (LedgerError::AmountTooLarge { .. } | LedgerError::VolumeOverflow(_)) => {
                AppError::InvalidAmount(err.to_string())
            }
        }
    }
}
