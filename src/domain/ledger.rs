use std::collections::HashSet;

use serde::Serialize;

use super::{Cents, MAX_AMOUNT_CENTS, Transaction, TransactionId};

/// The full collection of transactions for one user.
///
/// Insertion order carries no meaning for display (views re-sort by date) but
/// is preserved so removals leave the remaining records untouched.
///
/// The sum of all amounts always fits in a [`Cents`], so income, expense and
/// balance over any subset can be computed without overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from raw records, checking every invariant.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, LedgerError> {
        let mut seen = HashSet::with_capacity(transactions.len());
        let mut volume: Cents = 0;
        for transaction in &transactions {
            validate_amount(transaction)?;
            if !seen.insert(transaction.id.as_str()) {
                return Err(LedgerError::DuplicateId(transaction.id.clone()));
            }
            volume = add_volume(volume, transaction)?;
        }
        Ok(Self { transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sum of every amount regardless of type.
    pub fn volume(&self) -> Cents {
        self.transactions.iter().map(|t| t.amount_cents).sum()
    }

    /// Append a transaction.
    pub fn add(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        validate_amount(&transaction)?;
        if self.contains(&transaction.id) {
            return Err(LedgerError::DuplicateId(transaction.id));
        }
        add_volume(self.volume(), &transaction)?;
        self.transactions.push(transaction);
        Ok(())
    }

    /// Remove every transaction with the given id. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        before - self.transactions.len()
    }

    /// Drop every transaction. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.transactions.len();
        self.transactions.clear();
        dropped
    }
}

fn validate_amount(transaction: &Transaction) -> Result<(), LedgerError> {
    if transaction.amount_cents <= 0 {
        return Err(LedgerError::NonPositiveAmount {
            id: transaction.id.clone(),
            amount: transaction.amount_cents,
        });
    }
    if transaction.amount_cents > MAX_AMOUNT_CENTS {
        return Err(LedgerError::AmountTooLarge {
            id: transaction.id.clone(),
            amount: transaction.amount_cents,
        });
    }
    Ok(())
}

fn add_volume(volume: Cents, transaction: &Transaction) -> Result<Cents, LedgerError> {
    volume
        .checked_add(transaction.amount_cents)
        .ok_or_else(|| LedgerError::VolumeOverflow(transaction.id.clone()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    DuplicateId(TransactionId),
    NonPositiveAmount { id: TransactionId, amount: Cents },
    AmountTooLarge { id: TransactionId, amount: Cents },
    /// Adding the transaction would push the ledger total past `Cents::MAX`
    VolumeOverflow(TransactionId),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::DuplicateId(id) => write!(f, "Transaction id already in ledger: {}", id),
            LedgerError::NonPositiveAmount { id, amount } => {
                write!(
                    f,
                    "Transaction {} has non-positive amount ({} cents)",
                    id, amount
                )
            }
            LedgerError::AmountTooLarge { id, amount } => {
                write!(
                    f,
                    "Transaction {} amount exceeds the maximum ({} cents)",
                    id, amount
                )
            }
            LedgerError::VolumeOverflow(id) => {
                write!(f, "Transaction {} would overflow the ledger total", id)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
