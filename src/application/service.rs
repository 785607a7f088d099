use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use crate::domain::{
    CategoryBreakdown, Cents, Ledger, Totals, Transaction, TransactionType, ViewFilter,
    category_breakdown, filter_and_sort, totals,
};
use crate::storage::{BlobStore, Repository};

use super::{AppError, LedgerConfig};

/// Application service owning the session state: the in-memory ledger and the
/// store it is persisted to. This is the primary interface for any client.
///
/// Every mutation persists the full ledger before returning. If the write
/// fails, the in-memory ledger is left as it was.
pub struct LedgerService<S: BlobStore = Repository> {
    store: S,
    key: String,
    ledger: Ledger,
}

/// Form input for a new transaction, before an id is assigned
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount_cents: Cents,
    pub category: String,
    /// Defaults to today (UTC) when omitted
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(kind: TransactionType, amount_cents: Cents, category: impl Into<String>) -> Self {
        Self {
            kind,
            amount_cents,
            category: category.into(),
            date: None,
            note: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Everything a UI needs to render the current view
#[derive(Debug, Clone, Serialize)]
pub struct LedgerView {
    /// Filtered transactions, newest first
    pub transactions: Vec<Transaction>,
    /// Totals over the filtered transactions only
    pub totals: Totals,
    pub breakdown: CategoryBreakdown,
}

impl LedgerService<Repository> {
    /// Open the SQLite-backed ledger described by `config`.
    /// Creates the database if it doesn't exist.
    pub async fn open(config: &LedgerConfig) -> Result<Self, AppError> {
        let repo = Repository::open(&config.database).await?;
        Self::load(repo, config.store_key.clone()).await
    }
}

impl<S: BlobStore> LedgerService<S> {
    /// Build a session over `store`, reading the ledger from slot `key`.
    pub async fn load(store: S, key: impl Into<String>) -> Result<Self, AppError> {
        let key = key.into();
        let ledger = load_from_persistence(&store, &key).await?;
        Ok(Self { store, key, ledger })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Re-read the ledger from the store, replacing the in-memory copy.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        self.ledger = load_from_persistence(&self.store, &self.key).await?;
        Ok(())
    }

    /// Validate form input, create the transaction and add it.
    pub async fn record(&mut self, input: NewTransaction) -> Result<Transaction, AppError> {
        if input.amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut transaction =
            Transaction::new(input.kind, input.amount_cents, input.category, date);
        if let Some(note) = input.note {
            transaction = transaction.with_note(note);
        }

        self.add(transaction.clone()).await?;
        Ok(transaction)
    }

    /// Append an already-built transaction and persist.
    pub async fn add(&mut self, transaction: Transaction) -> Result<(), AppError> {
        let mut next = self.ledger.clone();
        let id = transaction.id.clone();
        let kind = transaction.kind;
        let amount = transaction.amount_cents;
        next.add(transaction)?;

        self.commit(next).await?;
        info!(
            "event=transaction_added id={} type={} amount_cents={}",
            id, kind, amount
        );
        Ok(())
    }

    /// Remove the transaction with `id`. Returns false (and writes nothing)
    /// when no such transaction exists.
    pub async fn remove(&mut self, id: &str) -> Result<bool, AppError> {
        if !self.ledger.contains(id) {
            debug!("event=transaction_remove id={} status=not_found", id);
            return Ok(false);
        }

        let mut next = self.ledger.clone();
        let removed = next.remove(id);
        self.commit(next).await?;
        info!("event=transaction_removed id={} count={}", id, removed);
        Ok(true)
    }

    /// Drop every transaction. Returns how many were dropped.
    pub async fn clear(&mut self) -> Result<usize, AppError> {
        let mut next = self.ledger.clone();
        let dropped = next.clear();
        self.commit(next).await?;
        info!("event=ledger_cleared count={}", dropped);
        Ok(dropped)
    }

    /// Filter, sort and aggregate the ledger for display.
    pub fn view(&self, filter: &ViewFilter) -> LedgerView {
        let transactions = filter_and_sort(self.ledger.transactions(), filter);
        let totals = totals(&transactions);
        let breakdown = category_breakdown(&transactions);
        LedgerView {
            transactions,
            totals,
            breakdown,
        }
    }

    async fn commit(&mut self, next: Ledger) -> Result<(), AppError> {
        let blob = serde_json::to_string(&next)?;
        self.store.write(&self.key, &blob).await?;
        debug!(
            "event=ledger_persisted key={} records={} bytes={}",
            self.key,
            next.len(),
            blob.len()
        );
        self.ledger = next;
        Ok(())
    }
}

/// Read the ledger stored under `key`.
///
/// A missing slot, a blob that does not parse, or records that break ledger
/// invariants all yield an empty ledger. Only backend failures are errors.
pub async fn load_from_persistence<S: BlobStore>(store: &S, key: &str) -> Result<Ledger, AppError> {
    let Some(blob) = store.read(key).await? else {
        debug!("event=ledger_load key={} status=empty", key);
        return Ok(Ledger::new());
    };

    match decode_ledger(&blob) {
        Ok(ledger) => {
            debug!(
                "event=ledger_load key={} status=ok records={}",
                key,
                ledger.len()
            );
            Ok(ledger)
        }
        Err(reason) => {
            warn!(
                "event=ledger_load key={} status=reset reason=\"{}\"",
                key, reason
            );
            Ok(Ledger::new())
        }
    }
}

fn decode_ledger(blob: &str) -> Result<Ledger, String> {
    let transactions: Vec<Transaction> =
        serde_json::from_str(blob).map_err(|e| format!("unreadable blob: {}", e))?;
    Ledger::from_transactions(transactions).map_err(|e| e.to_string())
}
