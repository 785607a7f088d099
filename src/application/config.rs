/// Slot name the ledger blob is stored under.
pub const DEFAULT_STORE_KEY: &str = "expense_tracker_v1";

pub const DEFAULT_DATABASE: &str = "kharcha.db";

pub const DEFAULT_CURRENCY: &str = "₹";

/// Runtime settings for a ledger session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// SQLite database file path
    pub database: String,
    /// Key-value slot holding the ledger
    pub store_key: String,
    /// Symbol printed in front of amounts
    pub currency: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_store_key(mut self, store_key: impl Into<String>) -> Self {
        self.store_key = store_key.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}
