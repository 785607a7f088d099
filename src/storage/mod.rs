use std::future::Future;

use anyhow::Result;

mod memory;
mod repository;

pub use memory::*;
pub use repository::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// A store of named text blobs.
///
/// The ledger is persisted as one blob, overwritten wholesale on every write.
pub trait BlobStore {
    /// Read the blob stored under `key`, or `None` if the slot is empty.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}
