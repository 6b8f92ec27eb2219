//! The host-ledger seam.
//!
//! Everything above this crate treats the replicated ledger as an opaque
//! key-value service behind [`LedgerState`]. Replication, consensus,
//! transaction ordering, and cross-invocation concurrency control all live
//! on the host side of this trait; the contract only requires that a write
//! reads the latest state within its own invocation.

use chrono::{DateTime, Utc};
use snafu::Snafu;

use crate::cursor::KeyCursor;

/// Errors surfaced by a host-ledger adapter.
#[derive(Debug, Snafu)]
pub enum LedgerError {
    /// The host ledger rejected or failed an operation.
    #[snafu(display("ledger backend failure: {message}"))]
    Backend {
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// The host could not supply a transaction timestamp.
    #[snafu(display("transaction timestamp unavailable: {message}"))]
    Timestamp {
        message: String,
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Key-value view of the host ledger, scoped to one logical transaction.
///
/// Keys are strings, values opaque bytes. All methods are synchronous; a
/// call either returns a result or a terminal error, with no retries at
/// this layer.
pub trait LedgerState {
    /// Reads the value under `key`. Absence is `Ok(None)`, never an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes `value` under `key`, overwriting any prior value.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes `key`. Deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Opens a lazy cursor over all keys beginning with `prefix`, in
    /// lexicographic order. The cursor releases its host resources on drop,
    /// on every exit path.
    fn scan_prefix(&self, prefix: &str) -> Result<KeyCursor<'_>>;

    /// The transaction timestamp assigned by the host. Fixed for the
    /// duration of one invocation.
    fn tx_timestamp(&self) -> Result<DateTime<Utc>>;
}
