//! Host-ledger seam for the assaychain contract.
//!
//! This crate owns the narrow boundary between the contract and the host
//! platform's replicated key-value ledger:
//! - [`LedgerState`] - the get/put/delete/scan/timestamp trait
//! - Composite key encoding and prefix scans for secondary indexes
//! - [`KeyCursor`] - scoped scan cursors, released on drop
//! - [`MemoryLedger`] - the in-memory implementation backing every test

pub mod composite;
pub mod cursor;
pub mod memory;
pub mod state;

// Re-export commonly used types at crate root
pub use composite::{
    CompositeKeyError, ScanError, encode_composite, encode_partial, scan_composite,
    split_composite,
};
pub use cursor::{CursorGuard, KeyCursor};
pub use memory::MemoryLedger;
pub use state::{LedgerError, LedgerState};
