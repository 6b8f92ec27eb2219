//! Versioned, secondary-indexed record storage for the assaychain
//! contract.
//!
//! Layers on the host-ledger seam from `assaychain-ledger`:
//! - [`RecordStore`] - generic upsert/get/exists/list for the record
//!   families described by [`GroupedRecord`] / [`UpsertRecord`]
//! - [`GroupIndex`] - zero-payload grouping indexes over composite keys
//! - [`ModelStore`] - classifier blob storage with its own version counter

pub mod index;
pub mod models;
pub mod record;
pub mod store;

// Re-export commonly used types at crate root
pub use index::{GroupIndex, INDEX_SENTINEL, IndexError};
pub use models::{ModelError, ModelStore};
pub use record::{GroupedRecord, UpsertRecord};
pub use store::{RecordStore, StateError};
