//! Generic versioned record store.
//!
//! One store implementation serves every record family: a JSON record under
//! a primary key, a version counter and timestamp trackers maintained by
//! the store, and a grouping index entry for enumeration. Families with
//! upsert semantics go through [`RecordStore::upsert`]; the create-once
//! assay family composes the read side here with its own write path at the
//! contract layer.

use snafu::{OptionExt, ResultExt, Snafu};

use assaychain_ledger::{LedgerError, LedgerState};
use assaychain_types::{CodecError, ValidationError, decode_record, encode_record, require};

use crate::index::{GroupIndex, IndexError};
use crate::record::{GroupedRecord, UpsertRecord};

/// Errors returned by [`RecordStore`] operations.
#[derive(Debug, Snafu)]
pub enum StateError {
    /// A required argument was missing or empty; nothing was read or
    /// written.
    #[snafu(display("invalid argument: {source}"))]
    Validation { source: ValidationError },

    /// Underlying ledger operation failed.
    #[snafu(display("ledger error: {source}"))]
    Ledger {
        source: LedgerError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Stored bytes under `key` failed to parse. Always fatal, never
    /// defaulted.
    #[snafu(display("corrupt record under {key:?}: {source}"))]
    Corrupt {
        key: String,
        source: CodecError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// A record could not be serialized for storage.
    #[snafu(display("record encoding failed: {source}"))]
    Encode { source: CodecError },

    /// No record stored under `key`.
    #[snafu(display("record {key:?} not found"))]
    NotFound { key: String },

    /// Grouping index operation failed.
    #[snafu(display("index error: {source}"))]
    Index {
        source: IndexError,
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StateError>;

/// Generic store operations over a [`LedgerState`].
pub struct RecordStore;

impl RecordStore {
    /// Stores or updates the record under `key`.
    ///
    /// On first store the record is created at version 0 with both
    /// timestamps set to the transaction timestamp, and one grouping index
    /// entry is written under `R::GROUP_INDEX`. On every later store the
    /// version increments and `last_updated_at` advances.
    ///
    /// The grouping attribute is pinned at creation: a different `group`
    /// passed on a later store of the same `key` is silently ignored and
    /// the index entry is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Validation` for an empty argument before any
    /// ledger access, and `StateError::Corrupt` if the existing stored
    /// bytes fail to parse.
    pub fn upsert<L: LedgerState, R: UpsertRecord>(
        ledger: &mut L,
        group: &str,
        key: &str,
    ) -> Result<R> {
        require("group_key", group).context(ValidationSnafu)?;
        require("primary_key", key).context(ValidationSnafu)?;

        let at = ledger.tx_timestamp().context(LedgerSnafu)?;

        let record = match ledger.get(key).context(LedgerSnafu)? {
            Some(bytes) => {
                let mut existing: R =
                    decode_record(&bytes).context(CorruptSnafu { key })?;
                existing.refresh(at);
                existing
            },
            None => {
                GroupIndex::insert(ledger, R::GROUP_INDEX, group, key).context(IndexSnafu)?;
                R::create(group, key, at)
            },
        };

        let bytes = encode_record(&record).context(EncodeSnafu)?;
        ledger.put(key, &bytes).context(LedgerSnafu)?;
        Ok(record)
    }

    /// Reads the record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::NotFound` if absent and `StateError::Corrupt`
    /// if the stored bytes fail to parse.
    pub fn get<L: LedgerState, R: GroupedRecord>(ledger: &L, key: &str) -> Result<R> {
        require("primary_key", key).context(ValidationSnafu)?;
        let bytes = ledger
            .get(key)
            .context(LedgerSnafu)?
            .context(NotFoundSnafu { key })?;
        decode_record(&bytes).context(CorruptSnafu { key })
    }

    /// Whether a record is stored under `key`. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Ledger` if the lookup itself fails.
    pub fn exists<L: LedgerState>(ledger: &L, key: &str) -> Result<bool> {
        require("primary_key", key).context(ValidationSnafu)?;
        Ok(ledger.get(key).context(LedgerSnafu)?.is_some())
    }

    /// Returns every record of family `R` whose grouping attribute equals
    /// `group`, by scanning the grouping index and re-fetching each hit
    /// under its primary key.
    ///
    /// Any failed re-fetch fails the whole call; no partial result set is
    /// ever returned.
    ///
    /// # Errors
    ///
    /// Returns `StateError::NotFound` for an index entry whose record is
    /// missing and `StateError::Corrupt` for one that fails to parse.
    pub fn list_by_group<L: LedgerState, R: GroupedRecord>(
        ledger: &L,
        group: &str,
    ) -> Result<Vec<R>> {
        require("group_key", group).context(ValidationSnafu)?;

        let keys =
            GroupIndex::primary_keys(ledger, R::GROUP_INDEX, group).context(IndexSnafu)?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            records.push(Self::get(ledger, &key)?);
        }
        Ok(records)
    }
}
