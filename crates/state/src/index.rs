//! Grouping indexes.
//!
//! Each record family keeps one secondary index relating its grouping
//! attribute to its primary keys. Index entries are zero-payload markers:
//! the entire informational content is the composite key itself, and the
//! stored value is a single sentinel byte. Hits are resolved by re-fetching
//! the record under its primary key.

use snafu::{IntoError, ResultExt, Snafu};

use assaychain_ledger::{
    CompositeKeyError, LedgerError, LedgerState, ScanError, encode_composite, scan_composite,
};
use assaychain_types::ValidationError;

/// Payload stored under every index entry.
pub const INDEX_SENTINEL: [u8; 1] = [0x00];

/// Errors returned by [`GroupIndex`] operations.
#[derive(Debug, Snafu)]
pub enum IndexError {
    /// An index attribute failed validation.
    #[snafu(display("invalid index attribute: {source}"))]
    Key { source: ValidationError },

    /// A stored index key could not be split back into attributes.
    #[snafu(display("malformed index entry: {source}"))]
    Malformed {
        source: CompositeKeyError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Underlying ledger operation failed.
    #[snafu(display("ledger error: {source}"))]
    Ledger {
        source: LedgerError,
        #[snafu(implicit)]
        location: snafu::Location,
    },
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Zero-payload grouping index over composite keys.
pub struct GroupIndex;

impl GroupIndex {
    /// Writes the index entry relating `group` to `key` under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Key` if an attribute fails validation and
    /// `IndexError::Ledger` if the write fails.
    pub fn insert<L: LedgerState>(
        ledger: &mut L,
        namespace: &str,
        group: &str,
        key: &str,
    ) -> Result<()> {
        let index_key = encode_composite(namespace, &[group, key]).context(KeySnafu)?;
        ledger.put(&index_key, &INDEX_SENTINEL).context(LedgerSnafu)
    }

    /// Removes the index entry relating `group` to `key`. Removing an
    /// absent entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Key` if an attribute fails validation and
    /// `IndexError::Ledger` if the delete fails.
    pub fn remove<L: LedgerState>(
        ledger: &mut L,
        namespace: &str,
        group: &str,
        key: &str,
    ) -> Result<()> {
        let index_key = encode_composite(namespace, &[group, key]).context(KeySnafu)?;
        ledger.delete(&index_key).context(LedgerSnafu)
    }

    /// Enumerates the primary keys indexed under `group`, in key order.
    ///
    /// The scan cursor is released before returning, on success and on
    /// every error path.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Ledger` if the scan fails and
    /// `IndexError::Malformed` if a stored entry does not split back into
    /// `(group, primary_key)`.
    pub fn primary_keys<L: LedgerState>(
        ledger: &L,
        namespace: &str,
        group: &str,
    ) -> Result<Vec<String>> {
        let cursor = match scan_composite(ledger, namespace, &[group]) {
            Ok(cursor) => cursor,
            Err(ScanError::Prefix { source }) => return Err(IndexError::Key { source }),
            Err(ScanError::Ledger { source }) => return Err(LedgerSnafu.into_error(source)),
        };

        let mut keys = Vec::new();
        for entry in cursor {
            let index_key = entry.context(LedgerSnafu)?;
            let (_, attrs) = assaychain_ledger::split_composite(&index_key)
                .context(MalformedSnafu)?;
            // Entries are (group, primary_key); the primary key is the
            // trailing attribute.
            if let Some(primary) = attrs.last() {
                keys.push(primary.clone());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use assaychain_ledger::MemoryLedger;

    use super::*;

    #[test]
    fn test_insert_then_enumerate() {
        let mut ledger = MemoryLedger::new();
        GroupIndex::insert(&mut ledger, "lot~assay", "LOT-1", "A2").expect("insert");
        GroupIndex::insert(&mut ledger, "lot~assay", "LOT-1", "A1").expect("insert");
        GroupIndex::insert(&mut ledger, "lot~assay", "LOT-2", "B1").expect("insert");

        let keys = GroupIndex::primary_keys(&ledger, "lot~assay", "LOT-1").expect("list");
        assert_eq!(keys, ["A1", "A2"]);
        assert_eq!(ledger.open_cursors(), 0);
    }

    #[test]
    fn test_remove_drops_entry() {
        let mut ledger = MemoryLedger::new();
        GroupIndex::insert(&mut ledger, "kit~image", "KIT-1", "h1").expect("insert");
        GroupIndex::remove(&mut ledger, "kit~image", "KIT-1", "h1").expect("remove");

        let keys = GroupIndex::primary_keys(&ledger, "kit~image", "KIT-1").expect("list");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_remove_absent_is_ok() {
        let mut ledger = MemoryLedger::new();
        GroupIndex::remove(&mut ledger, "kit~image", "KIT-1", "never").expect("remove absent");
    }

    #[test]
    fn test_entries_carry_sentinel_payload() {
        let mut ledger = MemoryLedger::new();
        GroupIndex::insert(&mut ledger, "lot~sheet", "LOT-1", "h").expect("insert");
        let key = ledger.keys().pop().expect("one key");
        assert_eq!(
            assaychain_ledger::LedgerState::get(&ledger, &key).expect("get").unwrap(),
            INDEX_SENTINEL
        );
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let mut ledger = MemoryLedger::new();
        GroupIndex::insert(&mut ledger, "lot~sheet", "LOT-1", "h").expect("insert");
        let keys = GroupIndex::primary_keys(&ledger, "lot~assay", "LOT-1").expect("list");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_empty_group_rejected_before_ledger_access() {
        let mut ledger = MemoryLedger::new();
        let err = GroupIndex::insert(&mut ledger, "lot~sheet", "", "h").unwrap_err();
        assert!(matches!(err, IndexError::Key { .. }));
        assert!(ledger.keys().is_empty());
    }
}
