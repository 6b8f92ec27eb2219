//! In-memory ledger.
//!
//! [`MemoryLedger`] is the reference [`LedgerState`] implementation: a
//! `BTreeMap` world state with a settable clock standing in for the host's
//! transaction timestamp. It ships in the production crate rather than the
//! test tree so every layer above can be exercised without a host platform,
//! and it tracks open scan cursors so tests can assert cursor release.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::cursor::{CursorGuard, KeyCursor};
use crate::state::{LedgerState, Result};

/// In-memory [`LedgerState`] with a controllable clock.
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    entries: BTreeMap<String, Vec<u8>>,
    clock: DateTime<Utc>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryLedger {
    /// Creates an empty ledger with the clock at a fixed, readable epoch.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            clock: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Advances the transaction clock, simulating a new invocation.
    pub fn advance_clock(&mut self, by: Duration) {
        self.clock += by;
    }

    /// Pins the transaction clock to an exact instant.
    pub fn set_clock(&mut self, at: DateTime<Utc>) {
        self.clock = at;
    }

    /// All stored keys, in order. Index entries included.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Full world-state dump for state-unchanged assertions.
    pub fn fingerprint(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.clone()
    }

    /// Number of scan cursors currently open against this ledger.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerState for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<KeyCursor<'_>> {
        let prefix_owned = prefix.to_string();
        let iter = self
            .entries
            .range(prefix_owned.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix_owned))
            .map(|(key, _)| Ok(key.clone()));
        Ok(KeyCursor::new(iter, Some(CursorGuard::register(&self.open_cursors))))
    }

    fn tx_timestamp(&self) -> Result<DateTime<Utc>> {
        Ok(self.clock)
    }
}
