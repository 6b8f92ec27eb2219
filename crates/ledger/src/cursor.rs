//! Scan cursors.
//!
//! A [`KeyCursor`] is the one scoped resource the contract holds against
//! the host ledger: a finite, lazy iterator over composite keys matching a
//! prefix. Host adapters may pin pages or iterators open while a cursor
//! lives, so release must happen on every path, including early returns
//! and errors. Release is drop-based; [`MemoryLedger`] counts open cursors
//! so tests can assert it.
//!
//! [`MemoryLedger`]: crate::memory::MemoryLedger

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::state::LedgerError;

/// Decrements a shared open-cursor counter when dropped.
///
/// Adapters that track open cursors hand one of these to each
/// [`KeyCursor`]; adapters with nothing to release pass `None`.
#[derive(Debug)]
pub struct CursorGuard {
    open: Arc<AtomicUsize>,
}

impl CursorGuard {
    /// Registers a new open cursor against `open`.
    pub fn register(open: &Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self { open: Arc::clone(open) }
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Lazy cursor over matching keys, released on drop.
///
/// Yields `Result` items because host iterators can fail mid-scan; the
/// in-memory ledger never does.
pub struct KeyCursor<'a> {
    inner: Box<dyn Iterator<Item = Result<String, LedgerError>> + 'a>,
    _guard: Option<CursorGuard>,
}

impl<'a> KeyCursor<'a> {
    /// Wraps a host iterator, tying `guard`'s release to the cursor's drop.
    pub fn new(
        inner: impl Iterator<Item = Result<String, LedgerError>> + 'a,
        guard: Option<CursorGuard>,
    ) -> Self {
        Self { inner: Box::new(inner), _guard: guard }
    }
}

impl Iterator for KeyCursor<'_> {
    type Item = Result<String, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for KeyCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCursor").finish_non_exhaustive()
    }
}
