//! Sheet family: lot data-sheet hashes, upsert semantics.

use snafu::ResultExt;
use tracing::info;

use assaychain_ledger::LedgerState;
use assaychain_state::RecordStore;
use assaychain_types::SheetRecord;

use crate::{AssayContract, Result, StateSnafu};

impl AssayContract {
    /// Stores or updates the record for a data-sheet hash.
    ///
    /// First store pins `cassette_lot` and indexes the hash under it;
    /// later stores of the same hash bump the version and ignore the lot
    /// argument.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Validation` for empty arguments and
    /// `ContractError::State` for ledger or decode failures.
    pub fn store_sheet<L: LedgerState>(
        &self,
        ledger: &mut L,
        cassette_lot: &str,
        sheet_hash: &str,
    ) -> Result<SheetRecord> {
        let record: SheetRecord =
            RecordStore::upsert(ledger, cassette_lot, sheet_hash).context(StateSnafu)?;
        info!(
            cassette_lot = %record.cassette_lot,
            sheet_hash,
            version = record.version,
            "sheet stored"
        );
        Ok(record)
    }

    /// Every sheet record created under `cassette_lot`.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any indexed record cannot be fetched.
    pub fn sheets_by_lot<L: LedgerState>(
        &self,
        ledger: &L,
        cassette_lot: &str,
    ) -> Result<Vec<SheetRecord>> {
        RecordStore::list_by_group(ledger, cassette_lot).context(StateSnafu)
    }

    /// The sheet record stored under `sheet_hash`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::State` wrapping `NotFound` if absent.
    pub fn sheet_by_hash<L: LedgerState>(
        &self,
        ledger: &L,
        sheet_hash: &str,
    ) -> Result<SheetRecord> {
        RecordStore::get(ledger, sheet_hash).context(StateSnafu)
    }

    /// Whether a sheet record exists for `sheet_hash`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::State` only for ledger failures; absence is
    /// `Ok(false)`.
    pub fn sheet_exists<L: LedgerState>(&self, ledger: &L, sheet_hash: &str) -> Result<bool> {
        RecordStore::exists(ledger, sheet_hash).context(StateSnafu)
    }
}
