//! Image family: kit image hashes, upsert semantics.

use snafu::ResultExt;
use tracing::info;

use assaychain_ledger::LedgerState;
use assaychain_state::RecordStore;
use assaychain_types::ImageRecord;

use crate::{AssayContract, Result, StateSnafu};

impl AssayContract {
    /// Stores or updates the record for a kit image hash.
    ///
    /// Same lifecycle as [`AssayContract::store_sheet`]: `kit_id` is
    /// pinned and indexed at creation, ignored on later stores of the
    /// same hash.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Validation` for empty arguments and
    /// `ContractError::State` for ledger or decode failures.
    pub fn store_image<L: LedgerState>(
        &self,
        ledger: &mut L,
        kit_id: &str,
        image_hash: &str,
    ) -> Result<ImageRecord> {
        let record: ImageRecord =
            RecordStore::upsert(ledger, kit_id, image_hash).context(StateSnafu)?;
        info!(kit_id = %record.kit_id, image_hash, version = record.version, "image stored");
        Ok(record)
    }

    /// Every image record created under `kit_id`.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any indexed record cannot be fetched.
    pub fn images_by_kit<L: LedgerState>(
        &self,
        ledger: &L,
        kit_id: &str,
    ) -> Result<Vec<ImageRecord>> {
        RecordStore::list_by_group(ledger, kit_id).context(StateSnafu)
    }

    /// The image record stored under `image_hash`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::State` wrapping `NotFound` if absent.
    pub fn image_by_hash<L: LedgerState>(
        &self,
        ledger: &L,
        image_hash: &str,
    ) -> Result<ImageRecord> {
        RecordStore::get(ledger, image_hash).context(StateSnafu)
    }

    /// Whether an image record exists for `image_hash`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::State` only for ledger failures; absence is
    /// `Ok(false)`.
    pub fn image_exists<L: LedgerState>(&self, ledger: &L, image_hash: &str) -> Result<bool> {
        RecordStore::exists(ledger, image_hash).context(StateSnafu)
    }
}
