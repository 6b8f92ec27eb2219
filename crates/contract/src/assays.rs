//! Assay family: create-once records with prediction enrichment.
//!
//! Creation is the only place the three derived fields are computed; the
//! update path replaces the full record, derived fields included, verbatim
//! from the caller's payload. A record's predictions can therefore drift
//! from its predictor inputs after updates. That is contract behavior, not
//! an oversight.

use snafu::{ResultExt, ensure};
use tracing::info;

use assaychain_ledger::LedgerState;
use assaychain_state::{GroupIndex, GroupedRecord, RecordStore};
use assaychain_types::{
    AssayRecord, ModelKey, decode_record, encode_record, require_key_attribute,
};

use crate::{
    AlreadyExistsSnafu, AssayContract, EncodeSnafu, IndexSnafu, LedgerSnafu, PayloadSnafu,
    PredictSnafu, Result, StateSnafu, ValidationSnafu,
};

impl AssayContract {
    /// Creates an assay record, enriching it with the three predicted
    /// fields.
    ///
    /// The payload's `assay_id` is overridden by the argument. The
    /// pipeline runs once per derived field against `predictor_row`, each
    /// run loading its own model; any pipeline failure aborts the create
    /// with the ledger untouched, since every read precedes the first
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::AlreadyExists` if the id is taken,
    /// `ContractError::Payload` for undecodable JSON, and
    /// `ContractError::Predict` when a model cannot be loaded or run.
    pub fn create_assay<L: LedgerState>(
        &self,
        ledger: &mut L,
        assay_id: &str,
        payload_json: &str,
        predictor_row: &str,
    ) -> Result<AssayRecord> {
        require_key_attribute("assay_id", assay_id).context(ValidationSnafu)?;
        ensure!(
            !RecordStore::exists(ledger, assay_id).context(StateSnafu)?,
            AlreadyExistsSnafu { assay_id }
        );

        let mut record: AssayRecord =
            decode_record(payload_json.as_bytes()).context(PayloadSnafu)?;
        record.assay_id = assay_id.to_string();
        require_key_attribute("cassette_lot", &record.cassette_lot).context(ValidationSnafu)?;

        for key in ModelKey::ALL {
            let label = self
                .predictor
                .predict(ledger, key, predictor_row)
                .context(PredictSnafu { key })?;
            match key {
                ModelKey::RecommendedAction => record.recommended_action = label,
                ModelKey::ResultClass => record.result_class = label,
                ModelKey::QcStatus => record.qc_status = label,
            }
        }

        let at = ledger.tx_timestamp().context(LedgerSnafu)?;
        record.version = 0;
        record.created_at = at;
        record.last_updated_at = at;

        let bytes = encode_record(&record).context(EncodeSnafu)?;
        ledger.put(assay_id, &bytes).context(LedgerSnafu)?;
        GroupIndex::insert(ledger, AssayRecord::GROUP_INDEX, &record.cassette_lot, assay_id)
            .context(IndexSnafu)?;

        info!(
            assay_id,
            cassette_lot = %record.cassette_lot,
            recommended_action = %record.recommended_action,
            result_class = %record.result_class,
            qc_status = %record.qc_status,
            "assay created"
        );
        Ok(record)
    }

    /// The assay record stored under `assay_id`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::State` wrapping `NotFound` if absent.
    pub fn assay_by_id<L: LedgerState>(&self, ledger: &L, assay_id: &str) -> Result<AssayRecord> {
        RecordStore::get(ledger, assay_id).context(StateSnafu)
    }

    /// Every assay record currently indexed under `cassette_lot`.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any indexed record cannot be fetched.
    pub fn assays_by_lot<L: LedgerState>(
        &self,
        ledger: &L,
        cassette_lot: &str,
    ) -> Result<Vec<AssayRecord>> {
        RecordStore::list_by_group(ledger, cassette_lot).context(StateSnafu)
    }

    /// Replaces an assay record with the caller's full payload.
    ///
    /// All content fields, the three derived fields included, are taken
    /// verbatim from the payload; predictions are never recomputed here.
    /// The store keeps control of the trackers: version increments,
    /// `created_at` is preserved, `last_updated_at` takes the transaction
    /// timestamp.
    ///
    /// When the payload moves the record to another lot, the grouping
    /// index entry is migrated as two separate ledger writes, delete then
    /// insert. There is no rollback of the delete if the insert fails;
    /// this is a known consistency gap at this layer, left to host-level
    /// transaction atomicity.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::State` wrapping `NotFound` if the id is
    /// absent and `ContractError::Payload` for undecodable JSON.
    pub fn update_assay<L: LedgerState>(
        &self,
        ledger: &mut L,
        assay_id: &str,
        payload_json: &str,
    ) -> Result<AssayRecord> {
        require_key_attribute("assay_id", assay_id).context(ValidationSnafu)?;
        let existing: AssayRecord = RecordStore::get(ledger, assay_id).context(StateSnafu)?;

        let mut updated: AssayRecord =
            decode_record(payload_json.as_bytes()).context(PayloadSnafu)?;
        updated.assay_id = assay_id.to_string();
        require_key_attribute("cassette_lot", &updated.cassette_lot).context(ValidationSnafu)?;

        updated.version = existing.version + 1;
        updated.created_at = existing.created_at;
        updated.last_updated_at = ledger.tx_timestamp().context(LedgerSnafu)?;

        if existing.cassette_lot != updated.cassette_lot {
            GroupIndex::remove(
                ledger,
                AssayRecord::GROUP_INDEX,
                &existing.cassette_lot,
                assay_id,
            )
            .context(IndexSnafu)?;
            GroupIndex::insert(
                ledger,
                AssayRecord::GROUP_INDEX,
                &updated.cassette_lot,
                assay_id,
            )
            .context(IndexSnafu)?;
        }

        let bytes = encode_record(&updated).context(EncodeSnafu)?;
        ledger.put(assay_id, &bytes).context(LedgerSnafu)?;

        info!(
            assay_id,
            cassette_lot = %updated.cassette_lot,
            version = updated.version,
            "assay updated"
        );
        Ok(updated)
    }
}
