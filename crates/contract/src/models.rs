//! Model family: classifier blob storage.

use snafu::ResultExt;
use tracing::info;

use assaychain_ledger::LedgerState;
use assaychain_state::ModelStore;
use assaychain_types::{ModelKey, ModelRecord};

use crate::{AssayContract, InvalidModelKeySnafu, ModelSnafu, Result};

impl AssayContract {
    /// Stores or overwrites a trained classifier.
    ///
    /// `model_key` must be one of the three allow-listed key strings; an
    /// unknown key is rejected before any ledger access. `payload_b64` is
    /// the serialized classifier in base64 transport encoding.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::InvalidModelKey` for an unlisted key,
    /// `ContractError::Model` wrapping validation for an empty payload.
    pub fn store_model<L: LedgerState>(
        &self,
        ledger: &mut L,
        model_key: &str,
        payload_b64: &str,
    ) -> Result<ModelRecord> {
        let key = ModelKey::parse(model_key).context(InvalidModelKeySnafu)?;
        let record = ModelStore::put(ledger, key, payload_b64).context(ModelSnafu)?;
        info!(model_key = %key, version = record.version, "model stored");
        Ok(record)
    }
}
