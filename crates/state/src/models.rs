//! Classifier blob store.
//!
//! Trained classifiers reach the ledger as base64 text inside a JSON
//! [`ModelRecord`], one slot per [`ModelKey`]. Storage is pure overwrite
//! with an independent version counter starting at 1; no history is kept
//! beyond the counter. Unknown keys never reach this module — the closed
//! allow-list is enforced at the contract boundary when the key string is
//! parsed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use snafu::{OptionExt, ResultExt, Snafu};

use assaychain_ledger::{LedgerError, LedgerState};
use assaychain_types::{
    CodecError, ModelKey, ModelRecord, ValidationError, decode_record, encode_record, require,
};

/// Errors returned by [`ModelStore`] operations.
#[derive(Debug, Snafu)]
pub enum ModelError {
    /// The payload argument was empty.
    #[snafu(display("invalid argument: {source}"))]
    Validation { source: ValidationError },

    /// Underlying ledger operation failed.
    #[snafu(display("ledger error: {source}"))]
    Ledger {
        source: LedgerError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Stored model record failed to parse. Always fatal.
    #[snafu(display("corrupt model record under {key}: {source}"))]
    Corrupt {
        key: ModelKey,
        source: CodecError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// The model record could not be serialized for storage.
    #[snafu(display("model encoding failed: {source}"))]
    Encode { source: CodecError },

    /// No model stored under `key`.
    #[snafu(display("model {key} not found"))]
    NotFound { key: ModelKey },

    /// The stored payload is not valid base64.
    #[snafu(display("model {key} transport decoding failed: {source}"))]
    Transport {
        key: ModelKey,
        source: base64::DecodeError,
    },
}

/// Result type for model store operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Blob store for trained classifiers.
pub struct ModelStore;

impl ModelStore {
    /// Stores or overwrites the classifier under `key`.
    ///
    /// Reads any prior blob to compute `version = prior + 1` (1 if
    /// absent), stamps `updated_at` with the transaction timestamp, and
    /// persists under the canonical key string.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` for an empty payload before any
    /// ledger access, and `ModelError::Corrupt` if an existing blob fails
    /// to parse.
    pub fn put<L: LedgerState>(
        ledger: &mut L,
        key: ModelKey,
        payload_b64: &str,
    ) -> Result<ModelRecord> {
        require("model_data", payload_b64).context(ValidationSnafu)?;

        let version = match ledger.get(key.as_str()).context(LedgerSnafu)? {
            Some(bytes) => {
                let prior: ModelRecord = decode_record(&bytes).context(CorruptSnafu { key })?;
                prior.version + 1
            },
            None => 1,
        };

        let record = ModelRecord {
            version,
            updated_at: ledger.tx_timestamp().context(LedgerSnafu)?,
            model_key: key,
            model_data: payload_b64.to_string(),
        };
        let bytes = encode_record(&record).context(EncodeSnafu)?;
        ledger.put(key.as_str(), &bytes).context(LedgerSnafu)?;
        Ok(record)
    }

    /// Reads the model record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if absent and `ModelError::Corrupt`
    /// if the stored bytes fail to parse.
    pub fn get<L: LedgerState>(ledger: &L, key: ModelKey) -> Result<ModelRecord> {
        let bytes = ledger
            .get(key.as_str())
            .context(LedgerSnafu)?
            .context(NotFoundSnafu { key })?;
        decode_record(&bytes).context(CorruptSnafu { key })
    }

    /// Decodes a record's transport encoding back to the original
    /// serialized classifier bytes.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Transport` on invalid base64.
    pub fn decode_data(record: &ModelRecord) -> Result<Vec<u8>> {
        BASE64
            .decode(&record.model_data)
            .context(TransportSnafu { key: record.model_key })
    }

    /// Fetches and transport-decodes the classifier bytes under `key`.
    ///
    /// # Errors
    ///
    /// Combines the failure modes of [`ModelStore::get`] and
    /// [`ModelStore::decode_data`].
    pub fn load_bytes<L: LedgerState>(ledger: &L, key: ModelKey) -> Result<Vec<u8>> {
        let record = Self::get(ledger, key)?;
        Self::decode_data(&record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use assaychain_ledger::MemoryLedger;

    use super::*;

    fn b64(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    #[test]
    fn test_first_put_is_version_one() {
        let mut ledger = MemoryLedger::new();
        let record = ModelStore::put(&mut ledger, ModelKey::RecommendedAction, &b64(b"tree-a"))
            .expect("put");
        assert_eq!(record.version, 1);
        assert_eq!(record.model_key, ModelKey::RecommendedAction);
    }

    #[test]
    fn test_overwrite_bumps_version_and_replaces_payload() {
        let mut ledger = MemoryLedger::new();
        ModelStore::put(&mut ledger, ModelKey::RecommendedAction, &b64(b"tree-a")).expect("put");
        let second = ModelStore::put(&mut ledger, ModelKey::RecommendedAction, &b64(b"tree-b"))
            .expect("put");
        assert_eq!(second.version, 2);

        let stored = ModelStore::get(&ledger, ModelKey::RecommendedAction).expect("get");
        assert_eq!(stored.version, 2);
        assert_eq!(ModelStore::decode_data(&stored).expect("decode"), b"tree-b");
    }

    #[test]
    fn test_slots_version_independently() {
        let mut ledger = MemoryLedger::new();
        ModelStore::put(&mut ledger, ModelKey::RecommendedAction, &b64(b"a")).expect("put");
        ModelStore::put(&mut ledger, ModelKey::RecommendedAction, &b64(b"a2")).expect("put");
        let qc = ModelStore::put(&mut ledger, ModelKey::QcStatus, &b64(b"q")).expect("put");
        assert_eq!(qc.version, 1);
    }

    #[test]
    fn test_empty_payload_rejected_before_ledger_access() {
        let mut ledger = MemoryLedger::new();
        let err = ModelStore::put(&mut ledger, ModelKey::QcStatus, "").unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
        assert!(ledger.keys().is_empty());
    }

    #[test]
    fn test_load_bytes_roundtrips_payload() {
        let mut ledger = MemoryLedger::new();
        ModelStore::put(&mut ledger, ModelKey::ResultClass, &b64(b"raw model bytes"))
            .expect("put");
        let bytes = ModelStore::load_bytes(&ledger, ModelKey::ResultClass).expect("load");
        assert_eq!(bytes, b"raw model bytes");
    }

    #[test]
    fn test_get_absent_is_not_found() {
        let ledger = MemoryLedger::new();
        let err = ModelStore::get(&ledger, ModelKey::QcStatus).unwrap_err();
        assert!(matches!(err, ModelError::NotFound { key: ModelKey::QcStatus }));
    }

    #[test]
    fn test_bad_base64_is_transport_error() {
        let mut ledger = MemoryLedger::new();
        ModelStore::put(&mut ledger, ModelKey::QcStatus, "!!!not-base64!!!").expect("put");
        let err = ModelStore::load_bytes(&ledger, ModelKey::QcStatus).unwrap_err();
        assert!(matches!(err, ModelError::Transport { .. }));
    }

    #[test]
    fn test_corrupt_stored_record_is_fatal() {
        let mut ledger = MemoryLedger::new();
        assaychain_ledger::LedgerState::put(&mut ledger, "qc_status", b"junk").expect("put");
        let err = ModelStore::get(&ledger, ModelKey::QcStatus).unwrap_err();
        assert!(matches!(err, ModelError::Corrupt { .. }));
        let err = ModelStore::put(&mut ledger, ModelKey::QcStatus, "AAAA").unwrap_err();
        assert!(matches!(err, ModelError::Corrupt { .. }));
    }
}
