//! The assaychain contract surface.
//!
//! [`AssayContract`] exposes every operation the host platform invokes:
//! the sheet and image upsert families, the model store, and the
//! create-once assay family whose creation path runs the prediction
//! enrichment pipeline. The contract owns the [`Predictor`] so the model
//! cache lives for the process.
//!
//! Every operation executes inside one host transaction: synchronous, no
//! retries, validation and duplicate checks ordered before any mutation.

use snafu::Snafu;

use assaychain_ledger::LedgerError;
use assaychain_predict::{PredictError, Predictor};
use assaychain_state::{IndexError, ModelError, StateError};
use assaychain_types::{CodecError, InvalidModelKeyError, ModelKey, ValidationError};

mod assays;
mod images;
mod models;
mod sheets;

/// Errors returned by contract operations.
#[derive(Debug, Snafu)]
pub enum ContractError {
    /// A required argument was missing or malformed; nothing was read or
    /// written.
    #[snafu(display("invalid argument: {source}"))]
    Validation { source: ValidationError },

    /// The model key string is outside the closed allow-list.
    #[snafu(display("{source}"))]
    InvalidModelKey { source: InvalidModelKeyError },

    /// Create-once violation: the assay id is already taken.
    #[snafu(display("assay {assay_id:?} already exists"))]
    AlreadyExists { assay_id: String },

    /// The caller-supplied payload JSON did not decode.
    #[snafu(display("payload rejected: {source}"))]
    Payload { source: CodecError },

    /// A record could not be serialized for storage.
    #[snafu(display("record encoding failed: {source}"))]
    Encode { source: CodecError },

    /// Record store operation failed.
    #[snafu(display("{source}"))]
    State {
        source: StateError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Model store operation failed.
    #[snafu(display("{source}"))]
    Model {
        source: ModelError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// The enrichment pipeline failed for one derived field.
    #[snafu(display("prediction for {key} failed: {source}"))]
    Predict {
        key: ModelKey,
        source: PredictError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Grouping index operation failed.
    #[snafu(display("index error: {source}"))]
    Index {
        source: IndexError,
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

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// The contract's operation surface.
///
/// Stateless apart from the predictor's model cache; every method takes
/// the ledger handle for the current invocation.
#[derive(Default)]
pub struct AssayContract {
    predictor: Predictor,
}

impl AssayContract {
    /// Creates a contract with an empty model cache.
    pub fn new() -> Self {
        Self::default()
    }
}
