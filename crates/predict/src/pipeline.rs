//! Prediction enrichment pipeline.
//!
//! Byte-in/label-out: given a model key and one predictor row, load the
//! stored classifier, rebuild it in memory, synthesize a single-row
//! dataset against the fixed predictor schema, and return the predicted
//! label as a string. Any failure at any step aborts the call; no default
//! prediction is ever substituted.
//!
//! The classifier's reconstruction routine is file-based, so the stored
//! bytes are materialized to a named temp file scoped to the call. Rebuilt
//! trees are cached for the life of the process keyed by (model key,
//! version) - sound because model identity is content-addressed by that
//! pair; storing a new model bumps the version and misses the cache.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use parking_lot::RwLock;
use snafu::{ResultExt, Snafu};
use tempfile::NamedTempFile;
use tracing::debug;

use assaychain_ledger::LedgerState;
use assaychain_state::{ModelError, ModelStore};
use assaychain_types::{ModelKey, ModelRecord, UNKNOWN_LABEL, predictor_header};

use crate::dataset::{Dataset, DatasetError};
use crate::tree::{DecisionTree, TreeError};

/// Errors from the prediction pipeline.
///
/// Every variant surfaces at the contract layer as the model-unavailable
/// family.
#[derive(Debug, Snafu)]
pub enum PredictError {
    /// The stored model could not be fetched or transport-decoded.
    #[snafu(display("model unavailable: {source}"))]
    Model { source: ModelError },

    /// The model bytes could not be materialized for reconstruction.
    #[snafu(display("model materialization failed: {source}"))]
    Materialize { source: std::io::Error },

    /// The materialized bytes are not a valid serialized classifier.
    #[snafu(display("model reconstruction failed: {source}"))]
    Reconstruct { source: TreeError },

    /// The synthesized dataset did not parse.
    #[snafu(display("predictor row rejected: {source}"))]
    Dataset { source: DatasetError },

    /// The classifier failed on the synthesized row.
    #[snafu(display("inference failed: {source}"))]
    Inference { source: TreeError },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PredictError>;

/// Model-loading and inference pipeline with a process-lifetime tree
/// cache.
#[derive(Default)]
pub struct Predictor {
    cache: RwLock<HashMap<(ModelKey, u64), Arc<DecisionTree>>>,
}

impl Predictor {
    /// Creates a pipeline with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicts the label for `model_key` against one predictor row.
    ///
    /// `predictor_row` is the comma-joined values for the fixed predictor
    /// schema, in order, without the target column.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError`] for any failure while loading,
    /// reconstructing, or running the classifier.
    pub fn predict<L: LedgerState>(
        &self,
        ledger: &L,
        model_key: ModelKey,
        predictor_row: &str,
    ) -> Result<String> {
        let record = ModelStore::get(ledger, model_key).context(ModelSnafu)?;
        let tree = self.tree_for(&record)?;

        let header = predictor_header(model_key.as_str());
        let table = format!("{header}\n{predictor_row},{UNKNOWN_LABEL}");
        let dataset = Dataset::parse(&table).context(DatasetSnafu)?;

        let label = tree.classify(&dataset, 0).context(InferenceSnafu)?;
        debug!(model_key = %model_key, version = record.version, %label, "prediction complete");
        Ok(label)
    }

    /// Returns the rebuilt tree for a stored model record, from cache when
    /// the (key, version) pair has been seen before.
    fn tree_for(&self, record: &ModelRecord) -> Result<Arc<DecisionTree>> {
        let cache_key = (record.model_key, record.version);
        if let Some(tree) = self.cache.read().get(&cache_key) {
            debug!(model_key = %record.model_key, version = record.version, "model cache hit");
            return Ok(Arc::clone(tree));
        }

        let bytes = ModelStore::decode_data(record).context(ModelSnafu)?;
        let tree = Arc::new(reconstruct(&bytes)?);
        self.cache.write().insert(cache_key, Arc::clone(&tree));
        debug!(model_key = %record.model_key, version = record.version, "model reconstructed");
        Ok(tree)
    }
}

/// Rebuilds a classifier from its serialized bytes through a scoped temp
/// file, removed on every exit path.
fn reconstruct(bytes: &[u8]) -> Result<DecisionTree> {
    let mut file = NamedTempFile::new().context(MaterializeSnafu)?;
    file.write_all(bytes).context(MaterializeSnafu)?;
    file.flush().context(MaterializeSnafu)?;
    DecisionTree::load(file.path()).context(ReconstructSnafu)
}
