//! Classifier reconstruction and prediction for assay enrichment.
//!
//! - [`DecisionTree`] - ID3-style categorical tree with a file-based
//!   loader
//! - [`Dataset`] - the two-line tabular input synthesized per prediction
//! - [`Predictor`] - the byte-in/label-out pipeline with a
//!   process-lifetime model cache

pub mod dataset;
pub mod pipeline;
pub mod tree;

// Re-export commonly used types at crate root
pub use dataset::{Dataset, DatasetError};
pub use pipeline::{PredictError, Predictor};
pub use tree::{DecisionTree, TreeError, TreeNode};
