//! Categorical decision-tree classifier.
//!
//! The stored classifiers are ID3-style trees over stringified cell
//! values, serialized as JSON. The loader is file-based because that is
//! the classifier format's reconstruction contract; the pipeline hides the
//! path behind a scoped temp file.
//!
//! Inference walks the split attribute's branch matching the row's cell
//! value. A value with no branch falls back to the node's majority class;
//! a split on a column the dataset does not carry is an inference error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::dataset::Dataset;

/// Errors from tree reconstruction or inference.
#[derive(Debug, Snafu)]
pub enum TreeError {
    /// Reading or writing the serialized tree failed.
    #[snafu(display("tree file {path:?}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The serialized tree is not valid JSON for this format.
    #[snafu(display("tree parse failed: {source}"))]
    Parse { source: serde_json::Error },

    /// The tree splits on a column the dataset does not carry.
    #[snafu(display("split attribute {attribute:?} missing from dataset"))]
    MissingColumn { attribute: String },

    /// The requested row does not exist in the dataset.
    #[snafu(display("row {row} out of range"))]
    RowOutOfRange { row: usize },
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// One node of a categorical decision tree.
///
/// A leaf has no `split_attribute`; an interior node carries both its
/// branches and a majority `class` used when a value has no branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TreeNode {
    /// Column this node splits on; `None` for a leaf.
    pub split_attribute: Option<String>,
    /// Branches keyed by the cell's stringified value.
    pub children: BTreeMap<String, TreeNode>,
    /// Predicted class at a leaf; majority-class fallback elsewhere.
    pub class: String,
}

impl TreeNode {
    /// A leaf predicting `class`.
    pub fn leaf(class: &str) -> Self {
        TreeNode {
            split_attribute: None,
            children: BTreeMap::new(),
            class: class.to_string(),
        }
    }

    /// An interior node splitting on `attribute`, with `class` as the
    /// majority fallback.
    pub fn split(
        attribute: &str,
        class: &str,
        children: impl IntoIterator<Item = (String, TreeNode)>,
    ) -> Self {
        TreeNode {
            split_attribute: Some(attribute.to_string()),
            children: children.into_iter().collect(),
            class: class.to_string(),
        }
    }
}

/// A trained categorical decision tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    /// Wraps a root node as a tree. Used by the training side and by
    /// test fixtures.
    pub fn new(root: TreeNode) -> Self {
        DecisionTree { root }
    }

    /// Reconstructs a tree from its serialized file.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::Io` if the file cannot be read and
    /// `TreeError::Parse` if the bytes are not a serialized tree.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).context(IoSnafu { path: path.display().to_string() })?;
        serde_json::from_slice(&bytes).context(ParseSnafu)
    }

    /// Writes the serialized tree to `path`. Inverse of [`DecisionTree::load`].
    ///
    /// # Errors
    ///
    /// Returns `TreeError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(self).context(ParseSnafu)?;
        fs::write(path, bytes).context(IoSnafu { path: path.display().to_string() })
    }

    /// Classifies one dataset row.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::RowOutOfRange` for a bad row index and
    /// `TreeError::MissingColumn` if a split names a column the dataset
    /// does not carry.
    pub fn classify(&self, dataset: &Dataset, row: usize) -> Result<String> {
        if row >= dataset.row_count() {
            return Err(TreeError::RowOutOfRange { row });
        }

        let mut node = &self.root;
        loop {
            let Some(attribute) = &node.split_attribute else {
                return Ok(node.class.clone());
            };
            let value = dataset
                .value(row, attribute)
                .ok_or_else(|| TreeError::MissingColumn { attribute: attribute.clone() })?;
            match node.children.get(value) {
                Some(child) => node = child,
                // Unseen value: majority class of this subtree.
                None => return Ok(node.class.clone()),
            }
        }
    }
}
