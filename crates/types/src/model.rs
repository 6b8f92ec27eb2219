//! Classifier model keys.
//!
//! The ledger stores exactly three trained classifiers, one per derived
//! assay field. The allow-list is a closed enum so an unknown key is
//! rejected at parse time, before any ledger access.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three model slots recognized by the model store.
///
/// The canonical string form doubles as the ledger key and as the target
/// column name in the prediction dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKey {
    /// Predicts `recommended_action`.
    RecommendedAction,
    /// Predicts `result_class`.
    ResultClass,
    /// Predicts `qc_status`.
    QcStatus,
}

impl ModelKey {
    /// All recognized model keys, in derived-field order.
    pub const ALL: [ModelKey; 3] = [
        ModelKey::RecommendedAction,
        ModelKey::ResultClass,
        ModelKey::QcStatus,
    ];

    /// Canonical string form: ledger key and target column name.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKey::RecommendedAction => "recommended_action",
            ModelKey::ResultClass => "result_class",
            ModelKey::QcStatus => "qc_status",
        }
    }

    /// Parses a caller-supplied key string against the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidModelKeyError`] for any string outside the closed set.
    pub fn parse(s: &str) -> Result<Self, InvalidModelKeyError> {
        match s {
            "recommended_action" => Ok(ModelKey::RecommendedAction),
            "result_class" => Ok(ModelKey::ResultClass),
            "qc_status" => Ok(ModelKey::QcStatus),
            other => Err(InvalidModelKeyError {
                given: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model key outside the closed allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidModelKeyError {
    /// The rejected key string.
    pub given: String,
}

impl fmt::Display for InvalidModelKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown model key {:?}; expected one of recommended_action, result_class, qc_status",
            self.given
        )
    }
}

impl std::error::Error for InvalidModelKeyError {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_canonical_strings() {
        for key in ModelKey::ALL {
            assert_eq!(ModelKey::parse(key.as_str()).unwrap(), key);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = ModelKey::parse("bogus").unwrap_err();
        assert_eq!(err.given, "bogus");
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(ModelKey::parse("QC_STATUS").is_err());
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&ModelKey::QcStatus).expect("encode");
        assert_eq!(json, "\"qc_status\"");
        let back: ModelKey = serde_json::from_str(&json).expect("decode");
        assert_eq!(back, ModelKey::QcStatus);
    }
}
