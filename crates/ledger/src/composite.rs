//! Composite key encoding for secondary indexes.
//!
//! An ordered tuple of string attributes is packed under a namespace into a
//! single ledger key:
//!
//! Key format: `\u{0}{namespace}\u{0}{attr1}\u{0}{attr2}\u{0}...`
//!
//! The leading `\u{0}` keeps composite keys out of the plain primary-key
//! range; the per-attribute trailing delimiter makes the encoding injective
//! and order-preserving, so a partial encoding of the leading attributes is
//! a string prefix of every full key that shares them. Prefix scans over
//! the partial form therefore enumerate a group regardless of the trailing
//! attribute's value.

use snafu::{ResultExt, Snafu};

use assaychain_types::{ValidationError, require_key_attribute};

use crate::cursor::KeyCursor;
use crate::state::{LedgerError, LedgerState};

/// Delimiter separating namespace and attributes inside a composite key.
const DELIMITER: char = '\u{0}';

/// Malformed composite key encountered during decode.
#[derive(Debug, Snafu)]
pub enum CompositeKeyError {
    /// The key does not start with the NUL sentinel.
    #[snafu(display("composite key {key:?} missing leading sentinel"))]
    MissingSentinel { key: String },

    /// The key does not end with the attribute delimiter.
    #[snafu(display("composite key {key:?} missing trailing delimiter"))]
    MissingTerminator { key: String },

    /// Namespace component is empty.
    #[snafu(display("composite key {key:?} has an empty namespace"))]
    EmptyNamespace { key: String },

    /// The key carries no attributes after the namespace.
    #[snafu(display("composite key {key:?} has no attributes"))]
    NoAttributes { key: String },

    /// An attribute component is empty.
    #[snafu(display("composite key {key:?} has an empty attribute at position {position}"))]
    EmptyAttribute { key: String, position: usize },
}

/// Encodes a full composite key from a namespace and its attribute tuple.
///
/// # Errors
///
/// Returns [`ValidationError`] if the namespace or any attribute is empty
/// or contains the `\u{0}` delimiter.
pub fn encode_composite(namespace: &str, attrs: &[&str]) -> Result<String, ValidationError> {
    require_key_attribute("namespace", namespace)?;
    let mut key = String::new();
    key.push(DELIMITER);
    key.push_str(namespace);
    key.push(DELIMITER);
    for attr in attrs {
        require_key_attribute("attribute", attr)?;
        key.push_str(attr);
        key.push(DELIMITER);
    }
    Ok(key)
}

/// Encodes the scan prefix covering every composite key under `namespace`
/// whose leading attributes equal `leading`.
///
/// With `leading` empty this covers the whole namespace.
///
/// # Errors
///
/// Returns [`ValidationError`] under the same rules as [`encode_composite`].
pub fn encode_partial(namespace: &str, leading: &[&str]) -> Result<String, ValidationError> {
    encode_composite(namespace, leading)
}

/// Splits a composite key back into its namespace and attribute tuple.
///
/// # Errors
///
/// Returns [`CompositeKeyError`] for any input that [`encode_composite`]
/// could not have produced. Never panics, whatever the input.
pub fn split_composite(key: &str) -> Result<(String, Vec<String>), CompositeKeyError> {
    let body = key
        .strip_prefix(DELIMITER)
        .ok_or_else(|| CompositeKeyError::MissingSentinel { key: key.to_string() })?;
    let body = body
        .strip_suffix(DELIMITER)
        .ok_or_else(|| CompositeKeyError::MissingTerminator { key: key.to_string() })?;

    let mut parts = body.split(DELIMITER);
    let namespace = parts.next().unwrap_or_default();
    if namespace.is_empty() {
        return Err(CompositeKeyError::EmptyNamespace { key: key.to_string() });
    }

    let attrs: Vec<String> = parts.map(str::to_string).collect();
    if attrs.is_empty() {
        return Err(CompositeKeyError::NoAttributes { key: key.to_string() });
    }
    if let Some(position) = attrs.iter().position(String::is_empty) {
        return Err(CompositeKeyError::EmptyAttribute { key: key.to_string(), position });
    }

    Ok((namespace.to_string(), attrs))
}

/// Failure to open a composite scan.
#[derive(Debug, Snafu)]
pub enum ScanError {
    /// The scan prefix could not be encoded.
    #[snafu(display("invalid scan prefix: {source}"))]
    Prefix { source: ValidationError },

    /// The ledger refused the scan.
    #[snafu(display("scan failed: {source}"))]
    Ledger { source: LedgerError },
}

/// Opens a cursor over every composite key under `namespace` whose leading
/// attributes equal `leading`.
///
/// # Errors
///
/// Returns [`ScanError::Prefix`] before any ledger access if the namespace
/// or a leading attribute fails validation, and [`ScanError::Ledger`] if
/// the host refuses the scan.
pub fn scan_composite<'a, L: LedgerState>(
    ledger: &'a L,
    namespace: &str,
    leading: &[&str],
) -> Result<KeyCursor<'a>, ScanError> {
    let prefix = encode_partial(namespace, leading).context(PrefixSnafu)?;
    ledger.scan_prefix(&prefix).context(LedgerSnafu)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_split_roundtrip() {
        let key = encode_composite("lot~assay", &["LOT-1", "AX-17"]).expect("encode");
        let (namespace, attrs) = split_composite(&key).expect("split");
        assert_eq!(namespace, "lot~assay");
        assert_eq!(attrs, ["LOT-1", "AX-17"]);
    }

    #[test]
    fn test_partial_is_prefix_of_full() {
        let full = encode_composite("lot~sheet", &["LOT-1", "hashA"]).expect("encode");
        let partial = encode_partial("lot~sheet", &["LOT-1"]).expect("partial");
        assert!(full.starts_with(&partial));
    }

    #[test]
    fn test_partial_does_not_match_other_group() {
        let full = encode_composite("lot~sheet", &["LOT-10", "hashA"]).expect("encode");
        let partial = encode_partial("lot~sheet", &["LOT-1"]).expect("partial");
        // "LOT-10" must not fall under the "LOT-1" prefix: the delimiter
        // terminates the attribute before the scan prefix does.
        assert!(!full.starts_with(&partial));
    }

    #[test]
    fn test_encoding_preserves_tuple_order() {
        let a = encode_composite("ns", &["alpha", "z"]).expect("encode");
        let b = encode_composite("ns", &["beta", "a"]).expect("encode");
        assert!(a < b, "first attribute dominates ordering");
    }

    #[test]
    fn test_encode_rejects_empty_attribute() {
        let err = encode_composite("ns", &["ok", ""]).unwrap_err();
        assert_eq!(err.field, "attribute");
    }

    #[test]
    fn test_encode_rejects_embedded_delimiter() {
        assert!(encode_composite("ns", &["a\u{0}b"]).is_err());
        assert!(encode_composite("n\u{0}s", &["a"]).is_err());
    }

    #[test]
    fn test_split_rejects_missing_sentinel() {
        let err = split_composite("plain-key").unwrap_err();
        assert!(matches!(err, CompositeKeyError::MissingSentinel { .. }));
    }

    #[test]
    fn test_split_rejects_missing_terminator() {
        let err = split_composite("\u{0}ns\u{0}attr").unwrap_err();
        assert!(matches!(err, CompositeKeyError::MissingTerminator { .. }));
    }

    #[test]
    fn test_split_rejects_empty_namespace() {
        let err = split_composite("\u{0}\u{0}attr\u{0}").unwrap_err();
        assert!(matches!(err, CompositeKeyError::EmptyNamespace { .. }));
    }

    #[test]
    fn test_split_rejects_bare_namespace() {
        let err = split_composite("\u{0}ns\u{0}").unwrap_err();
        assert!(matches!(err, CompositeKeyError::NoAttributes { .. }));
    }

    #[test]
    fn test_split_rejects_empty_attribute() {
        let err = split_composite("\u{0}ns\u{0}a\u{0}\u{0}b\u{0}").unwrap_err();
        assert!(matches!(err, CompositeKeyError::EmptyAttribute { position: 1, .. }));
    }
}
