//! Centralized serialization and deserialization functions.
//!
//! Ledger records are stored as JSON (field-name/value pairs) so that the
//! host platform's tooling can inspect state directly. This module provides
//! a unified interface for encoding and decoding records, with consistent
//! error handling via snafu.

use serde::{Serialize, de::DeserializeOwned};
use snafu::Snafu;

/// Error type for codec operations.
#[derive(Debug, Snafu)]
pub enum CodecError {
    /// Encoding failed.
    #[snafu(display("Encoding failed: {source}"))]
    Encode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Decoding failed.
    #[snafu(display("Decoding failed: {source}"))]
    Decode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Encodes a record to JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode_record<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|source| CodecError::Encode { source })
}

/// Decodes JSON bytes to a record.
///
/// # Errors
///
/// Returns `CodecError::Decode` if deserialization fails.
pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|source| CodecError::Decode { source })
}
