//! Core types for the assaychain ledger contract.
//!
//! This crate provides the foundational types used throughout the
//! workspace:
//! - The four record families stored on the ledger
//! - The JSON codec used for all stored records
//! - The closed model-key allow-list
//! - The predictor row schema shared by the three classifiers
//! - Argument validation helpers

pub mod codec;
pub mod model;
pub mod predictor;
pub mod records;
pub mod validation;

// Re-export commonly used types at crate root
pub use codec::{CodecError, decode_record, encode_record};
pub use model::{InvalidModelKeyError, ModelKey};
pub use predictor::{PREDICTOR_COLUMNS, UNKNOWN_LABEL, predictor_header};
pub use records::{AssayRecord, ImageRecord, ModelRecord, SheetRecord};
pub use validation::{ValidationError, require, require_key_attribute};
