//! Input validation for contract arguments.
//!
//! Every externally supplied string argument (primary keys, grouping
//! attributes, model payloads) is checked here before any ledger access.
//! Composite-key attributes additionally reject the `\u{0}` delimiter so a
//! caller cannot forge index boundaries.

use std::fmt;

/// Validation error with structured context.
///
/// Contains the specific constraint that was violated and the field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the violated constraint.
    pub constraint: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

impl std::error::Error for ValidationError {}

/// Validates that a required string argument is non-empty.
///
/// # Errors
///
/// Returns [`ValidationError`] naming `field` if `value` is empty.
pub fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Validates a composite-key attribute: non-empty and free of the `\u{0}`
/// delimiter used by the key encoding.
///
/// # Errors
///
/// Returns [`ValidationError`] if the attribute is empty or contains `\u{0}`.
pub fn require_key_attribute(field: &str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    if let Some(pos) = value.find('\u{0}') {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: format!("contains reserved delimiter \\u{{0}} at byte offset {pos}"),
        });
    }
    Ok(())
}
