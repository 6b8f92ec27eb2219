//! Proptest strategies for assaychain domain values.
//!
//! Reusable generators for property-based testing across crates.
//! Strategies produce well-formed domain values while exploring edge cases
//! through random variation.
//!
//! # Usage
//!
//! ```no_run
//! use assaychain_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(lot in strategies::arb_lot_id()) {
//!         // test invariant with a randomly generated lot id
//!     }
//! }
//! ```

use proptest::prelude::*;

/// Generates a cassette lot identifier like `LOT-a1b2`.
pub fn arb_lot_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}".prop_map(|suffix| format!("LOT-{suffix}"))
}

/// Generates a kit identifier like `KIT-x9`.
pub fn arb_kit_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}".prop_map(|suffix| format!("KIT-{suffix}"))
}

/// Generates a lowercase hex content hash of 8-64 characters.
pub fn arb_content_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{8,64}"
}

/// Generates an assay identifier of 1-16 characters matching
/// `[A-Za-z][A-Za-z0-9_-]*`.
pub fn arb_assay_id() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_-]{0,15}"
}

/// Generates a composite-key attribute: non-empty printable text with no
/// embedded `\u{0}` delimiter.
pub fn arb_key_attribute() -> impl Strategy<Value = String> {
    "[ -~]{1,24}"
}

/// Generates an attribute tuple of 1-3 components for composite-key
/// properties.
pub fn arb_attribute_tuple() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_key_attribute(), 1..4)
}
