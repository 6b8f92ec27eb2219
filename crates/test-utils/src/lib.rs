//! Shared test utilities for assaychain crates.
//!
//! This crate provides common test helpers to reduce boilerplate across
//! test modules:
//!
//! - [`fixtures`] - classifier trees, model payloads, assay payloads, and
//!   predictor rows, plus [`MemoryLedger`] seeding helpers
//! - [`strategies`] - proptest generators for domain values
//!
//! [`MemoryLedger`]: assaychain_ledger::MemoryLedger

#![deny(unsafe_code)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::{
    assay_payload, constant_tree, control_line_tree, model_payload, predictor_row,
    seed_constant_models,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use assaychain_ledger::MemoryLedger;
    use assaychain_state::ModelStore;
    use assaychain_types::{ModelKey, PREDICTOR_COLUMNS};

    use super::*;

    #[test]
    fn test_seeded_models_are_loadable() {
        let mut ledger = MemoryLedger::new();
        seed_constant_models(&mut ledger);
        for key in ModelKey::ALL {
            let bytes = ModelStore::load_bytes(&ledger, key).expect("load seeded model");
            assert!(!bytes.is_empty());
        }
    }

    #[test]
    fn test_predictor_row_matches_schema_width() {
        let row = predictor_row("true");
        assert_eq!(row.split(',').count(), PREDICTOR_COLUMNS.len());
        assert!(row.contains("true"));
    }

    #[test]
    fn test_assay_payload_is_valid_json() {
        let payload = assay_payload("LOT-1");
        let value: serde_json::Value = serde_json::from_str(&payload).expect("valid json");
        assert_eq!(value["cassette_lot"], "LOT-1");
    }
}
