//! End-to-end coverage of the model store surface.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]

use assaychain_contract::{AssayContract, ContractError};
use assaychain_ledger::MemoryLedger;
use assaychain_state::{ModelError, ModelStore};
use assaychain_test_utils::{constant_tree, model_payload};
use assaychain_types::ModelKey;

#[test]
fn store_model_versions_start_at_one_and_increment() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let payload_a = model_payload(&constant_tree("a"));
    let payload_b = model_payload(&constant_tree("b"));

    let first = contract
        .store_model(&mut ledger, "recommended_action", &payload_a)
        .expect("store v1");
    assert_eq!(first.version, 1);

    let second = contract
        .store_model(&mut ledger, "recommended_action", &payload_b)
        .expect("store v2");
    assert_eq!(second.version, 2);
    assert_eq!(second.model_data, payload_b, "overwrite keeps only the latest payload");
}

#[test]
fn unknown_model_key_rejected_without_writes() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let err = contract
        .store_model(&mut ledger, "bogus", &model_payload(&constant_tree("x")))
        .unwrap_err();
    assert!(matches!(err, ContractError::InvalidModelKey { .. }));
    assert!(ledger.keys().is_empty(), "rejection happens before any ledger access");
}

#[test]
fn empty_payload_rejected() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let err = contract.store_model(&mut ledger, "qc_status", "").unwrap_err();
    assert!(matches!(
        err,
        ContractError::Model { source: ModelError::Validation { .. }, .. }
    ));
    assert!(ledger.keys().is_empty());
}

#[test]
fn stored_payload_roundtrips_through_transport_encoding() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let tree = constant_tree("release");
    contract
        .store_model(&mut ledger, "result_class", &model_payload(&tree))
        .expect("store");

    let bytes = ModelStore::load_bytes(&ledger, ModelKey::ResultClass).expect("load");
    let reloaded: assaychain_predict::DecisionTree =
        serde_json::from_slice(&bytes).expect("parse tree bytes");
    assert_eq!(reloaded, tree);
}

#[test]
fn slots_version_independently() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();
    let payload = model_payload(&constant_tree("x"));

    contract.store_model(&mut ledger, "qc_status", &payload).expect("store");
    contract.store_model(&mut ledger, "qc_status", &payload).expect("store");
    let result = contract.store_model(&mut ledger, "result_class", &payload).expect("store");
    assert_eq!(result.version, 1);
}
