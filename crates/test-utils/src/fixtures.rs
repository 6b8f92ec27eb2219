//! Ready-made test data: classifier trees, model payloads, assay
//! payloads, and predictor rows.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use assaychain_ledger::MemoryLedger;
use assaychain_predict::{DecisionTree, TreeNode};
use assaychain_state::ModelStore;
use assaychain_types::{ModelKey, PREDICTOR_COLUMNS};

/// Base64 model payload for a tree, as `store_model` expects it.
#[allow(clippy::expect_used)]
pub fn model_payload(tree: &DecisionTree) -> String {
    BASE64.encode(serde_json::to_vec(tree).expect("tree serializes"))
}

/// A single-leaf tree predicting `label` for every row.
pub fn constant_tree(label: &str) -> DecisionTree {
    DecisionTree::new(TreeNode::leaf(label))
}

/// A one-split tree over `control_line_ok`: `true` predicts `on_true`,
/// `false` predicts `on_false`, anything else `fallback`.
pub fn control_line_tree(on_true: &str, on_false: &str, fallback: &str) -> DecisionTree {
    DecisionTree::new(TreeNode::split(
        "control_line_ok",
        fallback,
        [
            ("true".to_string(), TreeNode::leaf(on_true)),
            ("false".to_string(), TreeNode::leaf(on_false)),
        ],
    ))
}

/// Seeds all three model slots with constant trees predicting
/// distinguishable labels: `act-label`, `class-label`, `qc-label`.
#[allow(clippy::expect_used)]
pub fn seed_constant_models(ledger: &mut MemoryLedger) {
    for (key, label) in [
        (ModelKey::RecommendedAction, "act-label"),
        (ModelKey::ResultClass, "class-label"),
        (ModelKey::QcStatus, "qc-label"),
    ] {
        ModelStore::put(ledger, key, &model_payload(&constant_tree(label)))
            .expect("seed model");
    }
}

/// A full predictor row with every cell `0` except `control_line_ok`,
/// which takes `control_line`.
pub fn predictor_row(control_line: &str) -> String {
    PREDICTOR_COLUMNS
        .iter()
        .map(|&col| if col == "control_line_ok" { control_line } else { "0" })
        .collect::<Vec<_>>()
        .join(",")
}

/// A realistic assay payload JSON under `cassette_lot`, without derived
/// fields or trackers.
pub fn assay_payload(cassette_lot: &str) -> String {
    format!(
        r#"{{
            "cassette_lot": "{cassette_lot}",
            "sampled_at": "2024-03-01T09:30:00Z",
            "lat": -23.5505,
            "lon": -46.6333,
            "geo_hash": "6gycf",
            "operator_id": "OP-12",
            "matrix_type": "water",
            "reagent_lot": "RG-88",
            "expiry_days_left": 120,
            "distance_mm": 18.5,
            "time_to_migrate_s": 142.0,
            "control_line_ok": true,
            "sample_volume_ul": 75.0,
            "sample_ph": 7.1,
            "sample_turbidity_ntu": 3.4,
            "sample_temp_c": 22.5,
            "ambient_temp_c": 26.0,
            "ambient_rh_pct": 61.0,
            "lighting_lux": 540.0,
            "tilt_deg": 1.2,
            "preincubation_time_s": 300.0,
            "time_since_sampling_min": 12.0,
            "storage_condition": "ambient",
            "prefilter_used": false,
            "image_taken": true,
            "image_blur_score": 0.08,
            "device_fw_version": "2.4.1",
            "product_id": "PRD-9",
            "kit_calibration_id": "CAL-3",
            "internal_control_result": "pass",
            "cold_chain_ok": true,
            "transport_time_h": 4.5,
            "transport_condition": "cooled",
            "estimated_concentration_ppb": 14.2,
            "estimation_uncertainty_ppb": 1.1
        }}"#
    )
}
