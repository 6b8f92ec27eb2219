//! Ledger record families.
//!
//! Three versioned record families share the ledger: lot data-sheet hashes
//! ([`SheetRecord`]), kit image hashes ([`ImageRecord`]), and structured
//! assay results ([`AssayRecord`]), plus the classifier blob family
//! ([`ModelRecord`]). Every family carries server-assigned trackers:
//! a monotone `version` counter and transaction-timestamp fields.
//!
//! Decoding is tolerant: missing fields take their zero value and unknown
//! fields are ignored, so a caller payload never needs to spell out the
//! full record. Stored bytes that fail to parse at all are a fatal
//! corruption error at the store layer, never defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ModelKey;

/// Hash of a lot's data sheet, keyed by the sheet's content hash.
///
/// `cassette_lot` is fixed when the record is created and is never changed
/// by later stores of the same hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SheetRecord {
    /// Store counter: 0 at creation, +1 per subsequent store.
    pub version: u64,
    /// Transaction timestamp of the creating store.
    pub created_at: DateTime<Utc>,
    /// Transaction timestamp of the most recent store.
    pub last_updated_at: DateTime<Utc>,
    /// Grouping attribute, pinned at creation.
    pub cassette_lot: String,
    /// Content hash of the data sheet; doubles as the primary key.
    pub sheet_hash: String,
}

/// Hash of a kit photograph, keyed by the image's content hash.
///
/// Same shape and lifecycle as [`SheetRecord`], grouped by kit instead
/// of lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImageRecord {
    /// Store counter: 0 at creation, +1 per subsequent store.
    pub version: u64,
    /// Transaction timestamp of the creating store.
    pub created_at: DateTime<Utc>,
    /// Transaction timestamp of the most recent store.
    pub last_updated_at: DateTime<Utc>,
    /// Grouping attribute, pinned at creation.
    pub kit_id: String,
    /// Content hash of the image; doubles as the primary key.
    pub image_hash: String,
}

/// A structured field-assay result.
///
/// Created exactly once per `assay_id`; updates replace the full content
/// including the three derived fields, which are computed by the
/// prediction pipeline only at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssayRecord {
    // Trackers.
    /// 0 at creation, +1 per update.
    pub version: u64,
    /// Transaction timestamp of creation; immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// Transaction timestamp of the most recent write.
    pub last_updated_at: DateTime<Utc>,

    // Keys.
    /// Caller-supplied identifier; forced from the operation argument,
    /// never taken from the payload.
    pub assay_id: String,
    /// Grouping attribute; index entry migrates when this changes on update.
    pub cassette_lot: String,

    // Content.
    /// When the sample was taken, as reported by the device.
    pub sampled_at: String,
    pub lat: f64,
    pub lon: f64,
    pub geo_hash: String,
    pub operator_id: String,
    pub operator_did: String,
    pub matrix_type: String,
    pub reagent_lot: String,
    pub expiry_days_left: i64,
    pub distance_mm: f64,
    pub time_to_migrate_s: f64,
    pub control_line_ok: bool,
    pub sample_volume_ul: f64,
    pub sample_ph: f64,
    pub sample_turbidity_ntu: f64,
    pub sample_temp_c: f64,
    pub ambient_temp_c: f64,
    pub ambient_rh_pct: f64,
    pub lighting_lux: f64,
    pub tilt_deg: f64,
    pub preincubation_time_s: f64,
    pub time_since_sampling_min: f64,
    pub storage_condition: String,
    pub prefilter_used: bool,
    pub image_taken: bool,
    /// Blur score of the captured image. JSON `null` or an absent field
    /// decodes to `0.0` (device firmwares older than 2.3 omit it).
    #[serde(deserialize_with = "null_to_zero")]
    pub image_blur_score: f64,
    pub device_fw_version: String,
    pub product_id: String,
    pub kit_calibration_id: String,
    pub internal_control_result: String,
    pub cold_chain_ok: bool,
    pub transport_time_h: f64,
    pub transport_condition: String,
    pub estimated_concentration_ppb: f64,
    pub estimation_uncertainty_ppb: f64,

    // Derived fields: written by the prediction pipeline at creation,
    // taken verbatim from the payload on update.
    pub recommended_action: String,
    pub result_class: String,
    pub qc_status: String,
}

/// A stored classifier blob.
///
/// `model_data` carries the serialized tree as base64 text so the record
/// stays representable in the ledger's JSON transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// 1 at first store, +1 per overwrite.
    pub version: u64,
    /// Transaction timestamp of the most recent store.
    pub updated_at: DateTime<Utc>,
    /// Which derived field this model predicts.
    pub model_key: ModelKey,
    /// Base64-encoded serialized classifier.
    pub model_data: String,
}

fn null_to_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
