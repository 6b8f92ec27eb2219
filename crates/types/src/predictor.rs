//! Predictor row schema.
//!
//! A prediction request arrives as one comma-joined row whose columns must
//! line up with the schema the classifiers were trained on. The order here
//! is significant and identical for all three model keys; only the target
//! column name differs.

/// Ordered predictor columns, shared by all three classifiers.
pub const PREDICTOR_COLUMNS: [&str; 21] = [
    "lat",
    "lon",
    "expiry_days_left",
    "distance_mm",
    "time_to_migrate_s",
    "sample_volume_ul",
    "sample_ph",
    "sample_turbidity_ntu",
    "sample_temp_c",
    "ambient_temp_c",
    "ambient_rh_pct",
    "lighting_lux",
    "tilt_deg",
    "preincubation_time_s",
    "time_since_sampling_min",
    "image_blur_score",
    "transport_time_h",
    "estimated_concentration_ppb",
    "estimation_uncertainty_ppb",
    "control_line_ok",
    "internal_control_result",
];

/// Placeholder class value for the row being predicted.
pub const UNKNOWN_LABEL: &str = "?";

/// Builds the dataset header for one prediction: the predictor columns
/// followed by the target column being predicted.
pub fn predictor_header(target: &str) -> String {
    let mut header = PREDICTOR_COLUMNS.join(",");
    header.push(',');
    header.push_str(target);
    header
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_header_ends_with_target() {
        let header = predictor_header("qc_status");
        assert!(header.ends_with(",qc_status"));
        assert_eq!(header.matches(',').count(), PREDICTOR_COLUMNS.len());
    }

    #[test]
    fn test_header_starts_with_first_predictor() {
        assert!(predictor_header("result_class").starts_with("lat,lon,"));
    }

    #[test]
    fn test_column_order_is_stable() {
        // The classifiers were trained against this exact order; a reorder
        // would silently shift every prediction input.
        assert_eq!(PREDICTOR_COLUMNS[0], "lat");
        assert_eq!(PREDICTOR_COLUMNS[15], "image_blur_score");
        assert_eq!(PREDICTOR_COLUMNS[20], "internal_control_result");
    }
}
