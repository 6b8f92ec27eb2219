//! Fuzz target for record payload decoding.
//!
//! Tests that decoding arbitrary bytes into each record type never panics,
//! and that any successfully decoded record re-encodes cleanly.

#![no_main]

use libfuzzer_sys::fuzz_target;

use assaychain_types::codec::{decode_record, encode_record};
use assaychain_types::records::{AssayRecord, ImageRecord, ModelRecord, SheetRecord};

fuzz_target!(|data: &[u8]| {
    let Some((selector, payload)) = data.split_first() else {
        return;
    };

    match selector % 4 {
        0 => {
            if let Ok(record) = decode_record::<SheetRecord>(payload) {
                encode_record(&record).expect("decoded sheet must re-encode");
            }
        }
        1 => {
            if let Ok(record) = decode_record::<ImageRecord>(payload) {
                encode_record(&record).expect("decoded image must re-encode");
            }
        }
        2 => {
            if let Ok(record) = decode_record::<ModelRecord>(payload) {
                encode_record(&record).expect("decoded model must re-encode");
            }
        }
        _ => {
            if let Ok(record) = decode_record::<AssayRecord>(payload) {
                encode_record(&record).expect("decoded assay must re-encode");
            }
        }
    }
});
