//! Fuzz target for composite key decoding.
//!
//! Tests that `split_composite` never panics on arbitrary input, and that
//! successfully split keys re-encode to the identical key string.

#![no_main]

use libfuzzer_sys::fuzz_target;

use assaychain_ledger::{encode_composite, split_composite};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok((namespace, attrs)) = split_composite(input) {
        let refs: Vec<&str> = attrs.iter().map(String::as_str).collect();
        let reencoded =
            encode_composite(&namespace, &refs).expect("split output must re-encode");
        assert_eq!(reencoded, input, "composite key roundtrip mismatch");
    }
});
