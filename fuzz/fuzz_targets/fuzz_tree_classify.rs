//! Fuzz target for classifier reconstruction and inference.
//!
//! Tests that parsing arbitrary bytes as a serialized tree, then running
//! inference over a fuzz-derived dataset, never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;

use assaychain_predict::{Dataset, DecisionTree};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Some((table, tree_json)) = input.split_once('|') else {
        return;
    };

    let Ok(tree) = serde_json::from_str::<DecisionTree>(tree_json) else {
        return;
    };
    let Ok(dataset) = Dataset::parse(table) else {
        return;
    };

    for row in 0..dataset.row_count() {
        // Inference may fail on a missing split column; it must not panic.
        let _ = tree.classify(&dataset, row);
    }
});
