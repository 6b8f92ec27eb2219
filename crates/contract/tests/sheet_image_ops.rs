//! End-to-end coverage of the sheet and image upsert families.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]

use assaychain_contract::{AssayContract, ContractError};
use assaychain_ledger::MemoryLedger;
use assaychain_state::StateError;
use chrono::Duration;

#[test]
fn store_sheet_then_fetch_by_hash() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let stored = contract.store_sheet(&mut ledger, "LOT-1", "hashA").expect("store");
    assert_eq!(stored.version, 0);
    assert_eq!(stored.cassette_lot, "LOT-1");
    assert_eq!(stored.sheet_hash, "hashA");

    let fetched = contract.sheet_by_hash(&ledger, "hashA").expect("get");
    assert_eq!(fetched, stored);
}

#[test]
fn second_store_bumps_version_but_keeps_original_lot() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let first = contract.store_sheet(&mut ledger, "LOT-1", "hashA").expect("store");
    ledger.advance_clock(Duration::seconds(90));
    let second = contract.store_sheet(&mut ledger, "LOT-2", "hashA").expect("restore");

    assert_eq!(second.version, 1);
    assert_eq!(second.cassette_lot, "LOT-1", "creation pins the lot");
    assert!(second.last_updated_at > first.last_updated_at);
    assert_eq!(second.created_at, first.created_at);

    // The index still reflects the creation-time lot only.
    let lot1 = contract.sheets_by_lot(&ledger, "LOT-1").expect("list");
    assert_eq!(lot1.len(), 1);
    assert!(contract.sheets_by_lot(&ledger, "LOT-2").expect("list").is_empty());
}

#[test]
fn sheets_by_lot_returns_exact_membership() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    contract.store_sheet(&mut ledger, "LOT-1", "h1").expect("store");
    contract.store_sheet(&mut ledger, "LOT-1", "h2").expect("store");
    contract.store_sheet(&mut ledger, "LOT-9", "h3").expect("store");

    let records = contract.sheets_by_lot(&ledger, "LOT-1").expect("list");
    let hashes: Vec<&str> = records.iter().map(|r| r.sheet_hash.as_str()).collect();
    assert_eq!(hashes, ["h1", "h2"]);
}

#[test]
fn sheet_exists_and_missing_lookup() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    assert!(!contract.sheet_exists(&ledger, "hashA").expect("exists"));
    contract.store_sheet(&mut ledger, "LOT-1", "hashA").expect("store");
    assert!(contract.sheet_exists(&ledger, "hashA").expect("exists"));

    let err = contract.sheet_by_hash(&ledger, "missing").unwrap_err();
    assert!(matches!(
        err,
        ContractError::State { source: StateError::NotFound { .. }, .. }
    ));
}

#[test]
fn empty_arguments_rejected_without_writes() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    assert!(contract.store_sheet(&mut ledger, "", "hashA").is_err());
    assert!(contract.store_sheet(&mut ledger, "LOT-1", "").is_err());
    assert!(ledger.keys().is_empty());
}

#[test]
fn image_family_mirrors_sheet_lifecycle() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    let stored = contract.store_image(&mut ledger, "KIT-7", "imgA").expect("store");
    assert_eq!(stored.version, 0);
    assert_eq!(stored.kit_id, "KIT-7");

    ledger.advance_clock(Duration::seconds(5));
    let again = contract.store_image(&mut ledger, "KIT-OTHER", "imgA").expect("restore");
    assert_eq!(again.version, 1);
    assert_eq!(again.kit_id, "KIT-7");

    let by_kit = contract.images_by_kit(&ledger, "KIT-7").expect("list");
    assert_eq!(by_kit.len(), 1);
    assert!(contract.image_exists(&ledger, "imgA").expect("exists"));
}

#[test]
fn families_do_not_cross_contaminate_indexes() {
    let mut ledger = MemoryLedger::new();
    let contract = AssayContract::new();

    contract.store_sheet(&mut ledger, "GRP-1", "sheet-h").expect("store sheet");
    contract.store_image(&mut ledger, "GRP-1", "image-h").expect("store image");

    let sheets = contract.sheets_by_lot(&ledger, "GRP-1").expect("list sheets");
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].sheet_hash, "sheet-h");

    let images = contract.images_by_kit(&ledger, "GRP-1").expect("list images");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_hash, "image-h");
}
