//! Record family descriptors.
//!
//! The three record families share one versioned-store-plus-index pattern
//! with small policy differences (upsert-forever vs. create-once, frozen
//! vs. migratable grouping attribute). The shared shape is captured by two
//! traits: [`GroupedRecord`] for anything the generic store can read and
//! index, and [`UpsertRecord`] for the families whose store operation is
//! an unconditional upsert.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use assaychain_types::{AssayRecord, ImageRecord, SheetRecord};

/// A record stored under a primary key and enumerable through a grouping
/// index.
pub trait GroupedRecord: Serialize + DeserializeOwned {
    /// Namespace of this family's grouping index.
    const GROUP_INDEX: &'static str;

    /// The key the authoritative record is stored under.
    fn primary_key(&self) -> &str;

    /// The grouping attribute indexed for this record.
    fn group_key(&self) -> &str;

    /// Server-assigned write counter.
    fn version(&self) -> u64;
}

/// A family with upsert semantics: first store creates at version 0 and
/// pins the grouping attribute, every later store bumps the version.
pub trait UpsertRecord: GroupedRecord {
    /// Builds the version-0 record with both timestamp fields set to the
    /// transaction timestamp.
    fn create(group: &str, key: &str, at: DateTime<Utc>) -> Self;

    /// Applies an upsert to an existing record: version +1 and a fresh
    /// `last_updated_at`. The grouping attribute stays as created.
    fn refresh(&mut self, at: DateTime<Utc>);
}

impl GroupedRecord for SheetRecord {
    const GROUP_INDEX: &'static str = "lot~sheet";

    fn primary_key(&self) -> &str {
        &self.sheet_hash
    }

    fn group_key(&self) -> &str {
        &self.cassette_lot
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl UpsertRecord for SheetRecord {
    fn create(group: &str, key: &str, at: DateTime<Utc>) -> Self {
        SheetRecord {
            version: 0,
            created_at: at,
            last_updated_at: at,
            cassette_lot: group.to_string(),
            sheet_hash: key.to_string(),
        }
    }

    fn refresh(&mut self, at: DateTime<Utc>) {
        self.version += 1;
        self.last_updated_at = at;
    }
}

impl GroupedRecord for ImageRecord {
    const GROUP_INDEX: &'static str = "kit~image";

    fn primary_key(&self) -> &str {
        &self.image_hash
    }

    fn group_key(&self) -> &str {
        &self.kit_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl UpsertRecord for ImageRecord {
    fn create(group: &str, key: &str, at: DateTime<Utc>) -> Self {
        ImageRecord {
            version: 0,
            created_at: at,
            last_updated_at: at,
            kit_id: group.to_string(),
            image_hash: key.to_string(),
        }
    }

    fn refresh(&mut self, at: DateTime<Utc>) {
        self.version += 1;
        self.last_updated_at = at;
    }
}

// Assays are create-once with a migratable group, so they take the read
// side of the generic store but not the upsert path; creation and update
// are orchestrated at the contract layer.
impl GroupedRecord for AssayRecord {
    const GROUP_INDEX: &'static str = "lot~assay";

    fn primary_key(&self) -> &str {
        &self.assay_id
    }

    fn group_key(&self) -> &str {
        &self.cassette_lot
    }

    fn version(&self) -> u64 {
        self.version
    }
}
