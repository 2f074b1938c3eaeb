//! Property-roll index build.

use std::collections::HashMap;

use crate::address::normalize_address;
use crate::columns::{self, ColumnResolver};
use crate::model::{IndexStats, PropertyRecord};

/// Property records with two lookup indexes over them.
///
/// Both indexes point into the same record list. Keys are never empty, and
/// a later row with the same key replaces an earlier one.
#[derive(Debug, Default)]
pub struct PropertyIndex {
    records: Vec<PropertyRecord>,
    by_parcel: HashMap<String, usize>,
    by_address: HashMap<String, usize>,
    stats: IndexStats,
}

impl PropertyIndex {
    /// Insert a record, indexing it under each non-empty key.
    pub fn insert(&mut self, record: PropertyRecord) {
        let pos = self.records.len();
        self.stats.rows += 1;

        let parcel_keyed = !record.parcel_id.is_empty();
        let address_keyed = !record.norm_address.is_empty();

        if parcel_keyed && self.by_parcel.insert(record.parcel_id.clone(), pos).is_some() {
            self.stats.duplicate_parcels += 1;
        }
        if address_keyed && self.by_address.insert(record.norm_address.clone(), pos).is_some() {
            self.stats.duplicate_addresses += 1;
        }
        if !parcel_keyed && !address_keyed {
            self.stats.unreachable += 1;
        }

        self.stats.by_parcel = self.by_parcel.len();
        self.stats.by_address = self.by_address.len();
        self.records.push(record);
    }

    pub fn by_parcel(&self, parcel_id: &str) -> Option<&PropertyRecord> {
        self.by_parcel.get(parcel_id).map(|&i| &self.records[i])
    }

    pub fn by_address(&self, norm_address: &str) -> Option<&PropertyRecord> {
        self.by_address.get(norm_address).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build the parcel and address indexes from raw property-roll CSV text.
///
/// Never fails: missing columns resolve to empty fields, and records the csv
/// reader rejects are skipped and counted as malformed.
pub fn build_property_index(csv_text: &str) -> PropertyIndex {
    let mut index = PropertyIndex::default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(crate::engine::strip_bom(csv_text).as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            log::warn!("property roll: unreadable header row: {e}");
            return index;
        }
    };
    let resolver = ColumnResolver::new(&headers);
    crate::engine::log_schema(
        "property roll",
        &headers,
        &resolver,
        &[
            ("parcel_id", columns::PROPERTY_PARCEL_ID),
            ("address", columns::PROPERTY_ADDRESS),
            ("assessed_value", columns::ASSESSED_VALUE),
        ],
    );

    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("property roll: skipping record {}: {e}", line + 1);
                index.stats.malformed += 1;
                continue;
            }
        };

        let address = resolver.resolve(&record, columns::PROPERTY_ADDRESS);
        let norm_address = normalize_address(&address);
        index.insert(PropertyRecord {
            parcel_id: resolver.resolve(&record, columns::PROPERTY_PARCEL_ID),
            assessed_value: resolver.resolve(&record, columns::ASSESSED_VALUE),
            address,
            norm_address,
        });
    }

    log::info!(
        "property roll: {} rows, {} parcel keys, {} address keys",
        index.stats.rows,
        index.stats.by_parcel,
        index.stats.by_address,
    );
    index
}
