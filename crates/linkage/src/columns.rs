//! Column resolution across inconsistently-named source schemas.
//!
//! Each logical field has an ordered list of accepted header spellings. The
//! first spelling present in the file wins; lookups ignore case and
//! surrounding whitespace on the header side.

use std::collections::HashMap;

use csv::StringRecord;

// ---------------------------------------------------------------------------
// Candidate tables
// ---------------------------------------------------------------------------

pub const PROPERTY_PARCEL_ID: &[&str] = &["parcel_id", "folio", "folio_number", "parcel", "pin"];
pub const PROPERTY_ADDRESS: &[&str] =
    &["address", "site_address", "property_address", "situs_address"];
pub const ASSESSED_VALUE: &[&str] =
    &["assessed_value", "assessed", "total_assessed_value", "market_value"];

pub const DOC_TYPE: &[&str] = &["doc_type", "document_type", "doctype", "doc type"];
pub const RECORDING_DATE: &[&str] =
    &["recording_date", "recorded_date", "record_date", "recording date"];
pub const MORTGAGE_ADDRESS: &[&str] =
    &["address", "property_address", "legal_address", "situs_address"];
pub const MORTGAGE_PARCEL_ID: &[&str] = &["parcel_id", "folio", "folio_number", "pin", "parcel"];
pub const INSTRUMENT_NUMBER: &[&str] = &["instrument_number", "instrument", "cfn", "doc_number"];
pub const BOOK_PAGE: &[&str] = &["book_page", "book/page", "book_page_ref"];

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Case-insensitive header lookup built once per file.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    positions: HashMap<String, usize>,
}

impl ColumnResolver {
    /// Index a header row. When two headers fold to the same name, the later
    /// column wins.
    pub fn new(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (fold(h), i))
            .collect();
        Self { positions }
    }

    /// Trimmed value of the first candidate the file carries, or `""`.
    ///
    /// Only header presence decides the winner: a matched column with an
    /// empty cell yields `""` rather than falling through to later candidates.
    pub fn resolve(&self, record: &StringRecord, candidates: &[&str]) -> String {
        candidates
            .iter()
            .find_map(|cand| self.positions.get(&fold(cand)))
            .and_then(|&i| record.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Header position of the first candidate present, if any.
    pub fn position(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|cand| self.positions.get(&fold(cand)).copied())
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}
