use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One property-roll row. Assessed value stays opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub address: String,
    pub parcel_id: String,
    pub assessed_value: String,
    pub norm_address: String,
}

/// One mortgage instrument that survived the doc-type and recency filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MortgageRecord {
    pub address: String,
    pub parcel_id: String,
    pub recording_date: NaiveDate,
    pub instrument_number: String,
    pub book_page: String,
}

// ---------------------------------------------------------------------------
// Join output
// ---------------------------------------------------------------------------

/// Output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedRow {
    pub address: String,
    pub parcel_id: String,
    pub assessed_value: String,
    pub mortgage_recorded_date: String,
    pub book_page_or_instrument_number: String,
}

/// Output header, in column order.
pub const OUTPUT_HEADER: [&str; 5] = [
    "address",
    "parcel_id",
    "assessed_value",
    "mortgage_recorded_date",
    "book_page_or_instrument_number",
];

/// Which lookup found the property for a mortgage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Parcel,
    Address,
    Unmatched,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parcel => write!(f, "parcel"),
            Self::Address => write!(f, "address"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// A joined row together with the tier that produced it.
#[derive(Debug, Clone)]
pub struct ExplainedRow {
    pub row: JoinedRow,
    pub tier: MatchTier,
}

// ---------------------------------------------------------------------------
// Stage statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub rows: usize,
    pub by_parcel: usize,
    pub by_address: usize,
    /// Rows with neither a parcel id nor a usable address.
    pub unreachable: usize,
    pub duplicate_parcels: usize,
    pub duplicate_addresses: usize,
    pub malformed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub rows: usize,
    pub kept: usize,
    pub wrong_doc_type: usize,
    pub unparseable_date: usize,
    pub before_cutoff: usize,
    pub malformed: usize,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct JoinSummary {
    pub total_rows: usize,
    pub matched_by_parcel: usize,
    pub matched_by_address: usize,
    pub unmatched: usize,
    pub properties: IndexStats,
    pub mortgages: FilterStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinMeta {
    pub years: u32,
    pub reference_date: NaiveDate,
    pub cutoff: NaiveDate,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinResult {
    pub meta: JoinMeta,
    pub summary: JoinSummary,
    #[serde(skip)]
    pub rows: Vec<JoinedRow>,
}
