//! Mortgage-instrument filtering.
//!
//! Keeps rows whose document type is exactly `MORTGAGE` (case-insensitive)
//! and whose recording date falls on or after the rolling cutoff.

use chrono::{Days, NaiveDate};

use crate::columns::{self, ColumnResolver};
use crate::dates::parse_recording_date;
use crate::model::{FilterStats, MortgageRecord};

pub const MORTGAGE_DOC_TYPE: &str = "MORTGAGE";

/// `today` minus `365 × years` days. Leap days are not accounted for.
pub fn cutoff_date(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(365 * u64::from(years)))
        .unwrap_or(NaiveDate::MIN)
}

/// Filter raw mortgage CSV text down to recent mortgage records.
pub fn filter_mortgages(csv_text: &str, years: u32, today: NaiveDate) -> Vec<MortgageRecord> {
    filter_mortgages_with_stats(csv_text, years, today).0
}

/// Like [`filter_mortgages`], also reporting why rows were dropped.
pub fn filter_mortgages_with_stats(
    csv_text: &str,
    years: u32,
    today: NaiveDate,
) -> (Vec<MortgageRecord>, FilterStats) {
    let cutoff = cutoff_date(today, years);
    let mut stats = FilterStats::default();
    let mut out = Vec::new();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(crate::engine::strip_bom(csv_text).as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            log::warn!("mortgage roll: unreadable header row: {e}");
            return (out, stats);
        }
    };
    let resolver = ColumnResolver::new(&headers);
    crate::engine::log_schema(
        "mortgage roll",
        &headers,
        &resolver,
        &[
            ("doc_type", columns::DOC_TYPE),
            ("recording_date", columns::RECORDING_DATE),
            ("address", columns::MORTGAGE_ADDRESS),
            ("parcel_id", columns::MORTGAGE_PARCEL_ID),
            ("instrument_number", columns::INSTRUMENT_NUMBER),
            ("book_page", columns::BOOK_PAGE),
        ],
    );

    for (line, record) in reader.records().enumerate() {
        stats.rows += 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("mortgage roll: skipping record {}: {e}", line + 1);
                stats.malformed += 1;
                continue;
            }
        };

        let doc_type = resolver.resolve(&record, columns::DOC_TYPE);
        if doc_type.to_uppercase() != MORTGAGE_DOC_TYPE {
            stats.wrong_doc_type += 1;
            continue;
        }

        let date_text = resolver.resolve(&record, columns::RECORDING_DATE);
        let recording_date = match parse_recording_date(&date_text) {
            Some(d) => d,
            None => {
                log::debug!("mortgage roll: record {}: unparseable date {date_text:?}", line + 1);
                stats.unparseable_date += 1;
                continue;
            }
        };
        if recording_date < cutoff {
            stats.before_cutoff += 1;
            continue;
        }

        out.push(MortgageRecord {
            address: resolver.resolve(&record, columns::MORTGAGE_ADDRESS),
            parcel_id: resolver.resolve(&record, columns::MORTGAGE_PARCEL_ID),
            recording_date,
            instrument_number: resolver.resolve(&record, columns::INSTRUMENT_NUMBER),
            book_page: resolver.resolve(&record, columns::BOOK_PAGE),
        });
    }

    stats.kept = out.len();
    log::info!(
        "mortgage roll: kept {} of {} rows (cutoff {cutoff}; {} other doc types, {} bad dates, {} stale)",
        stats.kept,
        stats.rows,
        stats.wrong_doc_type,
        stats.unparseable_date,
        stats.before_cutoff,
    );
    (out, stats)
}
