use chrono::NaiveDate;
use csv::StringRecord;

use crate::columns::ColumnResolver;
use crate::config::JoinConfig;
use crate::evidence::compute_summary;
use crate::matcher::join_explained;
use crate::model::{JoinMeta, JoinResult};
use crate::mortgage::{cutoff_date, filter_mortgages_with_stats};
use crate::property::build_property_index;

/// Already-fetched text of both inputs.
pub struct JoinInput {
    pub properties_csv: String,
    pub mortgages_csv: String,
}

/// Run the pipeline: index properties, filter mortgages, join.
///
/// `today` anchors the recency window for the whole run.
pub fn run(config: &JoinConfig, input: &JoinInput, today: NaiveDate) -> JoinResult {
    let years = config.window.years;

    let index = build_property_index(&input.properties_csv);
    let (mortgages, filter_stats) = filter_mortgages_with_stats(&input.mortgages_csv, years, today);
    let explained = join_explained(&mortgages, &index);

    let summary = compute_summary(&explained, index.stats(), &filter_stats);
    log::info!(
        "joined {} mortgages: {} by parcel, {} by address, {} unmatched",
        summary.total_rows,
        summary.matched_by_parcel,
        summary.matched_by_address,
        summary.unmatched,
    );

    JoinResult {
        meta: JoinMeta {
            years,
            reference_date: today,
            cutoff: cutoff_date(today, years),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows: explained.into_iter().map(|e| e.row).collect(),
    }
}

/// Drop one leading UTF-8 byte-order mark, if present.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Log which header satisfied each logical field of a source.
pub(crate) fn log_schema(
    source: &str,
    headers: &StringRecord,
    resolver: &ColumnResolver,
    fields: &[(&str, &[&str])],
) {
    for (field, candidates) in fields {
        match resolver.position(candidates).and_then(|i| headers.get(i)) {
            Some(header) => log::debug!("{source}: {field} <- column {header:?}"),
            None => log::warn!("{source}: no column for {field} (tried {})", candidates.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JoinedRow;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pipeline_end_to_end() {
        let input = JoinInput {
            properties_csv: "\
address,folio,assessed_value
123 Main Street,001,250000
9 Palm Court,002,410000
"
            .into(),
            mortgages_csv: "\
doc_type,parcel_id,address,recording_date,instrument_number,book_page
Mortgage,001,,2024-03-01,2024R0001,
Mortgage,,123 Main St,2025-01-10,2025R0002,
Deed,002,,2025-01-10,2025R0003,
Mortgage,,9 Palm Ct,not a date,2025R0004,
Mortgage,,77 Gone Way,01/02/2025,,4410/22
"
            .into(),
        };

        let result = run(&JoinConfig::default(), &input, ymd(2025, 6, 1));

        assert_eq!(result.meta.years, 2);
        assert_eq!(result.meta.cutoff, ymd(2023, 6, 2));
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.summary.matched_by_parcel, 1);
        assert_eq!(result.summary.matched_by_address, 1);
        assert_eq!(result.summary.unmatched, 1);
        assert_eq!(result.summary.mortgages.wrong_doc_type, 1);
        assert_eq!(result.summary.mortgages.unparseable_date, 1);

        assert_eq!(
            result.rows[2],
            JoinedRow {
                address: "77 Gone Way".into(),
                parcel_id: String::new(),
                assessed_value: String::new(),
                mortgage_recorded_date: "2025-01-02".into(),
                book_page_or_instrument_number: "4410/22".into(),
            }
        );
    }

    #[test]
    fn location_sections_are_not_read() {
        let input = JoinInput {
            properties_csv: "folio,address,assessed_value\n001,1 Main St,10\n".into(),
            mortgages_csv: "doc_type,folio,recording_date\nMortgage,001,2025-01-10\n".into(),
        };
        let located = JoinConfig::from_toml(
            r#"
[properties]
path = "/nonexistent/roll.csv"

[mortgages]
url = "http://127.0.0.1:9/recordings.csv"

[output]
path = "/nonexistent/out/join.csv"

[http]
timeout_secs = 1
"#,
        )
        .unwrap();

        let from_located = run(&located, &input, ymd(2025, 6, 1));
        let from_default = run(&JoinConfig::default(), &input, ymd(2025, 6, 1));
        assert_eq!(from_located.rows, from_default.rows);
        assert_eq!(from_located.rows[0].assessed_value, "10");
    }

    #[test]
    fn empty_inputs_produce_no_rows() {
        let input = JoinInput {
            properties_csv: String::new(),
            mortgages_csv: String::new(),
        };
        let result = run(&JoinConfig::default(), &input, ymd(2025, 6, 1));
        assert!(result.rows.is_empty());
        assert_eq!(result.summary.total_rows, 0);
    }
}
