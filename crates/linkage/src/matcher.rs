use crate::address::normalize_address;
use crate::model::{ExplainedRow, JoinedRow, MatchTier, MortgageRecord, PropertyRecord};
use crate::property::PropertyIndex;

/// Find the property for a mortgage: parcel id first, then normalized address.
pub fn resolve_property<'a>(
    mortgage: &MortgageRecord,
    index: &'a PropertyIndex,
) -> (Option<&'a PropertyRecord>, MatchTier) {
    if !mortgage.parcel_id.is_empty() {
        if let Some(prop) = index.by_parcel(&mortgage.parcel_id) {
            return (Some(prop), MatchTier::Parcel);
        }
    }

    let norm = normalize_address(&mortgage.address);
    if !norm.is_empty() {
        if let Some(prop) = index.by_address(&norm) {
            return (Some(prop), MatchTier::Address);
        }
    }

    (None, MatchTier::Unmatched)
}

/// Build the output row for one mortgage and its (optional) property.
pub fn joined_row(mortgage: &MortgageRecord, property: Option<&PropertyRecord>) -> JoinedRow {
    let address = if !mortgage.address.is_empty() {
        mortgage.address.clone()
    } else {
        property.map(|p| p.address.clone()).unwrap_or_default()
    };
    let parcel_id = if !mortgage.parcel_id.is_empty() {
        mortgage.parcel_id.clone()
    } else {
        property.map(|p| p.parcel_id.clone()).unwrap_or_default()
    };
    let reference = if !mortgage.book_page.is_empty() {
        mortgage.book_page.clone()
    } else {
        mortgage.instrument_number.clone()
    };

    JoinedRow {
        address,
        parcel_id,
        assessed_value: property.map(|p| p.assessed_value.clone()).unwrap_or_default(),
        mortgage_recorded_date: mortgage.recording_date.format("%Y-%m-%d").to_string(),
        book_page_or_instrument_number: reference,
    }
}

/// Join each mortgage to its property, recording the tier that matched.
/// Exactly one output per input, in input order.
pub fn join_explained(mortgages: &[MortgageRecord], index: &PropertyIndex) -> Vec<ExplainedRow> {
    mortgages
        .iter()
        .map(|m| {
            let (property, tier) = resolve_property(m, index);
            log::trace!("mortgage {:?}/{:?} → {tier}", m.parcel_id, m.address);
            ExplainedRow {
                row: joined_row(m, property),
                tier,
            }
        })
        .collect()
}

/// Join each mortgage to its property. Exactly one output per input.
pub fn join(mortgages: &[MortgageRecord], index: &PropertyIndex) -> Vec<JoinedRow> {
    join_explained(mortgages, index)
        .into_iter()
        .map(|e| e.row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn property(address: &str, parcel_id: &str, value: &str) -> PropertyRecord {
        PropertyRecord {
            address: address.into(),
            parcel_id: parcel_id.into(),
            assessed_value: value.into(),
            norm_address: normalize_address(address),
        }
    }

    fn mortgage(address: &str, parcel_id: &str) -> MortgageRecord {
        MortgageRecord {
            address: address.into(),
            parcel_id: parcel_id.into(),
            recording_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            instrument_number: "2025R0001".into(),
            book_page: String::new(),
        }
    }

    fn index() -> PropertyIndex {
        let mut idx = PropertyIndex::default();
        idx.insert(property("123 Main Street", "001", "250000"));
        idx.insert(property("9 Palm Court", "002", "410000"));
        idx
    }

    #[test]
    fn parcel_match() {
        let rows = join(&[mortgage("", "001")], &index());
        assert_eq!(
            rows[0],
            JoinedRow {
                address: "123 Main Street".into(),
                parcel_id: "001".into(),
                assessed_value: "250000".into(),
                mortgage_recorded_date: "2025-02-03".into(),
                book_page_or_instrument_number: "2025R0001".into(),
            }
        );
    }

    #[test]
    fn address_fallback_when_parcel_empty() {
        let out = join_explained(&[mortgage("123 Main St", "")], &index());
        assert_eq!(out[0].tier, MatchTier::Address);
        assert_eq!(out[0].row.assessed_value, "250000");
        assert_eq!(out[0].row.parcel_id, "001");
        assert_eq!(out[0].row.address, "123 Main St");
    }

    #[test]
    fn address_fallback_when_parcel_unknown() {
        let out = join_explained(&[mortgage("9 PALM CT", "999")], &index());
        assert_eq!(out[0].tier, MatchTier::Address);
        assert_eq!(out[0].row.assessed_value, "410000");
        // The mortgage's own parcel id is kept even though it found nothing.
        assert_eq!(out[0].row.parcel_id, "999");
    }

    #[test]
    fn parcel_beats_address() {
        let out = join_explained(&[mortgage("9 Palm Court", "001")], &index());
        assert_eq!(out[0].tier, MatchTier::Parcel);
        assert_eq!(out[0].row.assessed_value, "250000");
        assert_eq!(out[0].row.address, "9 Palm Court");
    }

    #[test]
    fn unmatched_keeps_row() {
        let out = join_explained(&[mortgage("1 Nowhere Ln", "")], &index());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tier, MatchTier::Unmatched);
        assert_eq!(out[0].row.assessed_value, "");
        assert_eq!(out[0].row.parcel_id, "");
        assert_eq!(out[0].row.address, "1 Nowhere Ln");
    }

    #[test]
    fn empty_address_never_matches() {
        let mut idx = index();
        idx.insert(property("???", "", "1"));
        let out = join_explained(&[mortgage("...", "")], &idx);
        assert_eq!(out[0].tier, MatchTier::Unmatched);
    }

    #[test]
    fn punctuated_unit_does_not_match_plain_unit() {
        let mut idx = index();
        idx.insert(property("8 Coral Way, Apt. 3", "", "180000"));
        let out = join_explained(&[mortgage("8 Coral Way Apt 3", "")], &idx);
        assert_eq!(out[0].tier, MatchTier::Unmatched);
        assert_eq!(out[0].row.assessed_value, "");

        let out = join_explained(&[mortgage("8 CORAL WAY, APT. 3", "")], &idx);
        assert_eq!(out[0].tier, MatchTier::Address);
        assert_eq!(out[0].row.assessed_value, "180000");
    }

    #[test]
    fn book_page_preferred_over_instrument() {
        let mut m = mortgage("", "001");
        m.book_page = "33512/101".into();
        assert_eq!(joined_row(&m, None).book_page_or_instrument_number, "33512/101");

        m.book_page.clear();
        m.instrument_number.clear();
        assert_eq!(joined_row(&m, None).book_page_or_instrument_number, "");
    }

    #[test]
    fn preserves_order_and_count() {
        let mortgages = vec![
            mortgage("", "002"),
            mortgage("nowhere", ""),
            mortgage("", "001"),
            mortgage("", "002"),
        ];
        let rows = join(&mortgages, &index());
        let parcels: Vec<&str> = rows.iter().map(|r| r.parcel_id.as_str()).collect();
        assert_eq!(parcels, ["002", "", "001", "002"]);
    }
}
