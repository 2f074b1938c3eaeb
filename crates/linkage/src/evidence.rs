use crate::model::{ExplainedRow, FilterStats, IndexStats, JoinSummary, MatchTier};

/// Compute summary statistics from explained join output and stage stats.
pub fn compute_summary(
    rows: &[ExplainedRow],
    properties: &IndexStats,
    mortgages: &FilterStats,
) -> JoinSummary {
    let mut matched_by_parcel = 0;
    let mut matched_by_address = 0;
    let mut unmatched = 0;

    for r in rows {
        match r.tier {
            MatchTier::Parcel => matched_by_parcel += 1,
            MatchTier::Address => matched_by_address += 1,
            MatchTier::Unmatched => unmatched += 1,
        }
    }

    JoinSummary {
        total_rows: rows.len(),
        matched_by_parcel,
        matched_by_address,
        unmatched,
        properties: properties.clone(),
        mortgages: mortgages.clone(),
    }
}
