use chrono::NaiveDate;

/// Accepted recording-date layouts, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

/// Parse a recording date. Returns `None` for empty or unrecognized text.
pub fn parse_recording_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_each_layout() {
        assert_eq!(parse_recording_date("2024-03-01"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_recording_date("03/01/2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_recording_date("2024/03/01"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_recording_date("03-01-2024"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn trims_input() {
        assert_eq!(parse_recording_date("  2025-12-31 "), Some(ymd(2025, 12, 31)));
    }

    #[test]
    fn month_first_not_day_first() {
        assert_eq!(parse_recording_date("12/01/2024"), Some(ymd(2024, 12, 1)));
        assert_eq!(parse_recording_date("13/01/2024"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_recording_date(""), None);
        assert_eq!(parse_recording_date("   "), None);
        assert_eq!(parse_recording_date("not a date"), None);
        assert_eq!(parse_recording_date("2024-02-30"), None);
        assert_eq!(parse_recording_date("2024-03-01T10:00:00"), None);
    }
}
