//! Date helper functions

use chrono::NaiveDateTime;
use std::fmt::Write;

/// Format a date with a strftime pattern.
/// Returns `None` when the pattern holds an unknown specifier.
pub fn format_date(date: &NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Format date in full format (like "January 5, 2024")
pub fn full_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Millisecond ISO 8601 timestamp in UTC, the shape browsers produce for dates
pub fn date_json(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&date(2024, 6, 1)), "June 1, 2024");
        assert_eq!(full_date(&date(2024, 1, 15)), "January 15, 2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(&date(2024, 1, 15), "%Y/%m/%d"),
            Some("2024/01/15".to_string())
        );
        assert_eq!(format_date(&date(2024, 1, 15), "%Q"), None);
    }

    #[test]
    fn test_date_json() {
        assert_eq!(date_json(&date(2024, 6, 1)), "2024-06-01T00:00:00.000Z");
    }
}
