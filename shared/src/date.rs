//! Calendar-date validation for assignment keys.

use chrono::NaiveDate;

/// Format string for assignment keys.
const KEY_FORMAT: &str = "%Y-%m-%d";

/// Check whether a string is a well-formed `YYYY-MM-DD` calendar date.
///
/// The string must match the literal 4-2-2 digit pattern and survive a
/// parse/reformat round trip, so `2025-02-30` and `2025-2-3` are both
/// rejected. Never panics.
pub fn is_valid_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return false;
    }
    match NaiveDate::parse_from_str(s, KEY_FORMAT) {
        Ok(date) => format_date(date) == s,
        Err(_) => false,
    }
}

/// Format a date in the canonical key form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_real_dates() {
        assert!(is_valid_date("2025-02-28"));
        assert!(is_valid_date("2025-06-01"));
        assert!(is_valid_date("2024-02-29")); // leap day
        assert!(is_valid_date("0001-01-01"));
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(!is_valid_date("2025-02-30"));
        assert!(!is_valid_date("2025-13-01"));
        assert!(!is_valid_date("2025-00-10"));
        assert!(!is_valid_date("2023-02-29")); // not a leap year
    }

    #[test]
    fn test_rejects_malformed_strings() {
        assert!(!is_valid_date(""));
        assert!(!is_valid_date("2025-6-1"));
        assert!(!is_valid_date("2025/06/01"));
        assert!(!is_valid_date("20250601"));
        assert!(!is_valid_date("2025-06-01 "));
        assert!(!is_valid_date("2025-06-01T00:00:00Z"));
        assert!(!is_valid_date("abcd-ef-gh"));
    }

    #[test]
    fn test_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let key = format_date(date);
        assert_eq!(key, "2025-06-01");
        assert!(is_valid_date(&key));
    }
}
