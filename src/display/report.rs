//! Text helpers shared by the fixed-width reports
//!
//! Dates print US style (`MM/DD/YYYY`) inside reports and ISO style in
//! file names. Centering follows `format!("{:^w$}")`: odd padding goes to
//! the right.

use chrono::NaiveDate;

/// `MM/DD/YYYY`
pub fn us_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// `YYYY-MM-DD`, used as the file name prefix
pub fn file_date_prefix(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Center `title` in a line of `width` columns, keeping trailing padding
pub fn centered(title: &str, width: usize) -> String {
    format!("{:^width$}", title, width = width)
}

/// Placeholder the dump output uses for absent values
pub fn or_none_marker(value: Option<&str>) -> &str {
    value.unwrap_or("*None*")
}

/// Keep only word characters (letters, digits, underscore), then take the
/// first `max_chars` of what is left
pub fn word_chars(s: &str, max_chars: usize) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .take(max_chars)
        .collect()
}

/// Parse a user-entered date: ISO `YYYY-MM-DD` or US `MM/DD/YYYY`
pub fn parse_user_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_forms() {
        assert_eq!(us_date(date(2024, 3, 7)), "03/07/2024");
        assert_eq!(file_date_prefix(date(2024, 3, 7)), "2024-03-07");
    }

    #[test]
    fn test_centered_puts_extra_space_right() {
        assert_eq!(centered("abc", 6), " abc  ");
        assert_eq!(centered("toolong", 3), "toolong");
    }

    #[test]
    fn test_word_chars() {
        assert_eq!(word_chars("Checking Account", 16), "CheckingAccount");
        assert_eq!(word_chars("Devices, etc.", 16), "Devicesetc");
        assert_eq!(word_chars("Long Term Care Insurance", 16), "LongTermCareInsu");
    }

    #[test]
    fn test_none_marker() {
        assert_eq!(or_none_marker(None), "*None*");
        assert_eq!(or_none_marker(Some("1001")), "1001");
    }

    #[test]
    fn test_parse_user_date() {
        assert_eq!(parse_user_date("2024-02-01"), Some(date(2024, 2, 1)));
        assert_eq!(parse_user_date(" 02/01/2024 "), Some(date(2024, 2, 1)));
        assert_eq!(parse_user_date("Feb 1"), None);
    }
}
