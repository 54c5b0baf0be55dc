use crate::keywords::{Keyword, Keywords};
use chrono::{Duration, NaiveDate};

/// Canonical date key format. Entry files and user-facing keys both use it.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a date as its canonical `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` key back into a date.
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).ok()
}

/// Resolves user date input against a reference date.
///
/// Accepts the keywords `today` and `yesterday` (plus any synonyms the user
/// registered in their config) and literal `YYYY-MM-DD` keys.
pub fn resolve_date_input(input: &str, reference_date: NaiveDate) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if Keywords::matches(Keyword::Today, trimmed) {
        return Some(reference_date);
    }
    if Keywords::matches(Keyword::Yesterday, trimmed) {
        return Some(reference_date - Duration::days(1));
    }
    parse_date_key(trimmed)
}
