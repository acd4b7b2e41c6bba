//! Date rendering for the views.

use clientele_core::models::customer::parse_date_of_birth;

/// Display format for dates (month/day/year, no padding).
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

/// Format a raw date for display: `N/A` when absent, `Invalid Date`
/// when it does not parse.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => "N/A".into(),
        Some(raw) => match parse_date_of_birth(raw) {
            Some(date) => date.format(DISPLAY_FORMAT).to_string(),
            None => "Invalid Date".into(),
        },
    }
}

/// Normalize a raw date to the `YYYY-MM-DD` a date input edits.
/// Absent or unparseable dates become an empty field.
pub fn date_for_editing(raw: Option<&str>) -> String {
    raw.and_then(parse_date_of_birth)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
