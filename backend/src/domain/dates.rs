//! Calendar-date boundary handling.
//!
//! Dates cross the engine boundary in day/month/year textual form. Internally
//! everything is a [`NaiveDate`]; the round trip through the textual form is
//! lossless for valid dates.

use chrono::NaiveDate;
use thiserror::Error;

/// Textual form used at the boundary, e.g. `31/10/1960`.
pub const BOUNDARY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Oldest plausible age for a date of birth, in years.
pub const MAX_AGE_YEARS: u32 = 120;

/// Error returned when a boundary date string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid dd/mm/yyyy date")]
pub struct BoundaryDateError {
    /// The unparseable input.
    pub input: String,
}

/// Parse a `dd/mm/yyyy` string into a calendar date.
///
/// # Examples
/// ```
/// use backend::domain::dates::parse_boundary_date;
/// use chrono::NaiveDate;
///
/// let date = parse_boundary_date("22/09/2025").expect("valid date");
/// assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 22).expect("valid ymd"));
/// ```
pub fn parse_boundary_date(raw: &str) -> Result<NaiveDate, BoundaryDateError> {
    NaiveDate::parse_from_str(raw.trim(), BOUNDARY_DATE_FORMAT).map_err(|_| BoundaryDateError {
        input: raw.to_owned(),
    })
}

/// Format a calendar date into its `dd/mm/yyyy` boundary form.
pub fn format_boundary_date(date: NaiveDate) -> String {
    date.format(BOUNDARY_DATE_FORMAT).to_string()
}

/// Earliest admissible date of birth relative to `today`.
///
/// Falls back to clamping at the calendar edge when the subtraction would
/// leave the supported range.
pub fn earliest_birth_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(chrono::Months::new(MAX_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
}
