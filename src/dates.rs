//! Date parameter normalization.
//!
//! Query dates may arrive as already-formatted text, as calendar dates, as
//! datetimes, or not at all (meaning "today"). [`normalize_date`] folds all
//! of these into the terminal's fixed `YYYY-MM-DD` text form before use.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// The date format every query date is normalized to.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date parameter in any of the accepted forms.
#[derive(Clone, Debug, PartialEq)]
pub enum DateArg {
    /// Pre-formatted text, forwarded as-is (no format validation; malformed
    /// text surfaces as the terminal's own error).
    Text(String),

    /// A calendar date.
    Day(NaiveDate),

    /// A datetime; only the date part is kept.
    Moment(NaiveDateTime),
}

impl From<&str> for DateArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NaiveDate> for DateArg {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl From<NaiveDateTime> for DateArg {
    fn from(moment: NaiveDateTime) -> Self {
        Self::Moment(moment)
    }
}

/// Normalize an optional date parameter to `YYYY-MM-DD` text.
///
/// Unset and empty-text inputs both mean the current local calendar date.
/// Non-empty text passes through unchanged.
pub fn normalize_date(date: Option<DateArg>) -> String {
    match date {
        None => today(),
        Some(DateArg::Text(text)) if text.is_empty() => today(),
        Some(DateArg::Text(text)) => text,
        Some(DateArg::Day(day)) => day.format(DATE_FORMAT).to_string(),
        Some(DateArg::Moment(moment)) => moment.format(DATE_FORMAT).to_string(),
    }
}

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
