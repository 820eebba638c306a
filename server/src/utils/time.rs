//! Time utility functions
//!
//! Payment timestamps are stored without an offset and read as UTC wall clock.
//! Anything compared against `payment_date` goes through [`normalize`] first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

/// Date/time text that could not be read as ISO 8601
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct DateFormatError {
    pub input: String,
    pub reason: String,
}

impl DateFormatError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Offset-carrying formats tried after RFC 3339. `%z` takes `+0530` and `+05:30`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Offset-free formats, read as UTC wall clock
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Conversion into the canonical offset-free UTC timestamp
pub trait Normalize {
    fn normalize(self) -> NaiveDateTime;
}

impl Normalize for NaiveDateTime {
    fn normalize(self) -> NaiveDateTime {
        self
    }
}

impl<Tz: TimeZone> Normalize for DateTime<Tz> {
    fn normalize(self) -> NaiveDateTime {
        self.naive_utc()
    }
}

/// Strip the offset from a timestamp after shifting it to UTC.
///
/// Offset-free input is returned unchanged. Idempotent.
pub fn normalize<T: Normalize>(ts: T) -> NaiveDateTime {
    ts.normalize()
}

/// Current instant as an offset-free UTC timestamp
pub fn utc_now() -> NaiveDateTime {
    normalize(Utc::now())
}

/// Parse ISO 8601 date or date-time text into a normalized timestamp.
///
/// Accepted:
/// - RFC 3339 with `Z` or `±hh:mm` (`2024-03-05T10:00:00Z`)
/// - compact offsets (`2024-03-05T10:00:00+0530`)
/// - no offset, `T` or space separator, seconds optional (`2024-03-05 10:00`)
/// - date only, read as midnight (`2024-03-05`)
///
/// Day/month orderings like `03/04/2024` are ambiguous and rejected.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, DateFormatError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(DateFormatError::new(text, "empty date string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(normalize(dt));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(normalize(dt));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN)),
        Err(e) => {
            tracing::debug!(input = %s, error = %e, "Rejected date string");
            Err(DateFormatError::new(
                text,
                format!(
                    "'{}' is not an ISO 8601 date or date-time (e.g. 2024-03-05 or 2024-03-05T10:00:00Z)",
                    s
                ),
            ))
        }
    }
}

/// Parse an optional bound; absent or blank text means unbounded
pub fn parse_optional_datetime(
    text: Option<&str>,
) -> Result<Option<NaiveDateTime>, DateFormatError> {
    match text {
        Some(s) if !s.trim().is_empty() => parse_datetime(s).map(Some),
        _ => Ok(None),
    }
}

/// Format as ISO 8601 without offset (`2024-03-05T10:00:00`, fraction only when non-zero)
pub fn to_iso(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Half-open bounds `[Jan 1 year, Jan 1 year+1)` of a calendar year.
///
/// `None` outside 1..=9999.
pub fn year_bounds(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    if !(1..=9999).contains(&year) {
        return None;
    }
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_time(NaiveTime::MIN);
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?.and_time(NaiveTime::MIN);
    Some((start, end))
}
