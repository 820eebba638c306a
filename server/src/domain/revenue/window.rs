//! Named revenue windows
//!
//! Pure functions of "now" so the boundaries can be tested without a clock.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::error::RevenueError;
use crate::utils::time::parse_datetime;

/// Inclusive time window plus the period label reported back to callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueWindow {
    pub period: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl RevenueWindow {
    pub fn all_time() -> Self {
        Self {
            period: "all_time".to_string(),
            start: None,
            end: None,
        }
    }

    /// First instant of the current month through `now`
    pub fn this_month(now: NaiveDateTime) -> Self {
        let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
            .map(|d| d.and_time(NaiveTime::MIN))
            .unwrap_or(now);
        Self {
            period: format!("this_month_{}_{}", now.year(), now.month()),
            start: Some(start),
            end: Some(now),
        }
    }

    /// January 1 of the current year through `now`
    pub fn year_to_date(now: NaiveDateTime) -> Self {
        let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)
            .map(|d| d.and_time(NaiveTime::MIN))
            .unwrap_or(now);
        Self {
            period: format!("year_to_date_{}", now.year()),
            start: Some(start),
            end: Some(now),
        }
    }

    /// `[now - days, now]`; `days` must be at least 1
    pub fn last_n_days(now: NaiveDateTime, days: i64) -> Result<Self, RevenueError> {
        if days < 1 {
            return Err(RevenueError::invalid_parameter("days", "must be at least 1"));
        }
        let start = TimeDelta::try_days(days)
            .and_then(|delta| now.checked_sub_signed(delta))
            .ok_or_else(|| RevenueError::invalid_parameter("days", "is out of range"))?;
        Ok(Self {
            period: format!("last_{}_days", days),
            start: Some(start),
            end: Some(now),
        })
    }

    /// Both bounds required; start may equal end but not follow it
    pub fn custom_range(start_date: &str, end_date: &str) -> Result<Self, RevenueError> {
        let start = parse_datetime(start_date)?;
        let end = parse_datetime(end_date)?;
        ensure_ordered(Some(start), Some(end))?;
        Ok(Self {
            period: "custom_range".to_string(),
            start: Some(start),
            end: Some(end),
        })
    }
}

/// Reject a window whose start falls after its end
pub fn ensure_ordered(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<(), RevenueError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(RevenueError::RangeOrder),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn test_all_time_is_unbounded() {
        let w = RevenueWindow::all_time();
        assert_eq!(w.period, "all_time");
        assert!(w.start.is_none() && w.end.is_none());
    }

    #[test]
    fn test_this_month() {
        let now = at("2024-03-17T15:30:00");
        let w = RevenueWindow::this_month(now);
        assert_eq!(w.period, "this_month_2024_3");
        assert_eq!(w.start, Some(at("2024-03-01")));
        assert_eq!(w.end, Some(now));
    }

    #[test]
    fn test_this_month_on_first_instant() {
        let now = at("2024-12-01T00:00:00");
        let w = RevenueWindow::this_month(now);
        assert_eq!(w.start, Some(now));
        assert_eq!(w.period, "this_month_2024_12");
    }

    #[test]
    fn test_year_to_date() {
        let now = at("2024-07-04T09:00:00");
        let w = RevenueWindow::year_to_date(now);
        assert_eq!(w.period, "year_to_date_2024");
        assert_eq!(w.start, Some(at("2024-01-01")));
        assert_eq!(w.end, Some(now));
    }

    #[test]
    fn test_last_one_day_is_exactly_24_hours() {
        let now = at("2024-03-05T10:00:00");
        let w = RevenueWindow::last_n_days(now, 1).unwrap();
        assert_eq!(w.period, "last_1_days");
        assert_eq!(w.start, Some(at("2024-03-04T10:00:00")));
        assert_eq!(w.end, Some(now));
    }

    #[test]
    fn test_last_n_days_rejects_non_positive() {
        let now = at("2024-03-05");
        for days in [0, -3] {
            let err = RevenueWindow::last_n_days(now, days).unwrap_err();
            assert!(matches!(err, RevenueError::InvalidParameter { name: "days", .. }));
        }
    }

    #[test]
    fn test_last_n_days_out_of_range() {
        let err = RevenueWindow::last_n_days(at("2024-03-05"), i64::MAX).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_custom_range() {
        let w = RevenueWindow::custom_range("2024-03-01", "2024-03-31T23:59:59Z").unwrap();
        assert_eq!(w.period, "custom_range");
        assert_eq!(w.start, Some(at("2024-03-01")));
        assert_eq!(w.end, Some(at("2024-03-31T23:59:59")));
    }

    #[test]
    fn test_custom_range_equal_bounds_allowed() {
        assert!(RevenueWindow::custom_range("2024-03-01", "2024-03-01").is_ok());
    }

    #[test]
    fn test_custom_range_rejects_reversed_bounds() {
        let err = RevenueWindow::custom_range("2024-04-01", "2024-03-01").unwrap_err();
        assert!(matches!(err, RevenueError::RangeOrder));
    }

    #[test]
    fn test_custom_range_rejects_bad_dates() {
        let err = RevenueWindow::custom_range("yesterday", "2024-03-01").unwrap_err();
        assert!(matches!(err, RevenueError::DateFormat(_)));
        let err = RevenueWindow::custom_range("2024-03-01", "").unwrap_err();
        assert!(matches!(err, RevenueError::DateFormat(_)));
    }

    #[test]
    fn test_offset_bounds_compare_after_normalizing() {
        // 01:00+02:00 is 23:00 UTC the previous day, before the end bound
        let w = RevenueWindow::custom_range("2024-03-02T01:00:00+02:00", "2024-03-01T23:30:00")
            .unwrap();
        assert_eq!(w.start, Some(at("2024-03-01T23:00:00")));
    }
}
