//! Time access and form-date handling.
//!
//! Every rule that depends on "today" reads it through the [`Clock`]
//! trait so validators and reference generators stay deterministic in
//! tests.  Dates are compared as local wall-clock times.

use chrono::{DateTime, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Clock abstracts access to the current local time.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Real-time clock backed by the system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

/// Parses a date typed into a form.
///
/// Accepts `YYYY-MM-DD` (taken as local midnight), a naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]`, or an RFC 3339 timestamp, which is
/// converted to local time.  Blank input yields `None`.
pub fn parse_form_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// The last representable millisecond of `date`: 23:59:59.999.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}

/// The same wall-clock time twelve calendar months before `now`.
pub fn one_year_before(now: NaiveDateTime) -> Option<NaiveDateTime> {
    now.checked_sub_months(Months::new(12))
}

/// Whole days from `from` to `to`, floored.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_milliseconds().div_euclid(86_400_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn plain_dates_parse_as_midnight() {
        assert_eq!(parse_form_date("2025-03-01"), Some(at(2025, 3, 1, 0, 0)));
        assert_eq!(parse_form_date(" 2025-03-01 "), Some(at(2025, 3, 1, 0, 0)));
    }

    #[test]
    fn naive_and_offset_timestamps_parse() {
        assert_eq!(
            parse_form_date("2025-03-01T14:05:00"),
            Some(at(2025, 3, 1, 14, 5))
        );
        assert!(parse_form_date("2025-03-01T14:05:00Z").is_some());
    }

    #[test]
    fn timestamps_without_seconds_parse() {
        assert_eq!(
            parse_form_date("2025-06-01T10:00"),
            Some(at(2025, 6, 1, 10, 0))
        );
    }

    #[test]
    fn garbage_and_blank_do_not_parse() {
        assert_eq!(parse_form_date(""), None);
        assert_eq!(parse_form_date("not a date"), None);
        assert_eq!(parse_form_date("2025-02-30"), None);
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let end = end_of_day(date);
        assert_eq!(end.date(), date);
        assert_eq!(end.format("%H:%M:%S%.3f").to_string(), "23:59:59.999");
    }

    #[test]
    fn one_year_before_uses_calendar_months() {
        assert_eq!(
            one_year_before(at(2024, 2, 29, 8, 0)),
            Some(at(2023, 2, 28, 8, 0))
        );
    }

    #[test]
    fn days_between_floors_partial_days() {
        assert_eq!(days_between(at(2025, 1, 1, 0, 0), at(2025, 1, 2, 23, 0)), 1);
        assert_eq!(days_between(at(2025, 1, 2, 0, 0), at(2025, 1, 1, 12, 0)), -1);
    }

    #[test]
    fn fixed_clock_reports_its_instant() {
        let clock = FixedClock::new(at(2025, 6, 15, 10, 30));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }
}
