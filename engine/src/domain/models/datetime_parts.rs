//! Parsing of the loosely typed ISO-like strings a host hands to the picker.
//!
//! Values and bounds arrive as strings of varying precision (`2022`,
//! `2022-04`, `2022-04-22T10:00:00.000Z`, `10:30`, ...). They are parsed
//! exactly once into [`DatetimeParts`]; nothing downstream looks at the raw
//! string again.

use chrono::{NaiveDate, NaiveTime};
use shared::CalendarFocusDate;

/// Calendar units present in a parsed string. Missing units stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatetimeParts {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

impl DatetimeParts {
    /// Full calendar date, when year, month and day were all supplied
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    /// Time of day, when hour and minute were both supplied
    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour?, self.minute?, 0)
    }

    /// Year/month pair, when both were supplied
    pub fn focus(&self) -> Option<CalendarFocusDate> {
        Some(CalendarFocusDate::new(self.year?, self.month?))
    }
}

/// Parse an ISO-like date/time string.
///
/// Returns `None` for anything malformed. A trailing `Z` or numeric offset
/// is dropped and the wall-clock digits are kept as written. Seconds and
/// fractions are validated but not retained.
pub fn parse_datetime(raw: &str) -> Option<DatetimeParts> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (date_part, time_part) = match raw.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None if raw.contains(':') => ("", Some(raw)),
        None => (raw, None),
    };

    let mut parts = DatetimeParts::default();

    if !date_part.is_empty() {
        let fields: Vec<&str> = date_part.split('-').collect();
        if fields.len() > 3 || !fields.iter().all(|f| is_digits(f)) || fields[0].len() != 4 {
            return None;
        }
        let year = fields[0].parse::<i32>().ok()?;
        parts.year = Some(year);

        if let Some(month) = fields.get(1) {
            let month = month.parse::<u32>().ok()?;
            if !(1..=12).contains(&month) {
                return None;
            }
            parts.month = Some(month);
        }

        if let Some(day) = fields.get(2) {
            let day = day.parse::<u32>().ok()?;
            // Rejects Feb 30 and friends
            NaiveDate::from_ymd_opt(year, parts.month?, day)?;
            parts.day = Some(day);
        }
    }

    if let Some(time) = time_part {
        // "2022-04-22T" is not a valid string
        if time.is_empty() {
            return None;
        }
        let fields: Vec<&str> = strip_offset(time).split(':').collect();
        if fields.len() < 2 || fields.len() > 3 {
            return None;
        }
        if !is_digits(fields[0]) || !is_digits(fields[1]) {
            return None;
        }
        let hour = fields[0].parse::<u32>().ok()?;
        let minute = fields[1].parse::<u32>().ok()?;
        if let Some(seconds) = fields.get(2) {
            let whole = seconds.split('.').next().unwrap_or_default();
            if !is_digits(whole) || whole.parse::<u32>().ok()? > 59 {
                return None;
            }
        }
        NaiveTime::from_hms_opt(hour, minute, 0)?;
        parts.hour = Some(hour);
        parts.minute = Some(minute);
    }

    Some(parts)
}

/// Drop a `Z` suffix or a `+hh:mm` / `-hh:mm` offset from the time portion
fn strip_offset(time: &str) -> &str {
    let time = time
        .strip_suffix('Z')
        .or_else(|| time.strip_suffix('z'))
        .unwrap_or(time);
    match time.rfind(['+', '-']) {
        Some(idx) => &time[..idx],
        None => time,
    }
}

fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Get the number of days in a given month and year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_datetime_with_offset() {
        let parts = parse_datetime("2021-12-25T12:40:00.000Z").unwrap();
        assert_eq!(parts.date(), NaiveDate::from_ymd_opt(2021, 12, 25));
        assert_eq!(parts.time(), NaiveTime::from_hms_opt(12, 40, 0));

        let parts = parse_datetime("2025-06-13T09:00:00-04:00").unwrap();
        assert_eq!(parts.hour, Some(9));
        assert_eq!(parts.minute, Some(0));
    }

    #[test]
    fn test_parse_partial_precision() {
        let year_only = parse_datetime("2022").unwrap();
        assert_eq!(year_only.year, Some(2022));
        assert_eq!(year_only.month, None);
        assert_eq!(year_only.date(), None);

        let month = parse_datetime("2022-04").unwrap();
        assert_eq!(month.focus(), Some(CalendarFocusDate::new(2022, 4)));
        assert_eq!(month.day, None);

        let time_only = parse_datetime("10:30").unwrap();
        assert_eq!(time_only.year, None);
        assert_eq!(time_only.time(), NaiveTime::from_hms_opt(10, 30, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime("2022-13-01"), None);
        assert_eq!(parse_datetime("2023-02-29"), None);
        assert_eq!(parse_datetime("2022-04-22T"), None);
        assert_eq!(parse_datetime("2022-04-22T25:00"), None);
        assert_eq!(parse_datetime("22-04-22"), None);
        assert_eq!(parse_datetime("2022-04-22T10:00:61"), None);
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(parse_datetime("2024-02-29").is_some());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }
}
