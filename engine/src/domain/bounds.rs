//! Bounds resolution for the picker.
//!
//! Min/max strings are resolved once into concrete instants. Every
//! enablement question (day, month, year, time of day) is then answered by
//! a pure predicate over that resolved pair, so grid building, navigation
//! and time enumeration can never disagree about what is in range.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use shared::CalendarFocusDate;

use super::models::{days_in_month, parse_datetime};
use crate::error::PickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundEdge {
    Min,
    Max,
}

/// Inclusive `[min, max]` range with each side optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizedBound {
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
}

impl NormalizedBound {
    /// A bound that allows everything
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Resolve raw min/max strings.
    ///
    /// Unparseable strings are treated as absent. A min later than the max
    /// is rejected instead of being silently swapped.
    pub fn resolve(min: Option<&str>, max: Option<&str>) -> Result<Self, PickerError> {
        let resolved_min = min.and_then(|raw| resolve_edge(raw, BoundEdge::Min));
        let resolved_max = max.and_then(|raw| resolve_edge(raw, BoundEdge::Max));

        if let (Some(lo), Some(hi)) = (resolved_min, resolved_max) {
            if lo > hi {
                return Err(PickerError::InvertedBounds {
                    min: min.unwrap_or_default().to_string(),
                    max: max.unwrap_or_default().to_string(),
                });
            }
        }

        Ok(Self { min: resolved_min, max: resolved_max })
    }

    pub fn min(&self) -> Option<NaiveDateTime> {
        self.min
    }

    pub fn max(&self) -> Option<NaiveDateTime> {
        self.max
    }

    /// True when the whole day `[00:00, 23:59]` lies outside the bound.
    /// Invalid dates are always disabled.
    pub fn is_day_disabled(&self, year: i32, month: u32, day: u32) -> bool {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.is_date_disabled(date),
            None => true,
        }
    }

    pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
        self.min.is_some_and(|min| date < min.date()) || self.max.is_some_and(|max| date > max.date())
    }

    /// True when every day in the month is disabled
    pub fn is_month_disabled(&self, year: i32, month: u32) -> bool {
        let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, month, 1),
            NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)),
        ) else {
            return true;
        };
        self.min.is_some_and(|min| last < min.date()) || self.max.is_some_and(|max| first > max.date())
    }

    pub fn is_focus_disabled(&self, focus: CalendarFocusDate) -> bool {
        self.is_month_disabled(focus.year, focus.month)
    }

    /// True when every month of the year is disabled
    pub fn is_year_disabled(&self, year: i32) -> bool {
        self.min.is_some_and(|min| year < min.year()) || self.max.is_some_and(|max| year > max.year())
    }

    /// Time restrictions apply only on the min or max date itself. Any
    /// other reference date, even the last enabled day of a month, allows
    /// the whole day.
    pub fn is_time_disabled(&self, reference: NaiveDate, hour: u32, minute: u32) -> bool {
        let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
            return true;
        };
        let before_min = self.min.is_some_and(|min| reference == min.date() && time < min.time());
        let after_max = self.max.is_some_and(|max| reference == max.date() && time > max.time());
        before_min || after_max
    }

    /// True when no minute of the (24-hour) hour is selectable
    pub fn is_hour_disabled(&self, reference: NaiveDate, hour24: u32) -> bool {
        (0..60).all(|minute| self.is_time_disabled(reference, hour24, minute))
    }

    /// Nearest month that is not fully disabled
    pub fn clamp_month(&self, focus: CalendarFocusDate) -> CalendarFocusDate {
        if let Some(min) = self.min {
            let floor = CalendarFocusDate::of_date(min.date());
            if focus < floor {
                return floor;
            }
        }
        if let Some(max) = self.max {
            let ceiling = CalendarFocusDate::of_date(max.date());
            if focus > ceiling {
                return ceiling;
            }
        }
        focus
    }

    /// Pull a time into range for the given date
    pub fn clamp_time(&self, date: NaiveDate, time: NaiveTime) -> NaiveTime {
        if let Some(min) = self.min {
            if date == min.date() && time < min.time() {
                return min.time();
            }
        }
        if let Some(max) = self.max {
            if date == max.date() && time > max.time() {
                return max.time();
            }
        }
        time
    }
}

/// Fill the units the string left out: a min starts at the beginning of its
/// coarsest unit, a max ends at the end of it.
fn resolve_edge(raw: &str, edge: BoundEdge) -> Option<NaiveDateTime> {
    let Some(parts) = parse_datetime(raw) else {
        warn!("Ignoring malformed {:?} bound {:?}", edge, raw);
        return None;
    };
    let Some(year) = parts.year else {
        warn!("Ignoring {:?} bound {:?} without a date", edge, raw);
        return None;
    };

    let (month, hour, minute) = match edge {
        BoundEdge::Min => (parts.month.unwrap_or(1), parts.hour.unwrap_or(0), parts.minute.unwrap_or(0)),
        BoundEdge::Max => (parts.month.unwrap_or(12), parts.hour.unwrap_or(23), parts.minute.unwrap_or(59)),
    };
    let day = match edge {
        BoundEdge::Min => parts.day.unwrap_or(1),
        BoundEdge::Max => parts.day.unwrap_or_else(|| days_in_month(year, month)),
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_fills_coarse_bounds() {
        let bound = NormalizedBound::resolve(Some("2022"), Some("2022-02")).unwrap();
        assert_eq!(bound.min(), date(2022, 1, 1).and_hms_opt(0, 0, 0));
        assert_eq!(bound.max(), date(2022, 2, 28).and_hms_opt(23, 59, 0));
    }

    #[test]
    fn test_resolve_treats_malformed_as_absent() {
        let bound = NormalizedBound::resolve(Some("yesterday"), Some("2022-05-21")).unwrap();
        assert_eq!(bound.min(), None);
        assert!(bound.max().is_some());
    }

    #[test]
    fn test_resolve_rejects_inverted_bounds() {
        let result = NormalizedBound::resolve(Some("2022-06-01"), Some("2022-05-01"));
        assert!(matches!(result, Err(PickerError::InvertedBounds { .. })));
    }

    #[test]
    fn test_day_disabled_outside_bound() {
        let bound = NormalizedBound::resolve(Some("2022-04-22"), Some("2022-05-21")).unwrap();
        assert!(bound.is_day_disabled(2022, 4, 21));
        assert!(!bound.is_day_disabled(2022, 4, 22));
        assert!(!bound.is_day_disabled(2022, 5, 21));
        assert!(bound.is_day_disabled(2022, 5, 22));
        assert!(bound.is_day_disabled(2022, 2, 30));
    }

    #[test]
    fn test_min_time_does_not_disable_its_day() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T23:30"), None).unwrap();
        assert!(!bound.is_day_disabled(2022, 4, 22));
    }

    #[test]
    fn test_month_disabled() {
        let bound = NormalizedBound::resolve(Some("2022-04-22"), Some("2022-05-21")).unwrap();
        assert!(bound.is_month_disabled(2022, 3));
        assert!(!bound.is_month_disabled(2022, 4));
        assert!(!bound.is_month_disabled(2022, 5));
        assert!(bound.is_month_disabled(2022, 6));
        assert!(bound.is_month_disabled(2022, 13));
    }

    #[test]
    fn test_day_enablement_is_monotonic() {
        let bound = NormalizedBound::resolve(Some("2022-01-10"), Some("2022-03-05")).unwrap();
        let mut day = date(2021, 12, 1);
        let mut seen_enabled = false;
        let mut seen_disabled_after = false;
        while day <= date(2022, 4, 30) {
            let disabled = bound.is_date_disabled(day);
            if !disabled {
                assert!(!seen_disabled_after, "enabled day {} after the range closed", day);
                seen_enabled = true;
            } else if seen_enabled {
                seen_disabled_after = true;
            }
            day = day.succ_opt().unwrap();
        }
        assert!(seen_enabled && seen_disabled_after);
    }

    #[test]
    fn test_month_enablement_is_monotonic() {
        let bound = NormalizedBound::resolve(Some("2021-11-20"), Some("2022-03-02")).unwrap();
        let mut focus = CalendarFocusDate::new(2021, 1);
        let mut enabled = Vec::new();
        while focus <= CalendarFocusDate::new(2022, 12) {
            if !bound.is_focus_disabled(focus) {
                enabled.push(focus);
            }
            focus = focus.next();
        }
        assert_eq!(
            enabled,
            vec![
                CalendarFocusDate::new(2021, 11),
                CalendarFocusDate::new(2021, 12),
                CalendarFocusDate::new(2022, 1),
                CalendarFocusDate::new(2022, 2),
                CalendarFocusDate::new(2022, 3),
            ]
        );
        // A month is enabled exactly when one of its days is
        for month in &enabled {
            let any_day = (1..=days_in_month(month.year, month.month))
                .any(|d| !bound.is_day_disabled(month.year, month.month, d));
            assert!(any_day, "{} enabled without an enabled day", month);
        }
    }

    #[test]
    fn test_year_disabled() {
        let bound = NormalizedBound::resolve(Some("2020-06-01"), Some("2022-02-01")).unwrap();
        assert!(bound.is_year_disabled(2019));
        assert!(!bound.is_year_disabled(2020));
        assert!(!bound.is_year_disabled(2022));
        assert!(bound.is_year_disabled(2023));
    }

    #[test]
    fn test_time_disabled_only_on_bound_dates() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T04:10:00"), Some("2022-05-21T21:30:00")).unwrap();
        assert!(bound.is_time_disabled(date(2022, 4, 22), 4, 9));
        assert!(!bound.is_time_disabled(date(2022, 4, 22), 4, 10));
        assert!(!bound.is_time_disabled(date(2022, 5, 21), 21, 30));
        assert!(bound.is_time_disabled(date(2022, 5, 21), 21, 31));
        assert!(!bound.is_time_disabled(date(2022, 4, 30), 0, 0));
        assert!(!bound.is_time_disabled(date(2022, 4, 30), 23, 59));
    }

    #[test]
    fn test_hour_disabled() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T04:10:00"), None).unwrap();
        assert!(bound.is_hour_disabled(date(2022, 4, 22), 3));
        assert!(!bound.is_hour_disabled(date(2022, 4, 22), 4));
        assert!(!bound.is_hour_disabled(date(2022, 4, 23), 3));
    }

    #[test]
    fn test_clamp_month() {
        let min_only = NormalizedBound::resolve(Some("2021-06-01"), None).unwrap();
        assert_eq!(min_only.clamp_month(CalendarFocusDate::new(2021, 5)), CalendarFocusDate::new(2021, 6));

        let max_only = NormalizedBound::resolve(None, Some("2021-06-30")).unwrap();
        assert_eq!(max_only.clamp_month(CalendarFocusDate::new(2021, 7)), CalendarFocusDate::new(2021, 6));

        let both = NormalizedBound::resolve(Some("2021-06-01"), Some("2021-06-30")).unwrap();
        assert_eq!(both.clamp_month(CalendarFocusDate::new(2021, 5)), CalendarFocusDate::new(2021, 6));
        assert_eq!(both.clamp_month(CalendarFocusDate::new(2021, 6)), CalendarFocusDate::new(2021, 6));
    }

    #[test]
    fn test_clamp_time() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T04:10"), Some("2022-05-21T21:30")).unwrap();
        let early = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
        let late = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        assert_eq!(bound.clamp_time(date(2022, 4, 22), early), NaiveTime::from_hms_opt(4, 10, 0).unwrap());
        assert_eq!(bound.clamp_time(date(2022, 5, 21), late), NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(bound.clamp_time(date(2022, 5, 1), late), late);
    }
}
