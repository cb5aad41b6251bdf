use chrono::{NaiveDate, NaiveTime};
use log::warn;
use shared::{CalendarFocusDate, DatetimeValue};

use super::datetime_parts::{parse_datetime, DatetimeParts};

/// The in-progress, uncommitted choice of an editing session.
///
/// `days` holds at most one date unless the picker runs in multiple mode.
/// It is kept sorted so two selections with the same days compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TentativeSelection {
    days: Vec<NaiveDate>,
    month: Option<CalendarFocusDate>,
    time: Option<NaiveTime>,
}

impl TentativeSelection {
    /// Project a committed value back into selection form
    pub fn from_value(value: &DatetimeValue) -> Self {
        let mut selection = Self::default();
        for parts in parse_value(value).unwrap_or_default() {
            if let Some(date) = parts.date() {
                selection.insert_day(date);
            }
            if selection.time.is_none() {
                selection.time = parts.time();
            }
            if selection.month.is_none() {
                selection.month = parts.focus();
            }
        }
        if let Some(first) = selection.days.first() {
            selection.month = Some(CalendarFocusDate::of_date(*first));
        }
        selection
    }

    /// First (or only) selected day
    pub fn day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn month(&self) -> Option<CalendarFocusDate> {
        self.month
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.month.is_none() && self.time.is_none()
    }

    /// Replace the date component, keeping any time already chosen
    pub fn set_day(&mut self, date: NaiveDate) {
        self.days = vec![date];
        self.month = Some(CalendarFocusDate::of_date(date));
    }

    /// Add the day if absent, remove it if present (multiple mode)
    pub fn toggle_day(&mut self, date: NaiveDate) {
        if let Some(idx) = self.days.iter().position(|d| *d == date) {
            self.days.remove(idx);
        } else {
            self.insert_day(date);
        }
        self.month = self.days.first().map(|d| CalendarFocusDate::of_date(*d));
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = Some(time);
    }

    pub fn set_month(&mut self, focus: CalendarFocusDate) {
        self.month = Some(focus);
    }

    /// Keep only the days `keep` accepts; the month follows the first
    /// remaining day
    pub fn retain_days(&mut self, mut keep: impl FnMut(NaiveDate) -> bool) {
        let before = self.days.len();
        self.days.retain(|day| keep(*day));
        if self.days.len() != before {
            self.month = self.days.first().map(|d| CalendarFocusDate::of_date(*d));
        }
    }

    pub fn clear_month(&mut self) {
        self.month = None;
    }

    fn insert_day(&mut self, date: NaiveDate) {
        if let Err(idx) = self.days.binary_search(&date) {
            self.days.insert(idx, date);
        }
    }
}

/// Parse every entry of a value. `None` when any entry is malformed, so a
/// partially broken value is treated as absent rather than half-applied.
pub fn parse_value(value: &DatetimeValue) -> Option<Vec<DatetimeParts>> {
    if value.is_empty() {
        return None;
    }
    let entries = value.entries();
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        match parse_datetime(entry) {
            Some(parts) => parsed.push(parts),
            None => {
                warn!("Ignoring malformed picker value entry {:?}", entry);
                return None;
            }
        }
    }
    Some(parsed)
}
