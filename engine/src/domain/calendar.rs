//! Calendar grid logic for the date picker.
//!
//! This module turns a working month, the resolved bound and the active
//! selection into render-ready months. Nothing here is stored: every
//! projection is recomputed from its inputs, so a bound change can never
//! leave a stale disabled flag behind.

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use shared::{
    month_name, CalendarDay, CalendarDayType, CalendarFocusDate, CalendarMonth, MonthOption, NavigationState,
    YearOption,
};

use super::bounds::NormalizedBound;
use super::models::days_in_month;

/// Years offered on each side of today when a bound side is missing
const OPEN_YEAR_SPAN: i32 = 100;

/// Calendar service that builds the month grid and its navigation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarService {
    /// 0 = Sunday, 1 = Monday, ...
    first_day_of_week: u32,
    /// Number of consecutive months rendered around the working month
    window_size: usize,
}

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new(first_day_of_week: u32, window_size: usize) -> Self {
        let first_day_of_week = if first_day_of_week < 7 {
            first_day_of_week
        } else {
            warn!("First day of week {} out of range, using Sunday", first_day_of_week);
            0
        };
        // Keep the working month in the middle
        let window_size = match window_size {
            0 => 1,
            n if n % 2 == 0 => n + 1,
            n => n,
        };
        Self { first_day_of_week, window_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Generate one month with today/active/disabled flags per day
    pub fn generate_calendar_month(
        &self,
        focus: CalendarFocusDate,
        bound: &NormalizedBound,
        active_days: &[NaiveDate],
        today: NaiveDate,
    ) -> CalendarMonth {
        let CalendarFocusDate { year, month } = focus;
        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);

        let mut calendar_days = Vec::with_capacity(42);

        for _ in 0..first_day {
            calendar_days.push(padding_day(year, month, CalendarDayType::PaddingBefore));
        }

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month, day);
            calendar_days.push(CalendarDay {
                year,
                month,
                day,
                day_type: CalendarDayType::MonthDay,
                is_today: date == Some(today),
                is_active: date.is_some_and(|d| active_days.contains(&d)),
                is_disabled: bound.is_day_disabled(year, month, day),
            });
        }

        // Complete the last week row
        while calendar_days.len() % 7 != 0 {
            calendar_days.push(padding_day(year, month, CalendarDayType::PaddingAfter));
        }

        CalendarMonth {
            year,
            month,
            days: calendar_days,
            first_day_of_week: first_day,
            disabled: bound.is_month_disabled(year, month),
        }
    }

    /// Build the sliding window of months centered on the working month
    pub fn build_months(
        &self,
        working: CalendarFocusDate,
        bound: &NormalizedBound,
        active_days: &[NaiveDate],
        today: NaiveDate,
    ) -> Vec<CalendarMonth> {
        let half = (self.window_size / 2) as i32;
        (-half..=half)
            .map(|offset| self.generate_calendar_month(working.offset(offset), bound, active_days, today))
            .collect()
    }

    /// Previous/next controls share the month predicate used for the grid
    pub fn navigation_state(&self, working: CalendarFocusDate, bound: &NormalizedBound) -> NavigationState {
        NavigationState {
            previous_disabled: bound.is_focus_disabled(working.previous()),
            next_disabled: bound.is_focus_disabled(working.next()),
        }
    }

    /// Month to show for a preferred month: never a fully disabled one
    pub fn anchor_month(&self, preferred: CalendarFocusDate, bound: &NormalizedBound) -> CalendarFocusDate {
        let anchor = bound.clamp_month(preferred);
        if anchor != preferred {
            debug!("Clamped displayed month {} into range as {}", preferred, anchor);
        }
        anchor
    }

    /// Month column of the month/year chooser for one year
    pub fn month_options(&self, year: i32, bound: &NormalizedBound) -> Vec<MonthOption> {
        (1..=12)
            .map(|month| MonthOption {
                month,
                label: self.month_name(month).to_string(),
                disabled: bound.is_month_disabled(year, month),
            })
            .collect()
    }

    /// Year column of the month/year chooser.
    ///
    /// A bounded side ends at the bound's year; an open side spans a
    /// century from today.
    pub fn year_options(&self, bound: &NormalizedBound, today: NaiveDate) -> Vec<YearOption> {
        let first = bound.min().map_or(today.year() - OPEN_YEAR_SPAN, |min| min.year());
        let last = bound.max().map_or(today.year() + OPEN_YEAR_SPAN, |max| max.year());
        (first..=last)
            .map(|year| YearOption { year, disabled: bound.is_year_disabled(year) })
            .collect()
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        days_in_month(year, month)
    }

    /// Number of padding cells before day 1, given the configured first weekday
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            // chrono: Sunday = 0 .. Saturday = 6
            Some(date) => (date.weekday().num_days_from_sunday() + 7 - self.first_day_of_week) % 7,
            None => 0,
        }
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        month_name(month)
    }

    /// "June 2021" style label
    pub fn format_month_year(&self, focus: CalendarFocusDate) -> String {
        format!("{} {}", self.month_name(focus.month), focus.year)
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new(0, 3)
    }
}

fn padding_day(year: i32, month: u32, day_type: CalendarDayType) -> CalendarDay {
    CalendarDay {
        year,
        month,
        day: 0,
        day_type,
        is_today: false,
        is_active: false,
        is_disabled: true,
    }
}
