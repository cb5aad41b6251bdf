use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which parts of a date/time the picker lets the user choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presentation {
    /// Calendar grid only
    Date,
    /// Time-of-day columns only
    Time,
    /// Calendar grid plus time-of-day columns
    #[default]
    DateTime,
    /// Month and year chooser only
    MonthYear,
}

impl Presentation {
    /// Whether a day must be picked before the value can be committed
    pub fn has_day(self) -> bool {
        matches!(self, Presentation::Date | Presentation::DateTime)
    }

    /// Whether the time-of-day columns are part of this presentation
    pub fn has_time(self) -> bool {
        matches!(self, Presentation::Time | Presentation::DateTime)
    }

    /// Whether a calendar month is rendered at all
    pub fn has_calendar(self) -> bool {
        !matches!(self, Presentation::Time)
    }
}

/// Clock style for the hour column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    /// 1-12 with an AM/PM column
    #[default]
    H12,
    /// 00-23, no period column
    H23,
}

/// Half of the day in a 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    /// Period a 24-hour value falls into
    pub fn of_hour(hour24: u32) -> Self {
        if hour24 < 12 { Period::Am } else { Period::Pm }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

/// The externally visible, committed value of a picker.
///
/// Serialized untagged so a host can hand over either `"2022-05-03"` or
/// `["2022-05-03", "2022-05-04"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatetimeValue {
    Single(String),
    Multiple(Vec<String>),
}

impl DatetimeValue {
    /// All ISO-like strings carried by this value, in order
    pub fn entries(&self) -> Vec<&str> {
        match self {
            DatetimeValue::Single(value) => vec![value.as_str()],
            DatetimeValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DatetimeValue::Single(value) => value.is_empty(),
            DatetimeValue::Multiple(values) => values.is_empty(),
        }
    }
}

impl From<&str> for DatetimeValue {
    fn from(value: &str) -> Self {
        DatetimeValue::Single(value.to_string())
    }
}

impl fmt::Display for DatetimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries().join(", "))
    }
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Empty padding cell after the last day of the month (grid alignment)
    PaddingAfter,
}

/// A render-ready month: generated on demand, never stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    /// Number of padding cells before day 1, relative to the configured first weekday
    pub first_day_of_week: u32,
    /// True when every day of the month falls outside the bound
    pub disabled: bool,
}

impl CalendarMonth {
    /// Only the real days of the month, without padding cells
    pub fn month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.day_type == CalendarDayType::MonthDay)
    }

    pub fn focus(&self) -> CalendarFocusDate {
        CalendarFocusDate::new(self.year, self.month)
    }
}

/// Represents a single cell in the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    pub year: i32,
    pub month: u32,
    /// Day of month, 0 for padding cells
    pub day: u32,
    pub day_type: CalendarDayType,
    pub is_today: bool,
    /// Highlighted because the in-progress selection contains this day
    pub is_active: bool,
    pub is_disabled: bool,
}

/// The year/month currently anchoring the rendered calendar (the working date)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarFocusDate {
    pub year: i32,
    pub month: u32,
}

impl CalendarFocusDate {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Shift by a signed number of months, rolling the year over as needed
    pub fn offset(self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    pub fn of_date(date: chrono::NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for CalendarFocusDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Enabled/disabled flags for the previous/next month controls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

/// The value carried by one entry of a time column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeValue {
    /// Hour as displayed (1-12 in h12, 0-23 in h23)
    Hour(u32),
    Minute(u32),
    Period(Period),
}

/// A single selectable entry of the time-of-day sub-picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeOption {
    pub value: TimeValue,
    pub label: String,
    pub disabled: bool,
}

/// All time-of-day columns for one reference date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeColumns {
    pub hours: Vec<TimeOption>,
    pub minutes: Vec<TimeOption>,
    /// Empty for the 24-hour cycle
    pub periods: Vec<TimeOption>,
}

/// Entry of the month column in the month/year chooser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthOption {
    pub month: u32,
    pub label: String,
    pub disabled: bool,
}

/// Entry of the year column in the month/year chooser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearOption {
    pub year: i32,
    pub disabled: bool,
}
