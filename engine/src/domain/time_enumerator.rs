//! Time-of-day columns for the time sub-picker.
//!
//! Columns are generated fresh for every reference date. Without a
//! concrete reference date no bound applies and the full hour/minute
//! matrix is offered, even when "today" falls outside the bound.

use chrono::{NaiveDate, NaiveTime, Timelike};
use log::warn;
use shared::{HourCycle, Period, TimeColumns, TimeOption, TimeValue};

use super::bounds::NormalizedBound;

/// Convert a 12-hour clock reading to a 24-hour hour
pub fn to_24_hour(hour12: u32, period: Period) -> u32 {
    match (hour12 % 12, period) {
        (h, Period::Am) => h,
        (h, Period::Pm) => h + 12,
    }
}

/// Convert a 24-hour hour to its 12-hour reading
pub fn to_12_hour(hour24: u32) -> (u32, Period) {
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    (hour12, Period::of_hour(hour24))
}

/// Generates hour/minute/period columns with disabled flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEnumerator {
    hour_cycle: HourCycle,
    minute_step: u32,
}

impl TimeEnumerator {
    pub fn new(hour_cycle: HourCycle, minute_step: u32) -> Self {
        let minute_step = if (1..=60).contains(&minute_step) {
            minute_step
        } else {
            warn!("Minute step {} out of range, using 1", minute_step);
            1
        };
        Self { hour_cycle, minute_step }
    }

    pub fn hour_cycle(&self) -> HourCycle {
        self.hour_cycle
    }

    pub fn minute_step(&self) -> u32 {
        self.minute_step
    }

    /// Whether `minute` is one of the offered minute values
    pub fn offers_minute(&self, minute: u32) -> bool {
        minute < 60 && minute % self.minute_step == 0
    }

    /// Build all columns.
    ///
    /// `reference` is the date the time applies to; `selected` is the
    /// currently chosen time, which decides the period used for the hour
    /// column and the hour used for the minute column.
    pub fn enumerate(
        &self,
        reference: Option<NaiveDate>,
        selected: Option<NaiveTime>,
        bound: &NormalizedBound,
    ) -> TimeColumns {
        let hour_disabled = |hour24: u32| reference.is_some_and(|date| bound.is_hour_disabled(date, hour24));

        let hours = match self.hour_cycle {
            HourCycle::H12 => {
                let first = match selected.map_or(Period::Am, |t| Period::of_hour(t.hour())) {
                    Period::Am => 0,
                    Period::Pm => 12,
                };
                (first..first + 12)
                    .map(|hour24| {
                        let (hour12, _) = to_12_hour(hour24);
                        TimeOption {
                            value: TimeValue::Hour(hour12),
                            label: hour12.to_string(),
                            disabled: hour_disabled(hour24),
                        }
                    })
                    .collect()
            }
            HourCycle::H23 => (0..24)
                .map(|hour24| TimeOption {
                    value: TimeValue::Hour(hour24),
                    label: format!("{:02}", hour24),
                    disabled: hour_disabled(hour24),
                })
                .collect(),
        };

        let minutes = (0..60)
            .step_by(self.minute_step as usize)
            .map(|minute| TimeOption {
                value: TimeValue::Minute(minute),
                label: format!("{:02}", minute),
                disabled: match (reference, selected) {
                    (Some(date), Some(time)) => bound.is_time_disabled(date, time.hour(), minute),
                    _ => false,
                },
            })
            .collect();

        let periods = match self.hour_cycle {
            HourCycle::H12 => [Period::Am, Period::Pm]
                .into_iter()
                .map(|period| {
                    let mut hours_in_period = match period {
                        Period::Am => 0..12,
                        Period::Pm => 12..24,
                    };
                    TimeOption {
                        value: TimeValue::Period(period),
                        label: period.to_string(),
                        disabled: reference.is_some() && hours_in_period.all(|hour24| hour_disabled(hour24)),
                    }
                })
                .collect(),
            HourCycle::H23 => Vec::new(),
        };

        TimeColumns { hours, minutes, periods }
    }
}

impl Default for TimeEnumerator {
    fn default() -> Self {
        Self::new(HourCycle::H12, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_hour_conversions() {
        assert_eq!(to_24_hour(12, Period::Am), 0);
        assert_eq!(to_24_hour(12, Period::Pm), 12);
        assert_eq!(to_24_hour(9, Period::Pm), 21);
        assert_eq!(to_12_hour(0), (12, Period::Am));
        assert_eq!(to_12_hour(13), (1, Period::Pm));
        assert_eq!(to_12_hour(12), (12, Period::Pm));
    }

    #[test]
    fn test_full_matrix_without_reference_date() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T04:10:00"), Some("2022-05-21T21:30:00")).unwrap();
        let columns = TimeEnumerator::default().enumerate(None, None, &bound);

        assert_eq!(columns.hours.len(), 12);
        assert_eq!(columns.minutes.len(), 60);
        assert_eq!(columns.periods.len(), 2);
        assert!(columns.hours.iter().all(|o| !o.disabled));
        assert!(columns.minutes.iter().all(|o| !o.disabled));
        assert!(columns.periods.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_minute_step_reduces_minutes() {
        let columns = TimeEnumerator::new(HourCycle::H12, 15).enumerate(None, None, &NormalizedBound::unbounded());
        let values: Vec<TimeValue> = columns.minutes.iter().map(|o| o.value).collect();
        assert_eq!(
            values,
            vec![TimeValue::Minute(0), TimeValue::Minute(15), TimeValue::Minute(30), TimeValue::Minute(45)]
        );
    }

    #[test]
    fn test_invalid_minute_step_falls_back() {
        assert_eq!(TimeEnumerator::new(HourCycle::H12, 0).minute_step(), 1);
        assert_eq!(TimeEnumerator::new(HourCycle::H12, 90).minute_step(), 1);
    }

    #[test]
    fn test_min_date_disables_early_hours_and_minutes() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T04:10:00"), None).unwrap();
        let columns = TimeEnumerator::default().enumerate(Some(date(2022, 4, 22)), Some(time(4, 30)), &bound);

        let disabled_hours: Vec<String> = columns.hours.iter().filter(|o| o.disabled).map(|o| o.label.clone()).collect();
        assert_eq!(disabled_hours, vec!["12", "1", "2", "3"]);

        assert!(columns.minutes[9].disabled);
        assert!(!columns.minutes[10].disabled);
        assert!(columns.periods.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_max_date_disables_pm_period_when_max_is_morning() {
        let bound = NormalizedBound::resolve(None, Some("2022-05-21T09:00")).unwrap();
        let columns = TimeEnumerator::default().enumerate(Some(date(2022, 5, 21)), None, &bound);
        assert!(!columns.periods[0].disabled);
        assert!(columns.periods[1].disabled);
    }

    #[test]
    fn test_other_dates_have_no_restriction() {
        let bound = NormalizedBound::resolve(Some("2022-04-22T04:10:00"), Some("2022-05-21T21:30:00")).unwrap();
        let columns = TimeEnumerator::default().enumerate(Some(date(2022, 4, 30)), Some(time(0, 0)), &bound);
        assert!(columns.hours.iter().all(|o| !o.disabled));
        assert!(columns.minutes.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_h23_cycle() {
        let columns = TimeEnumerator::new(HourCycle::H23, 1).enumerate(None, None, &NormalizedBound::unbounded());
        assert_eq!(columns.hours.len(), 24);
        assert_eq!(columns.hours[0].label, "00");
        assert!(columns.periods.is_empty());
    }
}
