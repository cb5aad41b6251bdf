//! Plain-text projections of the picker for terminal output.
//!
//! Cells are four columns wide: `[13]` is selected, `(13)` disabled and
//! ` 13*` today. Padding cells stay blank.

use chrono::{Datelike, NaiveDate};
use datetime_engine::DatetimePicker;
use shared::{CalendarDay, CalendarDayType, CalendarMonth, TimeOption};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn render_month(month: &CalendarMonth) -> String {
    let mut out = format!("{}\n", month.focus());
    let start = week_start(month);
    let header: Vec<String> = (0..7)
        .map(|i| format!(" {} ", WEEKDAYS[((start + i) % 7) as usize]))
        .collect();
    out.push_str(&header.concat());
    out.push('\n');

    for week in month.days.chunks(7) {
        let row: Vec<String> = week.iter().map(render_cell).collect();
        out.push_str(row.concat().trim_end());
        out.push('\n');
    }
    if month.disabled {
        out.push_str("(out of range)\n");
    }
    out
}

/// Weekday of the first column, recovered from the padding before day 1
fn week_start(month: &CalendarMonth) -> u32 {
    NaiveDate::from_ymd_opt(month.year, month.month, 1)
        .map_or(0, |date| (date.weekday().num_days_from_sunday() + 7 - month.first_day_of_week) % 7)
}

fn render_cell(day: &CalendarDay) -> String {
    match day.day_type {
        CalendarDayType::PaddingBefore | CalendarDayType::PaddingAfter => "    ".to_string(),
        CalendarDayType::MonthDay if day.is_active => format!("[{:>2}]", day.day),
        CalendarDayType::MonthDay if day.is_disabled => format!("({:>2})", day.day),
        CalendarDayType::MonthDay if day.is_today => format!(" {:>2}*", day.day),
        CalendarDayType::MonthDay => format!(" {:>2} ", day.day),
    }
}

fn render_options(options: &[TimeOption]) -> String {
    options
        .iter()
        .map(|o| if o.disabled { format!("({})", o.label) } else { o.label.clone() })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Header, working month grid and, when the presentation has them, the
/// time columns
pub fn render_picker(picker: &DatetimePicker) -> String {
    let mut out = String::new();
    let navigation = picker.navigation_state();
    out.push_str(&format!(
        "{} {} {}\n",
        if navigation.previous_disabled { " " } else { "<" },
        picker.month_label(),
        if navigation.next_disabled { " " } else { ">" },
    ));

    let months = picker.months();
    if let Some(working) = months.iter().find(|m| m.focus() == picker.working_month()) {
        out.push_str(&render_month(working));
    }

    if picker.presentation().has_time() {
        let columns = picker.time_columns();
        out.push_str(&format!("hours:   {}\n", render_options(&columns.hours)));
        out.push_str(&format!("minutes: {}\n", render_options(&columns.minutes)));
        if !columns.periods.is_empty() {
            out.push_str(&format!("period:  {}\n", render_options(&columns.periods)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datetime_engine::PickerConfig;

    fn picker(yaml: &str) -> DatetimePicker {
        let config = PickerConfig::from_yaml_str(yaml).unwrap();
        let now = NaiveDate::from_ymd_opt(2022, 5, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
        DatetimePicker::with_now(&config, now).unwrap()
    }

    #[test]
    fn test_month_grid_marks_selected_and_disabled_days() {
        let picker = picker("presentation: date\nvalue: \"2022-05-03\"\nmin: \"2022-05-02\"\n");
        let text = render_picker(&picker);

        assert!(text.starts_with("  May 2022 >"));
        assert!(text.contains(" Su  Mo  Tu  We  Th  Fr  Sa "));
        assert!(text.contains("( 1)  2 [ 3]"));
        assert!(text.contains(" 10*"));
        assert!(!text.contains("hours:"));
    }

    #[test]
    fn test_week_starts_on_configured_day() {
        let picker = picker("presentation: date\nfirst_day_of_week: 1\nvalue: \"2022-05-03\"\n");
        assert!(render_picker(&picker).contains(" Mo  Tu  We  Th  Fr  Sa  Su "));
    }

    #[test]
    fn test_time_columns_rendered_for_time_presentations() {
        let picker = picker("presentation: time\nhour_cycle: h23\nminute_step: 30\n");
        let text = render_picker(&picker);
        assert!(text.contains("minutes: 00 30\n"));
        assert!(!text.contains("period:"));
    }
}
