//! # Scenarios
//!
//! A scenario is a picker configuration plus a list of user and host
//! actions, replayed in order against one picker.
//!
//! ## YAML Format
//!
//! ```yaml
//! now: "2022-05-10T08:00:00"
//! picker:
//!   presentation: date-time
//!   value: "2022-05-03T10:00:00"
//!   min: "2022-04-22"
//! steps:
//!   - action: select_day
//!     year: 2022
//!     month: 5
//!     day: 9
//!   - action: swipe
//!     events:
//!       - kind: start
//!       - kind: move
//!         delta: -80.0
//!       - kind: end
//!   - action: confirm
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use datetime_engine::io::{DismissReason, GestureEvent};
use datetime_engine::{DatetimePicker, MonthStep, NavigationOutcome, PickerConfig, PickerEvent};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::{CalendarFocusDate, DatetimeValue, NavigationState, Period};
use std::fs;
use std::path::Path;

use crate::overlay::ConsoleOverlay;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Wall-clock time the picker treats as now; the local time if absent
    #[serde(default)]
    pub now: Option<String>,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Open,
    SelectDay { year: i32, month: u32, day: u32 },
    SelectTime {
        hour: u32,
        minute: u32,
        #[serde(default)]
        period: Option<Period>,
    },
    Navigate { step: MonthStep },
    Swipe { events: Vec<GestureEvent> },
    ToggleMonthYear,
    SelectMonthYear { year: i32, month: u32 },
    OpenTimePicker,
    /// The engine closes the time picker itself
    CloseTimePicker { reason: DismissReason },
    /// The user dismisses the time picker overlay
    DismissTimePicker { reason: DismissReason },
    Confirm,
    Cancel,
    Clear,
    SetValue {
        #[serde(default)]
        value: Option<DatetimeValue>,
    },
    SetBounds {
        #[serde(default)]
        min: Option<String>,
        #[serde(default)]
        max: Option<String>,
    },
    SetVisible { visible: bool },
}

/// What a single step amounted to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    Accepted(bool),
    Navigation(NavigationOutcome),
    Month(Option<CalendarFocusDate>),
    Value(Option<DatetimeValue>),
    Rejected(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub outcome: StepOutcome,
    pub events: Vec<PickerEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub value: Option<DatetimeValue>,
    pub editing: bool,
    pub month: String,
    pub navigation: NavigationState,
    pub render_revision: u64,
    pub steps: Vec<StepReport>,
}

impl Scenario {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid scenario")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content =
            fs::read_to_string(path).with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario = Self::from_yaml_str(&yaml_content)?;
        debug!("Loaded scenario with {} steps from {:?}", scenario.steps.len(), path);
        Ok(scenario)
    }

    pub fn now(&self) -> Result<NaiveDateTime> {
        match self.now.as_deref() {
            None => Ok(Local::now().naive_local()),
            Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                .with_context(|| format!("Invalid scenario time {:?}", raw)),
        }
    }
}

/// One picker wired to a console overlay, driven step by step
pub struct Runner {
    picker: DatetimePicker,
    overlay: ConsoleOverlay,
    reports: Vec<StepReport>,
}

impl Runner {
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let overlay = ConsoleOverlay::new();
        let picker = DatetimePicker::with_now(&scenario.picker, scenario.now()?)
            .context("Failed to create picker")?
            .with_overlay(Box::new(overlay.clone()));
        info!("Picker ready at {}", picker.month_label());
        Ok(Self { picker, overlay, reports: Vec::new() })
    }

    pub fn picker(&self) -> &DatetimePicker {
        &self.picker
    }

    pub fn run(&mut self, steps: &[Step]) {
        for step in steps {
            self.apply(step);
        }
        self.picker.process_overlay_events();
    }

    pub fn apply(&mut self, step: &Step) -> &StepReport {
        let index = self.reports.len() + 1;
        debug!("Step {}: {:?}", index, step);
        let picker = &mut self.picker;

        let outcome = match step {
            Step::Open => {
                picker.open();
                StepOutcome::Done
            }
            Step::SelectDay { year, month, day } => StepOutcome::Accepted(picker.select_day(*year, *month, *day)),
            Step::SelectTime { hour, minute, period } => {
                StepOutcome::Accepted(picker.select_time(*hour, *minute, *period))
            }
            Step::Navigate { step } => StepOutcome::Navigation(picker.navigate_month(*step)),
            Step::Swipe { events } => {
                let mut source = events.clone().into_iter();
                StepOutcome::Month(picker.pump_gestures(&mut source))
            }
            Step::ToggleMonthYear => StepOutcome::Accepted(picker.toggle_month_year_view()),
            Step::SelectMonthYear { year, month } => StepOutcome::Accepted(picker.select_month_year(*year, *month)),
            Step::OpenTimePicker => StepOutcome::Accepted(picker.open_time_picker()),
            Step::CloseTimePicker { reason } => {
                picker.close_time_picker(*reason);
                StepOutcome::Done
            }
            Step::DismissTimePicker { reason } => {
                self.overlay.user_dismiss(*reason);
                StepOutcome::Done
            }
            Step::Confirm => StepOutcome::Value(picker.confirm()),
            Step::Cancel => {
                picker.cancel();
                StepOutcome::Done
            }
            Step::Clear => {
                picker.clear();
                StepOutcome::Done
            }
            Step::SetValue { value } => {
                picker.set_value_externally(value.clone());
                StepOutcome::Done
            }
            Step::SetBounds { min, max } => match picker.set_bounds(min.as_deref(), max.as_deref()) {
                Ok(()) => StepOutcome::Done,
                Err(e) => {
                    warn!("Step {} rejected: {}", index, e);
                    StepOutcome::Rejected(e.to_string())
                }
            },
            Step::SetVisible { visible } => {
                picker.set_visible(*visible);
                StepOutcome::Done
            }
        };

        let events = self.picker.take_events();
        self.reports.push(StepReport { step: index, outcome, events });
        &self.reports[index - 1]
    }

    pub fn report(&self) -> Report {
        Report {
            value: self.picker.value().cloned(),
            editing: self.picker.is_editing(),
            month: self.picker.month_label(),
            navigation: self.picker.navigation_state(),
            render_revision: self.picker.render_revision(),
            steps: self.reports.clone(),
        }
    }
}
