//! Selection state machine for a single picker instance.
//!
//! The picker is either `Idle`, showing its confirmed value, or `Editing`,
//! holding a tentative selection that only becomes the value on an
//! explicit [`DatetimePicker::confirm`]. The working month (what the grid
//! shows) is tracked separately and moves only through navigation, swipes,
//! the month/year chooser, or an external value assignment.
//!
//! All operations run to completion before returning. Overlay dismissals
//! are queued by their callback and applied at the start of the next
//! operation, never in the middle of one.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, info};
use serde::Serialize;
use shared::{
    CalendarFocusDate, CalendarMonth, DatetimeValue, HourCycle, MonthOption, NavigationState, Period, Presentation,
    TimeColumns, YearOption,
};

use super::bounds::NormalizedBound;
use super::calendar::CalendarService;
use super::models::{parse_value, TentativeSelection};
use super::swipe::{MonthStep, SwipeController, SwipeOutcome};
use super::time_enumerator::{to_24_hour, TimeEnumerator};
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::io::{DismissInbox, DismissReason, GestureEvent, GestureSource, OverlayController};

/// Notifications for the host, drained with [`DatetimePicker::take_events`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PickerEvent {
    /// Fired on confirm, clear, and external assignment
    ValueChanged(Option<DatetimeValue>),
    /// Fired on every working month change
    MonthChanged(CalendarFocusDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "month", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Moved(CalendarFocusDate),
    /// Destination month is fully disabled
    Refused,
    /// A gesture is in flight; the step runs once it settles
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    tentative: TentativeSelection,
    /// Selection the session started from, used to detect an unedited confirm
    baseline: TentativeSelection,
}

impl EditSession {
    pub fn tentative(&self) -> &TentativeSelection {
        &self.tentative
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Editing(EditSession),
}

/// The time sub-picker's own uncommitted choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TimePickerSession {
    pending: Option<NaiveTime>,
}

pub struct DatetimePicker {
    presentation: Presentation,
    multiple: bool,
    bound: NormalizedBound,
    calendar: CalendarService,
    times: TimeEnumerator,
    swipe: SwipeController,
    confirmed: Option<DatetimeValue>,
    state: SelectionState,
    working: CalendarFocusDate,
    now: NaiveDateTime,
    month_year_open: bool,
    visible: bool,
    time_picker: Option<TimePickerSession>,
    overlay: Option<Box<dyn OverlayController>>,
    dismissals: DismissInbox,
    events: Vec<PickerEvent>,
    render_revision: u64,
}

impl DatetimePicker {
    /// Create a picker anchored at the local wall-clock time
    pub fn new(config: &PickerConfig) -> Result<Self, PickerError> {
        Self::with_now(config, Local::now().naive_local())
    }

    /// Create a picker with an explicit notion of "now"
    pub fn with_now(config: &PickerConfig, now: NaiveDateTime) -> Result<Self, PickerError> {
        let config = config.clone().normalized();
        let bound = NormalizedBound::resolve(config.min.as_deref(), config.max.as_deref())?;
        let calendar = CalendarService::new(config.first_day_of_week, config.months_in_window);
        let confirmed = config.value.filter(|value| parse_value(value).is_some());

        let mut picker = Self {
            presentation: config.presentation,
            multiple: config.multiple,
            bound,
            calendar,
            times: TimeEnumerator::new(config.hour_cycle, config.minute_step),
            swipe: SwipeController::new(config.swipe_threshold),
            confirmed,
            state: SelectionState::Idle,
            working: CalendarFocusDate::of_date(now.date()),
            now,
            month_year_open: false,
            visible: true,
            time_picker: None,
            overlay: None,
            dismissals: DismissInbox::new(),
            events: Vec::new(),
            render_revision: 0,
        };
        picker.working = picker.anchor_for_confirmed();
        Ok(picker)
    }

    /// Attach the overlay that presents the time sub-picker
    pub fn with_overlay(mut self, mut overlay: Box<dyn OverlayController>) -> Self {
        overlay.on_dismissed(self.dismissals.callback());
        self.overlay = Some(overlay);
        self
    }

    // --- read side -------------------------------------------------------

    pub fn value(&self) -> Option<&DatetimeValue> {
        self.confirmed.as_ref()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SelectionState::Editing(_))
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn bound(&self) -> &NormalizedBound {
        &self.bound
    }

    pub fn working_month(&self) -> CalendarFocusDate {
        self.working
    }

    /// Header label of the visible month, e.g. "June 2021"
    pub fn month_label(&self) -> String {
        self.calendar.format_month_year(self.working)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn is_month_year_open(&self) -> bool {
        self.month_year_open
    }

    pub fn is_time_picker_open(&self) -> bool {
        self.time_picker.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_swiping(&self) -> bool {
        self.swipe.is_dragging()
    }

    /// Increases whenever a rendered projection may have changed
    pub fn render_revision(&self) -> u64 {
        self.render_revision
    }

    /// Selection currently highlighted: the tentative one while editing,
    /// otherwise the projection of the confirmed value
    pub fn active_selection(&self) -> TentativeSelection {
        match &self.state {
            SelectionState::Editing(session) => session.tentative.clone(),
            SelectionState::Idle => self.confirmed_selection(),
        }
    }

    pub fn months(&self) -> Vec<CalendarMonth> {
        if !self.presentation.has_calendar() {
            return Vec::new();
        }
        let active = self.active_selection();
        self.calendar.build_months(self.working, &self.bound, active.days(), self.today())
    }

    pub fn navigation_state(&self) -> NavigationState {
        self.calendar.navigation_state(self.working, &self.bound)
    }

    /// Time columns for the active day. A pending sub-picker choice takes
    /// precedence over the tentative time.
    pub fn time_columns(&self) -> TimeColumns {
        let active = self.active_selection();
        let selected = self
            .time_picker
            .and_then(|session| session.pending)
            .or(active.time());
        self.times.enumerate(active.day(), selected, &self.bound)
    }

    pub fn month_options(&self) -> Vec<MonthOption> {
        self.calendar.month_options(self.working.year, &self.bound)
    }

    pub fn year_options(&self) -> Vec<YearOption> {
        self.calendar.year_options(&self.bound, self.today())
    }

    /// Drain pending notifications in the order they happened
    pub fn take_events(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }

    // --- session transitions ---------------------------------------------

    /// Idle -> Editing. Already editing is a no-op.
    pub fn open(&mut self) {
        self.process_overlay_events();
        self.ensure_editing();
    }

    /// Commit the tentative selection.
    ///
    /// Returns the confirmed value. Without a committable selection (e.g.
    /// no day picked in a date presentation) nothing changes and `None`
    /// is returned.
    pub fn confirm(&mut self) -> Option<DatetimeValue> {
        self.process_overlay_events();
        if self.time_picker.is_some() {
            self.close_time_picker(DismissReason::Confirm);
        }

        let session = match &self.state {
            SelectionState::Idle => return self.confirmed.clone(),
            SelectionState::Editing(session) => session.clone(),
        };

        if session.tentative == session.baseline && self.confirmed.is_some() {
            self.state = SelectionState::Idle;
            self.bump();
            return self.confirmed.clone();
        }

        let Some(value) = self.committable_value(&session.tentative) else {
            debug!("Confirm ignored: nothing committable selected");
            return None;
        };

        info!("Confirmed picker value {}", value);
        self.confirmed = Some(value.clone());
        self.state = SelectionState::Idle;
        self.events.push(PickerEvent::ValueChanged(Some(value.clone())));
        self.bump();
        Some(value)
    }

    /// Discard the tentative selection. Idempotent.
    pub fn cancel(&mut self) {
        self.process_overlay_events();
        if self.time_picker.is_some() {
            self.close_time_picker(DismissReason::Cancel);
        }
        if self.is_editing() {
            debug!("Edit session cancelled");
            self.state = SelectionState::Idle;
            self.bump();
        }
    }

    /// Drop both the confirmed value and any tentative selection
    pub fn clear(&mut self) {
        self.process_overlay_events();
        if self.time_picker.is_some() {
            self.close_time_picker(DismissReason::Cancel);
        }
        self.state = SelectionState::Idle;
        if self.confirmed.take().is_some() {
            info!("Picker value cleared");
            self.events.push(PickerEvent::ValueChanged(None));
        }
        self.bump();
    }

    /// Programmatic value assignment from the host.
    ///
    /// Malformed values are treated as absent. The tentative selection is
    /// discarded and the grid jumps to the (clamped) month of the value.
    pub fn set_value_externally(&mut self, value: Option<DatetimeValue>) {
        self.process_overlay_events();
        if self.time_picker.is_some() {
            self.close_time_picker(DismissReason::Cancel);
        }
        self.confirmed = value.filter(|v| parse_value(v).is_some());
        self.state = SelectionState::Idle;
        info!(
            "Picker value set externally to {}",
            self.confirmed.as_ref().map_or_else(|| "nothing".to_string(), |v| v.to_string())
        );
        self.events.push(PickerEvent::ValueChanged(self.confirmed.clone()));
        let anchor = self.anchor_for_confirmed();
        self.set_working(anchor);
        self.bump();
    }

    /// Convenience for a single string value
    pub fn set_value(&mut self, value: &str) {
        self.set_value_externally(Some(DatetimeValue::from(value)));
    }

    /// Replace the bound at runtime. An inverted bound is rejected and the
    /// previous one kept; otherwise tentative days the new bound disables
    /// are dropped and tentative times clamped.
    pub fn set_bounds(&mut self, min: Option<&str>, max: Option<&str>) -> Result<(), PickerError> {
        self.process_overlay_events();
        self.bound = NormalizedBound::resolve(min, max)?;
        self.fit_selection_to_bound();
        let anchor = self.calendar.anchor_month(self.working, &self.bound);
        self.set_working(anchor);
        self.bump();
        Ok(())
    }

    // --- selection --------------------------------------------------------

    /// Tap on a day. Disabled or invalid days are ignored.
    pub fn select_day(&mut self, year: i32, month: u32, day: u32) -> bool {
        self.process_overlay_events();
        if !self.presentation.has_day() {
            debug!("Day selection ignored in {:?} presentation", self.presentation);
            return false;
        }
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return false;
        };
        if self.bound.is_date_disabled(date) {
            debug!("Day {} is outside the bound", date);
            return false;
        }

        self.ensure_editing();
        let multiple = self.multiple;
        if let SelectionState::Editing(session) = &mut self.state {
            if multiple {
                session.tentative.toggle_day(date);
            } else {
                session.tentative.set_day(date);
            }
        }
        self.fit_selection_to_bound();
        debug!("Selected day {}", date);
        self.bump();
        true
    }

    /// Pick a time of day. `hour` is read in the configured hour cycle:
    /// 1-12 with a period for h12, 0-23 without one for h23.
    pub fn select_time(&mut self, hour: u32, minute: u32, period: Option<Period>) -> bool {
        self.process_overlay_events();
        if !self.presentation.has_time() {
            return false;
        }
        let hour24 = match (self.times.hour_cycle(), period) {
            (HourCycle::H12, Some(period)) if (1..=12).contains(&hour) => to_24_hour(hour, period),
            (HourCycle::H23, None) if hour < 24 => hour,
            _ => {
                debug!("Hour {} with period {:?} does not fit the hour cycle", hour, period);
                return false;
            }
        };
        if !self.times.offers_minute(minute) {
            debug!("Minute {} is not offered", minute);
            return false;
        }
        let Some(time) = NaiveTime::from_hms_opt(hour24, minute, 0) else {
            return false;
        };
        if let Some(day) = self.active_selection().day() {
            if self.bound.is_time_disabled(day, hour24, minute) {
                debug!("Time {} is outside the bound on {}", time, day);
                return false;
            }
        }

        self.ensure_editing();
        if let Some(session) = self.time_picker.as_mut() {
            session.pending = Some(time);
        } else if let SelectionState::Editing(session) = &mut self.state {
            session.tentative.set_time(time);
        }
        self.bump();
        true
    }

    // --- navigation -------------------------------------------------------

    /// Move the working month by one. Refused when the destination month is
    /// fully disabled; deferred while a swipe is in flight.
    pub fn navigate_month(&mut self, step: MonthStep) -> NavigationOutcome {
        self.process_overlay_events();
        if self.swipe.is_dragging() {
            debug!("Deferring {:?} until the swipe settles", step);
            self.swipe.defer(step);
            return NavigationOutcome::Deferred;
        }
        self.apply_navigation(step)
    }

    /// Feed one gesture event. Returns the new working month when the
    /// gesture settled into a month change.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<CalendarFocusDate> {
        self.process_overlay_events();
        match self.swipe.handle(event) {
            SwipeOutcome::Ignored | SwipeOutcome::Tracking => None,
            SwipeOutcome::Settled(step) => {
                let mut moved = None;
                let deferred = self.swipe.drain_deferred();
                for step in step.into_iter().chain(deferred) {
                    if let NavigationOutcome::Moved(focus) = self.apply_navigation(step) {
                        moved = Some(focus);
                    }
                }
                moved
            }
        }
    }

    /// Drain a gesture source until it has nothing more to report
    pub fn pump_gestures(&mut self, source: &mut dyn GestureSource) -> Option<CalendarFocusDate> {
        let mut moved = None;
        while let Some(event) = source.poll_gesture() {
            if let Some(focus) = self.handle_gesture(event) {
                moved = Some(focus);
            }
        }
        moved
    }

    // --- secondary interfaces ---------------------------------------------

    /// Show or hide the month/year chooser; returns the new state
    pub fn toggle_month_year_view(&mut self) -> bool {
        self.process_overlay_events();
        self.month_year_open = !self.month_year_open;
        self.bump();
        self.month_year_open
    }

    /// Choose a month in the month/year chooser
    pub fn select_month_year(&mut self, year: i32, month: u32) -> bool {
        self.process_overlay_events();
        if !(1..=12).contains(&month) || self.bound.is_month_disabled(year, month) {
            return false;
        }
        let focus = CalendarFocusDate::new(year, month);
        if self.presentation == Presentation::MonthYear {
            self.ensure_editing();
            if let SelectionState::Editing(session) = &mut self.state {
                session.tentative.set_month(focus);
            }
        }
        self.set_working(focus);
        self.bump();
        true
    }

    /// Host visibility change. Hiding forces the month/year chooser closed
    /// so it does not come back stale.
    pub fn set_visible(&mut self, visible: bool) {
        self.process_overlay_events();
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible && self.month_year_open {
            debug!("Closing month/year chooser on hide");
            self.month_year_open = false;
        }
        self.bump();
    }

    /// Present the time sub-picker. Never touches the working month.
    pub fn open_time_picker(&mut self) -> bool {
        self.process_overlay_events();
        if !self.presentation.has_time() || self.time_picker.is_some() {
            return false;
        }
        self.ensure_editing();
        self.time_picker = Some(TimePickerSession::default());
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.present();
        }
        self.bump();
        true
    }

    /// Dismiss the time sub-picker from the engine side
    pub fn close_time_picker(&mut self, reason: DismissReason) {
        if self.time_picker.is_none() {
            return;
        }
        self.finish_time_picker(reason);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.dismiss(reason);
        }
    }

    /// Apply dismissals reported by the overlay since the last operation
    pub fn process_overlay_events(&mut self) {
        while let Some(reason) = self.dismissals.pop() {
            self.finish_time_picker(reason);
        }
    }

    // --- internals ----------------------------------------------------------

    fn ensure_editing(&mut self) {
        if self.is_editing() {
            return;
        }
        let baseline = self.confirmed_selection();
        self.state = SelectionState::Editing(EditSession { tentative: baseline.clone(), baseline });
        debug!("Edit session opened");
    }

    /// Only a confirming dismissal hands the pending time to the parent
    /// selection. A repeated notification for an already closed session
    /// does nothing.
    fn finish_time_picker(&mut self, reason: DismissReason) {
        let Some(session) = self.time_picker.take() else {
            return;
        };
        if reason == DismissReason::Confirm {
            if let (Some(time), SelectionState::Editing(edit)) = (session.pending, &mut self.state) {
                edit.tentative.set_time(time);
            }
            self.fit_selection_to_bound();
        }
        debug!("Time picker dismissed ({:?})", reason);
        self.bump();
    }

    /// Drop tentative days and months the bound disables, and pull the
    /// tentative and pending times into range for the tentative day.
    /// Times were only checked against the day active when they were
    /// picked, so this runs whenever the day or the bound changes.
    fn fit_selection_to_bound(&mut self) {
        let bound = self.bound;
        let SelectionState::Editing(session) = &mut self.state else {
            return;
        };
        let tentative = &mut session.tentative;
        tentative.retain_days(|day| !bound.is_date_disabled(day));
        if tentative.month().is_some_and(|month| bound.is_focus_disabled(month)) {
            tentative.clear_month();
        }

        let Some(day) = tentative.day() else {
            return;
        };
        if let Some(time) = tentative.time() {
            let clamped = bound.clamp_time(day, time);
            if clamped != time {
                debug!("Clamped tentative time {} to {} on {}", time, clamped, day);
                tentative.set_time(clamped);
            }
        }
        if let Some(picker) = self.time_picker.as_mut() {
            picker.pending = picker.pending.map(|time| bound.clamp_time(day, time));
        }
    }

    fn apply_navigation(&mut self, step: MonthStep) -> NavigationOutcome {
        let target = self.working.offset(step.delta());
        if self.bound.is_focus_disabled(target) {
            debug!("Navigation to {} refused: month is disabled", target);
            return NavigationOutcome::Refused;
        }
        self.set_working(target);
        NavigationOutcome::Moved(target)
    }

    fn set_working(&mut self, focus: CalendarFocusDate) {
        if self.working == focus {
            return;
        }
        self.working = focus;
        info!("Working month is now {}", focus);
        self.events.push(PickerEvent::MonthChanged(focus));
        self.bump();
    }

    fn confirmed_selection(&self) -> TentativeSelection {
        self.confirmed
            .as_ref()
            .map(TentativeSelection::from_value)
            .unwrap_or_default()
    }

    /// Month of the confirmed value (or today), clamped into the bound
    fn anchor_for_confirmed(&self) -> CalendarFocusDate {
        let preferred = self
            .confirmed_selection()
            .month()
            .unwrap_or_else(|| CalendarFocusDate::of_date(self.today()));
        self.calendar.anchor_month(preferred, &self.bound)
    }

    fn committable_value(&self, selection: &TentativeSelection) -> Option<DatetimeValue> {
        match self.presentation {
            Presentation::Date if self.multiple => {
                if selection.days().is_empty() {
                    return None;
                }
                Some(DatetimeValue::Multiple(
                    selection.days().iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
                ))
            }
            Presentation::Date => selection.day().map(|d| DatetimeValue::Single(d.format("%Y-%m-%d").to_string())),
            Presentation::DateTime => {
                let day = selection.day()?;
                let time = selection.time().unwrap_or_else(|| self.default_time(day));
                Some(DatetimeValue::Single(day.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string()))
            }
            Presentation::Time => selection.time().map(|t| DatetimeValue::Single(t.format("%H:%M").to_string())),
            Presentation::MonthYear => selection
                .month()
                .map(|m| DatetimeValue::Single(format!("{:04}-{:02}", m.year, m.month))),
        }
    }

    /// Current wall-clock minute, pulled into range for `day`
    fn default_time(&self, day: NaiveDate) -> NaiveTime {
        let clock = self.now.time();
        let minute = clock.minute() - clock.minute() % self.times.minute_step();
        let start = NaiveTime::from_hms_opt(clock.hour(), minute, 0).unwrap_or(clock);
        self.bound.clamp_time(day, start)
    }

    fn bump(&mut self) {
        self.render_revision += 1;
    }
}
