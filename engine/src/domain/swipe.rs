//! Gesture-driven month navigation.
//!
//! The controller accumulates deltas while a gesture is in flight and only
//! resolves them into a month step once the gesture ends. Programmatic
//! navigation requested mid-gesture is parked and replayed after the
//! gesture settles, so the two never race.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::io::GestureEvent;

pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// A single discrete month move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStep {
    Previous,
    Next,
}

impl MonthStep {
    pub fn delta(self) -> i32 {
        match self {
            MonthStep::Previous => -1,
            MonthStep::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipePhase {
    Settled,
    Dragging { accumulated: f64 },
}

/// What a gesture event amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Event had no effect (e.g. an `End` with no gesture in flight)
    Ignored,
    /// Gesture still in flight; nothing may re-render yet
    Tracking,
    /// Gesture resolved, with the month step it snapped to, if any
    Settled(Option<MonthStep>),
}

#[derive(Debug, Clone)]
pub struct SwipeController {
    phase: SwipePhase,
    threshold: f64,
    deferred: VecDeque<MonthStep>,
}

impl SwipeController {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            warn!("Swipe threshold {} is not positive, using {}", threshold, DEFAULT_SWIPE_THRESHOLD);
            DEFAULT_SWIPE_THRESHOLD
        };
        Self {
            phase: SwipePhase::Settled,
            threshold,
            deferred: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SwipePhase::Dragging { .. })
    }

    pub fn handle(&mut self, event: GestureEvent) -> SwipeOutcome {
        match (self.phase, event) {
            (SwipePhase::Settled, GestureEvent::Start) => {
                self.phase = SwipePhase::Dragging { accumulated: 0.0 };
                SwipeOutcome::Tracking
            }
            (SwipePhase::Dragging { .. }, GestureEvent::Start) => SwipeOutcome::Tracking,
            (SwipePhase::Settled, GestureEvent::Move { delta }) => {
                self.phase = SwipePhase::Dragging { accumulated: finite_or_zero(delta) };
                SwipeOutcome::Tracking
            }
            (SwipePhase::Dragging { accumulated }, GestureEvent::Move { delta }) => {
                self.phase = SwipePhase::Dragging { accumulated: accumulated + finite_or_zero(delta) };
                SwipeOutcome::Tracking
            }
            (SwipePhase::Dragging { accumulated }, GestureEvent::End) => {
                self.phase = SwipePhase::Settled;
                let step = self.snap(accumulated);
                debug!("Swipe settled at {:.1} -> {:?}", accumulated, step);
                SwipeOutcome::Settled(step)
            }
            (SwipePhase::Dragging { accumulated }, GestureEvent::Cancel) => {
                self.phase = SwipePhase::Settled;
                debug!("Swipe cancelled at {:.1}", accumulated);
                SwipeOutcome::Settled(None)
            }
            (SwipePhase::Settled, GestureEvent::End | GestureEvent::Cancel) => SwipeOutcome::Ignored,
        }
    }

    /// Park a programmatic step until the current gesture settles
    pub fn defer(&mut self, step: MonthStep) {
        self.deferred.push_back(step);
    }

    /// Steps parked while the gesture was in flight, oldest first
    pub fn drain_deferred(&mut self) -> Vec<MonthStep> {
        self.deferred.drain(..).collect()
    }

    /// A gesture moves at most one month: the window only holds the
    /// neighbours of the working month.
    fn snap(&self, accumulated: f64) -> Option<MonthStep> {
        if accumulated.abs() < self.threshold {
            None
        } else if accumulated < 0.0 {
            Some(MonthStep::Previous)
        } else {
            Some(MonthStep::Next)
        }
    }
}

impl Default for SwipeController {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

fn finite_or_zero(delta: f64) -> f64 {
    if delta.is_finite() { delta } else { 0.0 }
}
