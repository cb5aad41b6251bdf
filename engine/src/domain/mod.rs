//! # Domain Module
//!
//! Contains the selection logic of the date/time picker.
//!
//! Everything here is pure state and computation. Nothing renders, nothing
//! listens for input; the host feeds operations in and reads projections
//! (months, time columns, navigation flags) back out.
//!
//! ## Module Organization
//!
//! - **models**: Parsed date/time parts and the tentative selection
//! - **bounds**: Min/max normalization and the disabled predicates
//! - **calendar**: Month grid generation and the month/year chooser options
//! - **time_enumerator**: Hour/minute/period columns for the time sub-picker
//! - **swipe**: Gesture accumulation and snapping into month steps
//! - **selection**: The picker state machine tying the above together
//!
//! ## Core Concepts
//!
//! - **Confirmed value**: What the host sees; changes only on confirm, clear,
//!   or external assignment
//! - **Tentative selection**: The uncommitted choice of an editing session
//! - **Working month**: The month the grid is centered on, independent of
//!   the selection
//! - **Normalized bound**: Min/max with omitted units filled in, queried by
//!   every disabled flag so the grid and the navigation controls agree
//!
//! ## Rules
//!
//! - A disabled day, month, or time can never become part of a selection
//! - The working month is never a fully disabled month
//! - Navigation never changes the selection, and selection never changes
//!   the working month
//! - Nothing re-renders while a gesture is still in flight

pub mod bounds;
pub mod calendar;
pub mod models;
pub mod selection;
pub mod swipe;
pub mod time_enumerator;

pub use bounds::NormalizedBound;
pub use calendar::CalendarService;
pub use selection::{DatetimePicker, EditSession, NavigationOutcome, PickerEvent, SelectionState};
pub use swipe::{MonthStep, SwipeController, SwipeOutcome, SwipePhase};
pub use time_enumerator::TimeEnumerator;
