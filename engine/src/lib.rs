//! # Datetime Engine
//!
//! Headless selection engine for a calendar and time picker: month grid
//! generation, min/max bounds, tentative versus confirmed selection,
//! swipe navigation, and the time sub-picker session.
//!
//! - **domain**: Selection logic and projections
//! - **io**: Gesture and overlay capabilities supplied by the host
//! - **config**: YAML-loadable picker attributes

pub mod config;
pub mod domain;
pub mod error;
pub mod io;

pub use config::PickerConfig;
pub use domain::{DatetimePicker, MonthStep, NavigationOutcome, PickerEvent};
pub use error::PickerError;
