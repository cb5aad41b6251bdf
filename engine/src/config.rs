//! # Picker Configuration
//!
//! Every attribute a host can set on a picker, loadable from YAML.
//!
//! ## YAML Format
//!
//! ```yaml
//! presentation: date-time
//! value: "2022-04-22T10:00:00"
//! min: "2022-04-22"
//! max: "2022-05-21"
//! first_day_of_week: 1
//! hour_cycle: h23
//! minute_step: 5
//! ```
//!
//! Missing keys fall back to their defaults. Out-of-range numbers are
//! repaired by [`PickerConfig::normalized`] rather than rejected.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::{DatetimeValue, HourCycle, Presentation};
use std::fs;
use std::path::Path;

use crate::domain::swipe::DEFAULT_SWIPE_THRESHOLD;
use crate::error::PickerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub presentation: Presentation,
    /// Initial value, a single string or a list in multiple mode
    pub value: Option<DatetimeValue>,
    pub min: Option<String>,
    pub max: Option<String>,
    /// Allow several days at once; only honored with the date presentation
    pub multiple: bool,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u32,
    pub hour_cycle: HourCycle,
    /// Minute interval offered by the time columns
    pub minute_step: u32,
    /// Months rendered around the working month
    pub months_in_window: usize,
    /// Accumulated gesture delta needed to move one month
    pub swipe_threshold: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            presentation: Presentation::DateTime,
            value: None,
            min: None,
            max: None,
            multiple: false,
            first_day_of_week: 0,
            hour_cycle: HourCycle::H12,
            minute_step: 1,
            months_in_window: 3,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl PickerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PickerError> {
        let config: PickerConfig = serde_yaml::from_str(yaml)?;
        Ok(config.normalized())
    }

    /// Load config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PickerError> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml_content)?;
        debug!("Loaded picker config from {:?}", path);
        Ok(config)
    }

    /// Repair values the engine cannot work with
    pub fn normalized(mut self) -> Self {
        if self.multiple && self.presentation != Presentation::Date {
            warn!("multiple is only supported with the date presentation, disabling it");
            self.multiple = false;
        }
        if self.first_day_of_week > 6 {
            warn!("first_day_of_week {} out of range, using 0", self.first_day_of_week);
            self.first_day_of_week = 0;
        }
        if !(1..=60).contains(&self.minute_step) {
            warn!("minute_step {} out of range, using 1", self.minute_step);
            self.minute_step = 1;
        }
        if self.months_in_window == 0 || self.months_in_window % 2 == 0 {
            let repaired = (self.months_in_window + 1) | 1;
            warn!("months_in_window {} must be odd, using {}", self.months_in_window, repaired);
            self.months_in_window = repaired;
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold > 0.0) {
            warn!("swipe_threshold {} must be positive, using {}", self.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
            self.swipe_threshold = DEFAULT_SWIPE_THRESHOLD;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config = PickerConfig::from_yaml_str("min: \"2022-04-22\"\n").unwrap();
        assert_eq!(config.min.as_deref(), Some("2022-04-22"));
        assert_eq!(config.presentation, Presentation::DateTime);
        assert_eq!(config.hour_cycle, HourCycle::H12);
        assert_eq!(config.minute_step, 1);
        assert_eq!(config.months_in_window, 3);
    }

    #[test]
    fn test_parses_all_fields() {
        let yaml = r#"
presentation: date
value: ["2022-05-03", "2022-05-04"]
multiple: true
first_day_of_week: 1
hour_cycle: h23
minute_step: 15
months_in_window: 5
swipe_threshold: 80.0
"#;
        let config = PickerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.presentation, Presentation::Date);
        assert!(config.multiple);
        assert_eq!(
            config.value,
            Some(DatetimeValue::Multiple(vec!["2022-05-03".to_string(), "2022-05-04".to_string()]))
        );
        assert_eq!(config.hour_cycle, HourCycle::H23);
        assert_eq!(config.minute_step, 15);
        assert_eq!(config.months_in_window, 5);
        assert_eq!(config.swipe_threshold, 80.0);
    }

    #[test]
    fn test_normalizes_out_of_range_values() {
        let config = PickerConfig {
            presentation: Presentation::DateTime,
            multiple: true,
            first_day_of_week: 9,
            minute_step: 0,
            months_in_window: 4,
            swipe_threshold: -1.0,
            ..PickerConfig::default()
        }
        .normalized();

        assert!(!config.multiple);
        assert_eq!(config.first_day_of_week, 0);
        assert_eq!(config.minute_step, 1);
        assert_eq!(config.months_in_window, 5);
        assert_eq!(config.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
    }

    #[test]
    fn test_zero_window_becomes_one() {
        let config = PickerConfig { months_in_window: 0, ..PickerConfig::default() }.normalized();
        assert_eq!(config.months_in_window, 1);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let result = PickerConfig::from_yaml_str("presentation: [not, a, presentation]");
        assert!(matches!(result, Err(PickerError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("picker.yaml");
        fs::write(&path, "presentation: month-year\nvalue: \"2021-06\"\n").unwrap();

        let config = PickerConfig::load(&path).unwrap();
        assert_eq!(config.presentation, Presentation::MonthYear);
        assert_eq!(config.value, Some(DatetimeValue::Single("2021-06".to_string())));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = PickerConfig::load(temp_dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(PickerError::Io(_))));
    }
}
