//! Schedule grid configuration.
//!
//! This module provides the [`GridConfig`] type: the pixel-to-time
//! quantization step, the operating hours of the schedule, and the pointer
//! movement threshold that separates a click from a drag.
//!
//! # Reference Values
//!
//! - 40 px per grid unit, 15 minutes per unit
//! - Operating hours 08:00 to 17:00
//! - Drag threshold of 5 px in either axis

use serde::{Deserialize, Serialize};
use sitegrid_protocol::{TimeOfDay, time::MAX_PARSED_HOUR};

use crate::error::{ConfigError, Result};

/// Default pixel length of one grid unit.
pub const DEFAULT_UNIT_PX: i32 = 40;

/// Default minutes represented by one grid unit.
pub const DEFAULT_UNIT_MINUTES: u32 = 15;

/// Default start of the operating day (the grid's time origin).
pub const DEFAULT_DAY_START: TimeOfDay = TimeOfDay::new(8, 0);

/// Default end of the operating day.
pub const DEFAULT_DAY_END: TimeOfDay = TimeOfDay::new(17, 0);

/// Default pointer displacement before a gesture becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: i32 = 5;

/// Configuration for the schedule grid.
///
/// # Examples
///
/// ```
/// use sitegrid_config::GridConfig;
/// use sitegrid_protocol::TimeOfDay;
///
/// let config = GridConfig::default();
/// assert_eq!(config.unit_px, 40);
/// assert_eq!(config.day_start, TimeOfDay::new(8, 0));
/// assert!(config.validate().is_ok());
///
/// // Operating day of 9 hours in 15 minute units
/// assert_eq!(config.units_per_day(), 36);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Pixel length of one grid unit.
    #[serde(default = "default_unit_px")]
    pub unit_px: i32,

    /// Minutes represented by one grid unit.
    #[serde(default = "default_unit_minutes")]
    pub unit_minutes: u32,

    /// Time at pixel offset zero.
    #[serde(default = "default_day_start")]
    pub day_start: TimeOfDay,

    /// Latest time a task may reach; bounds vertical dragging.
    #[serde(default = "default_day_end")]
    pub day_end: TimeOfDay,

    /// Pointer displacement (either axis) that turns a press into a drag.
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: i32,
}

fn default_unit_px() -> i32 {
    DEFAULT_UNIT_PX
}

fn default_unit_minutes() -> u32 {
    DEFAULT_UNIT_MINUTES
}

fn default_day_start() -> TimeOfDay {
    DEFAULT_DAY_START
}

fn default_day_end() -> TimeOfDay {
    DEFAULT_DAY_END
}

fn default_drag_threshold_px() -> i32 {
    DEFAULT_DRAG_THRESHOLD_PX
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            unit_px: DEFAULT_UNIT_PX,
            unit_minutes: DEFAULT_UNIT_MINUTES,
            day_start: DEFAULT_DAY_START,
            day_end: DEFAULT_DAY_END,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
        }
    }
}

impl GridConfig {
    /// Creates a grid configuration with custom operating hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_config::GridConfig;
    /// use sitegrid_protocol::TimeOfDay;
    ///
    /// let config = GridConfig::with_hours(TimeOfDay::new(7, 0), TimeOfDay::new(19, 0));
    /// assert_eq!(config.units_per_day(), 48);
    /// ```
    #[must_use]
    pub fn with_hours(day_start: TimeOfDay, day_end: TimeOfDay) -> Self {
        Self {
            day_start,
            day_end,
            ..Self::default()
        }
    }

    /// Returns the number of grid units between `day_start` and `day_end`.
    ///
    /// Returns zero if the configuration is invalid.
    #[must_use]
    pub fn units_per_day(&self) -> u32 {
        if self.unit_minutes == 0 || self.day_end <= self.day_start {
            return 0;
        }
        (self.day_end.total_minutes() - self.day_start.total_minutes()) / self.unit_minutes
    }

    /// Validates the grid configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `unit_px` or `unit_minutes` is not positive
    /// - `drag_threshold_px` is negative
    /// - `day_end` is not after `day_start`, or lies beyond the next day
    /// - the operating hours are not a whole number of grid units
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(ConfigError::InvalidGrid { reason }) };

        if self.unit_px <= 0 {
            return invalid(format!("unit_px must be positive, got {}", self.unit_px));
        }
        if self.unit_minutes == 0 {
            return invalid("unit_minutes must be positive".to_string());
        }
        if self.drag_threshold_px < 0 {
            return invalid(format!(
                "drag_threshold_px cannot be negative, got {}",
                self.drag_threshold_px
            ));
        }
        if self.day_end.hour > MAX_PARSED_HOUR {
            return invalid(format!(
                "day_end {} is past {MAX_PARSED_HOUR}:59",
                self.day_end
            ));
        }
        if self.day_end <= self.day_start {
            return invalid(format!(
                "day_end {} must be after day_start {}",
                self.day_end, self.day_start
            ));
        }

        let span = self.day_end.total_minutes() - self.day_start.total_minutes();
        if span % self.unit_minutes != 0 {
            return invalid(format!(
                "operating hours {}-{} are not a multiple of {} minutes",
                self.day_start, self.day_end, self.unit_minutes
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GridConfig::default();
        assert_eq!(config.unit_px, DEFAULT_UNIT_PX);
        assert_eq!(config.unit_minutes, DEFAULT_UNIT_MINUTES);
        assert_eq!(config.drag_threshold_px, DEFAULT_DRAG_THRESHOLD_PX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_unit() {
        let config = GridConfig {
            unit_px: 0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GridConfig {
            unit_minutes: 0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let config = GridConfig {
            drag_threshold_px: -1,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_hours() {
        let config = GridConfig::with_hours(TimeOfDay::new(17, 0), TimeOfDay::new(8, 0));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be after"));
        assert_eq!(config.units_per_day(), 0);
    }

    #[test]
    fn validate_rejects_partial_unit() {
        let config = GridConfig::with_hours(TimeOfDay::new(8, 0), TimeOfDay::new(17, 10));
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: GridConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn deserialize_partial() {
        let json = r#"{"day_start": "07:30", "unit_minutes": 30}"#;
        let config: GridConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.day_start, TimeOfDay::new(7, 30));
        assert_eq!(config.unit_minutes, 30);
        assert_eq!(config.unit_px, DEFAULT_UNIT_PX);
    }

    #[test]
    fn huge_hours_are_errors_not_panics() {
        let json5 = r#"{ day_end: "99999999:00" }"#;
        assert!(serde_json5::from_str::<GridConfig>(json5).is_err());

        let config = GridConfig::with_hours(
            TimeOfDay::new(8, 0),
            TimeOfDay {
                hour: u32::MAX,
                minute: 0,
            },
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("is past 47:59"));
    }

    #[test]
    fn deserialize_rejects_bad_time() {
        let json = r#"{"day_end": "5pm"}"#;
        assert!(serde_json::from_str::<GridConfig>(json).is_err());
    }
}
