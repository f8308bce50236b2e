//! Wall-clock time of day used by the schedule grid.
//!
//! [`TimeOfDay`] is a plain hour/minute pair. It serializes as an `"HH:MM"`
//! string so it can be written directly in configuration files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProtocolError, Result};

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Largest hour accepted by [`TimeOfDay::parse`]: the end of the next day.
pub const MAX_PARSED_HOUR: u32 = 47;

/// An hour and minute of the working day.
///
/// Hours are not wrapped at 24: a schedule that runs past midnight simply
/// reports `24:30`, `25:00` and so on.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::TimeOfDay;
///
/// let start = TimeOfDay::new(8, 0);
/// assert_eq!(start.to_string(), "08:00");
/// assert_eq!(start.total_minutes(), 480);
///
/// let parsed: TimeOfDay = "10:15".parse().unwrap();
/// assert_eq!(parsed, TimeOfDay::new(10, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    /// Hour component.
    pub hour: u32,
    /// Minute component, always below 60.
    pub minute: u32,
}

impl TimeOfDay {
    /// Creates a time of day, carrying excess minutes into the hour.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::new(9, 75), TimeOfDay::new(10, 15));
    /// ```
    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour.saturating_add(minute / MINUTES_PER_HOUR),
            minute: minute % MINUTES_PER_HOUR,
        }
    }

    /// Builds a time from a count of minutes since midnight.
    ///
    /// Negative totals saturate at `00:00`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_minutes(615), TimeOfDay::new(10, 15));
    /// assert_eq!(TimeOfDay::from_minutes(-30), TimeOfDay::new(0, 0));
    /// ```
    #[must_use]
    pub fn from_minutes(total: i64) -> Self {
        let total = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
        Self::new(0, total)
    }

    /// Returns the number of minutes since midnight, saturating at `u32::MAX`.
    #[must_use]
    pub const fn total_minutes(self) -> u32 {
        self.hour
            .saturating_mul(MINUTES_PER_HOUR)
            .saturating_add(self.minute)
    }

    /// Parses the `"HH:MM"` format (`"H:MM"` is accepted too).
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidTime`] if the string is not two
    /// colon-separated numbers, the minute is 60 or more, or the hour is
    /// past [`MAX_PARSED_HOUR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse("8:30").is_ok());
    /// assert!(TimeOfDay::parse("8h30").is_err());
    /// assert!(TimeOfDay::parse("08:75").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || ProtocolError::InvalidTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if minute >= MINUTES_PER_HOUR || hour > MAX_PARSED_HOUR {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_pads_both_components() {
        assert_eq!(TimeOfDay::new(8, 5).to_string(), "08:05");
        assert_eq!(TimeOfDay::new(17, 0).to_string(), "17:00");
    }

    #[test]
    fn new_carries_minutes() {
        let time = TimeOfDay::new(8, 135);
        assert_eq!(time, TimeOfDay::new(10, 15));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TimeOfDay::parse("").is_err());
        assert!(TimeOfDay::parse("ten:00").is_err());
        assert!(TimeOfDay::parse("10:").is_err());
        assert!(TimeOfDay::parse("10:60").is_err());
    }

    #[test]
    fn parse_bounds_the_hour() {
        assert_eq!(TimeOfDay::parse("47:59").ok(), Some(TimeOfDay::new(47, 59)));
        assert!(TimeOfDay::parse("48:00").is_err());
        assert!(TimeOfDay::parse("99999999:00").is_err());
    }

    #[test]
    fn total_minutes_saturates() {
        let far = TimeOfDay {
            hour: u32::MAX,
            minute: 30,
        };
        assert_eq!(far.total_minutes(), u32::MAX);
        assert_eq!(TimeOfDay::new(u32::MAX, 120).hour, u32::MAX);
    }

    #[test]
    fn ordering_follows_clock() {
        assert!(TimeOfDay::new(8, 0) < TimeOfDay::new(8, 15));
        assert!(TimeOfDay::new(9, 0) > TimeOfDay::new(8, 45));
    }

    #[test]
    fn json_uses_string_form() {
        let json = serde_json::to_string(&TimeOfDay::new(8, 0)).expect("serialize");
        assert_eq!(json, r#""08:00""#);

        let parsed: TimeOfDay = serde_json::from_str(r#""17:30""#).expect("deserialize");
        assert_eq!(parsed, TimeOfDay::new(17, 30));

        let err = serde_json::from_str::<TimeOfDay>(r#""5pm""#);
        assert!(err.is_err());
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(hour in 0u32..24, minute in 0u32..60) {
            let time = TimeOfDay::new(hour, minute);
            prop_assert_eq!(TimeOfDay::parse(&time.to_string()).ok(), Some(time));
        }

        #[test]
        fn ordering_matches_minutes(a in 0u32..1440, b in 0u32..1440) {
            let (x, y) = (TimeOfDay::new(0, a), TimeOfDay::new(0, b));
            prop_assert_eq!(x.cmp(&y), a.cmp(&b));
            prop_assert_eq!(x.total_minutes(), a);
        }
    }
}
