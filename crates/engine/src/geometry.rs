//! Conversions between pixel space and time space on the schedule grid.
//!
//! The free functions are pure and take every parameter explicitly. The
//! [`GridGeometry`] value bundles the parameters of one configured grid so
//! callers do not have to thread four numbers through every call.
//!
//! # Numeric Semantics
//!
//! Pixel values are `i32`. Intermediate arithmetic is done in `i64` and
//! saturated back, so no input can overflow. Snapping rounds to the nearest
//! multiple with ties upward (toward positive infinity), which makes it
//! idempotent.

use sitegrid_config::GridConfig;
use sitegrid_protocol::{Task, TimeOfDay};

/// Rounds `value` to the nearest multiple of `unit`, ties upward.
///
/// A non-positive `unit` leaves the value unchanged. No bounds are applied;
/// callers clamp to the domain afterwards.
///
/// # Examples
///
/// ```
/// use sitegrid_engine::geometry::snap_to_grid;
///
/// assert_eq!(snap_to_grid(361, 40), 360);
/// assert_eq!(snap_to_grid(20, 40), 40);
/// assert_eq!(snap_to_grid(19, 40), 0);
/// assert_eq!(snap_to_grid(-1, 40), 0);
/// assert_eq!(snap_to_grid(-20, 40), 0);
/// assert_eq!(snap_to_grid(-21, 40), -40);
/// ```
#[must_use]
pub fn snap_to_grid(value: i32, unit: i32) -> i32 {
    if unit <= 0 {
        return value;
    }
    let (v, u) = (i64::from(value), i64::from(unit));
    saturate((v + u / 2).div_euclid(u) * u)
}

/// Converts a pixel offset from the grid origin to a wall-clock time.
///
/// Offsets between grid lines map proportionally and round down to the
/// minute. A non-positive `unit` maps everything to `origin`.
///
/// # Examples
///
/// ```
/// use sitegrid_engine::geometry::pixel_offset_to_time;
/// use sitegrid_protocol::TimeOfDay;
///
/// let origin = TimeOfDay::new(8, 0);
/// assert_eq!(pixel_offset_to_time(0, origin, 40, 15), origin);
/// assert_eq!(pixel_offset_to_time(320, origin, 40, 15), TimeOfDay::new(10, 0));
/// ```
#[must_use]
pub fn pixel_offset_to_time(top: i32, origin: TimeOfDay, unit: i32, unit_minutes: u32) -> TimeOfDay {
    if unit <= 0 {
        return origin;
    }
    let offset = (i64::from(top) * i64::from(unit_minutes)).div_euclid(i64::from(unit));
    TimeOfDay::from_minutes(i64::from(origin.total_minutes()) + offset)
}

/// Converts a wall-clock time to a pixel offset from the grid origin.
///
/// Times before the origin give negative offsets. A zero `unit_minutes`
/// maps everything to `0`.
///
/// # Examples
///
/// ```
/// use sitegrid_engine::geometry::time_to_pixel_offset;
/// use sitegrid_protocol::TimeOfDay;
///
/// let origin = TimeOfDay::new(8, 0);
/// assert_eq!(time_to_pixel_offset(TimeOfDay::new(10, 15), origin, 40, 15), 360);
/// assert_eq!(time_to_pixel_offset(TimeOfDay::new(7, 45), origin, 40, 15), -40);
/// ```
#[must_use]
pub fn time_to_pixel_offset(time: TimeOfDay, origin: TimeOfDay, unit: i32, unit_minutes: u32) -> i32 {
    if unit_minutes == 0 {
        return 0;
    }
    let minutes = i64::from(time.total_minutes()) - i64::from(origin.total_minutes());
    saturate((minutes * i64::from(unit)).div_euclid(i64::from(unit_minutes)))
}

/// Clamps `top` into `[min, max]`. An inverted range collapses to `min`.
#[must_use]
pub fn clamp_top(top: i32, min: i32, max: i32) -> i32 {
    top.clamp(min, max.max(min))
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// The parameters of one configured grid.
///
/// # Examples
///
/// ```
/// use sitegrid_config::GridConfig;
/// use sitegrid_engine::GridGeometry;
///
/// let grid = GridGeometry::from(&GridConfig::default());
/// assert_eq!(grid.span_px(), 1440);
/// assert_eq!(grid.max_top(160), 1280);
/// assert_eq!(grid.format_span(320, 160), "10:00 ~ 11:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Pixel length of one grid unit.
    pub unit: i32,
    /// Minutes per grid unit.
    pub unit_minutes: u32,
    /// Time at offset zero.
    pub origin: TimeOfDay,
    /// Latest time a bar may reach when moved.
    pub day_end: TimeOfDay,
    /// Displacement in either axis that turns a press into a drag.
    pub threshold: i32,
}

impl From<&GridConfig> for GridGeometry {
    fn from(config: &GridConfig) -> Self {
        Self {
            unit: config.unit_px,
            unit_minutes: config.unit_minutes,
            origin: config.day_start,
            day_end: config.day_end,
            threshold: config.drag_threshold_px,
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::from(&GridConfig::default())
    }
}

impl GridGeometry {
    /// Snaps a pixel value to this grid.
    #[must_use]
    pub fn snap(&self, value: i32) -> i32 {
        snap_to_grid(value, self.unit)
    }

    /// Converts a pixel offset to a time on this grid.
    #[must_use]
    pub fn time_at(&self, top: i32) -> TimeOfDay {
        pixel_offset_to_time(top, self.origin, self.unit, self.unit_minutes)
    }

    /// Converts a time to a pixel offset on this grid.
    #[must_use]
    pub fn offset_of(&self, time: TimeOfDay) -> i32 {
        time_to_pixel_offset(time, self.origin, self.unit, self.unit_minutes)
    }

    /// Pixel length of the operating day.
    #[must_use]
    pub fn span_px(&self) -> i32 {
        self.offset_of(self.day_end).max(0)
    }

    /// Largest top that keeps a bar of `height` inside the operating day.
    #[must_use]
    pub fn max_top(&self, height: i32) -> i32 {
        self.span_px().saturating_sub(height).max(0)
    }

    /// Clamps a candidate top for a moved bar of `height`.
    #[must_use]
    pub fn clamp_moved_top(&self, top: i32, height: i32) -> i32 {
        clamp_top(top, 0, self.max_top(height))
    }

    /// Returns `true` if a displacement is past the drag threshold.
    #[must_use]
    pub fn exceeds_threshold(&self, dx: i32, dy: i32) -> bool {
        dx.saturating_abs() > self.threshold || dy.saturating_abs() > self.threshold
    }

    /// Formats the time range covered by a bar as `"HH:MM ~ HH:MM"`.
    #[must_use]
    pub fn format_span(&self, top: i32, height: i32) -> String {
        let start = self.time_at(top);
        let end = self.time_at(top.saturating_add(height));
        format!("{start} ~ {end}")
    }

    /// Builds a task covering `start..end`, both floored to whole grid
    /// units. The task is always at least one unit long.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_engine::GridGeometry;
    /// use sitegrid_protocol::TimeOfDay;
    ///
    /// let grid = GridGeometry::default();
    /// let task = grid.task_between(0, "Pour", TimeOfDay::new(9, 10), TimeOfDay::new(10, 0));
    /// assert_eq!((task.top, task.height), (160, 160));
    ///
    /// let task = grid.task_between(0, "Check", TimeOfDay::new(9, 0), TimeOfDay::new(9, 0));
    /// assert_eq!(task.height, 40);
    /// ```
    #[must_use]
    pub fn task_between(
        &self,
        lane_index: usize,
        text: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Task {
        let top = self.floor_offset(start).max(0);
        let bottom = self.floor_offset(end);
        let height = bottom.saturating_sub(top).max(self.unit);
        Task::new(lane_index, top, height, text)
    }

    fn floor_offset(&self, time: TimeOfDay) -> i32 {
        if self.unit_minutes == 0 {
            return 0;
        }
        let minutes = i64::from(time.total_minutes()) - i64::from(self.origin.total_minutes());
        saturate(minutes.div_euclid(i64::from(self.unit_minutes)) * i64::from(self.unit))
    }
}
