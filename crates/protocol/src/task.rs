//! Task-related types for the schedule grid.
//!
//! This module defines the task bar model: its identifier, the trade color
//! tag used for rendering, and the [`Task`] struct itself. Geometry is kept
//! in grid pixels; converting to wall-clock time is the engine's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Uses UUID v4 for globally unique identification.
pub type TaskId = uuid::Uuid;

/// Top offset of a freshly added task (10:00 on the reference 40px/15min grid).
pub const DEFAULT_TASK_TOP: i32 = 320;

/// Height of a freshly added task (one hour on the reference grid).
pub const DEFAULT_TASK_HEIGHT: i32 = 160;

/// Label given to a freshly added task.
pub const DEFAULT_TASK_TEXT: &str = "New task";

/// Categorical trade tag used only for rendering.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::TradeColor;
///
/// assert_eq!(TradeColor::Carpenter.display_name(), "Carpenter");
/// assert_eq!(TradeColor::Electrical.next(), TradeColor::Carpenter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TradeColor {
    /// Formwork and carpentry crews.
    #[default]
    Carpenter,
    /// Reinforcement crews.
    Rebar,
    /// Concrete pouring.
    Concrete,
    /// Electrical works.
    Electrical,
}

impl TradeColor {
    /// Returns all trade colors in palette order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Carpenter,
            Self::Rebar,
            Self::Concrete,
            Self::Electrical,
        ]
    }

    /// Returns a human-readable name for the trade.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Carpenter => "Carpenter",
            Self::Rebar => "Rebar",
            Self::Concrete => "Concrete",
            Self::Electrical => "Electrical",
        }
    }

    /// Returns the next color in palette order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Carpenter => Self::Rebar,
            Self::Rebar => Self::Concrete,
            Self::Concrete => Self::Electrical,
            Self::Electrical => Self::Carpenter,
        }
    }
}

/// A unit of scheduled work shown as a bar on the grid.
///
/// `top` and `height` are pixel offsets from the grid's time origin and are
/// kept on grid-unit multiples by the engine; `height` is never below one
/// grid unit.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::Task;
///
/// let task = Task::new(1, 320, 160, "Pour slab");
/// assert_eq!(task.lane_index, 1);
/// assert_eq!(task.bottom(), 480);
/// assert!(task.color.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// Index into the owning zone's lanes.
    pub lane_index: usize,
    /// Pixel offset from the grid's time origin.
    pub top: i32,
    /// Pixel length representing the duration.
    pub height: i32,
    /// Display label.
    pub text: String,
    /// Optional trade tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TradeColor>,
    /// When this task was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the given lane.
    #[must_use]
    pub fn new(lane_index: usize, top: i32, height: i32, text: impl Into<String>) -> Self {
        Self::with_id(TaskId::new_v4(), lane_index, top, height, text)
    }

    /// Creates a new task with a specific ID.
    ///
    /// Useful for testing or when recreating tasks from persistent storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::{Task, TaskId};
    ///
    /// let id = TaskId::new_v4();
    /// let task = Task::with_id(id, 0, 0, 40, "Inspection");
    /// assert_eq!(task.id, id);
    /// ```
    #[must_use]
    pub fn with_id(
        id: TaskId,
        lane_index: usize,
        top: i32,
        height: i32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            lane_index,
            top,
            height,
            text: text.into(),
            color: None,
            updated_at: Utc::now(),
        }
    }

    /// Creates the default task added by the "new task" action.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::{Task, TradeColor};
    ///
    /// let task = Task::placeholder(2);
    /// assert_eq!(task.top, 320);
    /// assert_eq!(task.height, 160);
    /// assert_eq!(task.color, Some(TradeColor::Carpenter));
    /// ```
    #[must_use]
    pub fn placeholder(lane_index: usize) -> Self {
        Self::new(
            lane_index,
            DEFAULT_TASK_TOP,
            DEFAULT_TASK_HEIGHT,
            DEFAULT_TASK_TEXT,
        )
        .with_color(TradeColor::Carpenter)
    }

    /// Sets the trade color (builder style).
    #[must_use]
    pub fn with_color(mut self, color: TradeColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the pixel offset of the bar's lower edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Sets the vertical geometry and refreshes the `updated_at` timestamp.
    pub fn set_geometry(&mut self, top: i32, height: i32) {
        self.top = top;
        self.height = height;
        self.touch();
    }

    /// Moves the task to another lane and refreshes the `updated_at` timestamp.
    pub fn move_to_lane(&mut self, lane_index: usize) {
        self.lane_index = lane_index;
        self.touch();
    }

    /// Replaces the label and refreshes the `updated_at` timestamp.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_color_cycle_visits_every_color() {
        let mut color = TradeColor::Carpenter;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(color);
            color = color.next();
        }
        assert_eq!(seen, TradeColor::all());
        assert_eq!(color, TradeColor::Carpenter);
    }

    #[test]
    fn trade_color_json_format() {
        let json = serde_json::to_string(&TradeColor::Electrical).expect("serialize");
        assert_eq!(json, r#""electrical""#);
    }

    #[test]
    fn setters_update_fields() {
        let mut task = Task::new(0, 0, 40, "Survey");
        let before = task.updated_at;

        task.set_geometry(80, 120);
        task.move_to_lane(2);
        task.set_text("Site survey");

        assert_eq!((task.top, task.height), (80, 120));
        assert_eq!(task.lane_index, 2);
        assert_eq!(task.text, "Site survey");
        assert!(task.updated_at >= before);
    }

    #[test]
    fn color_is_omitted_when_absent() {
        let task = Task::new(0, 0, 40, "Plain");
        let json = serde_json::to_string(&task).expect("serialize");
        assert!(!json.contains("color"));

        let parsed: Task = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, task);
    }
}
