//! Interfaces to the collaborators around the engine.
//!
//! The engine holds no rendering, storage or prompting logic. It drives
//! these traits instead, which the front end and the store implement.

use sitegrid_protocol::{Task, TaskId, ZoneId};

use crate::lanes::LaneBounds;

/// Supplies the lane column extents of the active zone.
pub trait LaneLayout {
    /// Returns the bounds of every lane, indexed by lane.
    ///
    /// An empty slice means the layout is unavailable.
    fn lane_bounds(&self) -> &[LaneBounds];
}

impl LaneLayout for [LaneBounds] {
    fn lane_bounds(&self) -> &[LaneBounds] {
        self
    }
}

impl LaneLayout for Vec<LaneBounds> {
    fn lane_bounds(&self) -> &[LaneBounds] {
        self
    }
}

/// Visual commands issued while a gesture is in flight and on commit.
pub trait Renderer {
    /// Places a task bar at a vertical position and size.
    fn set_position(&mut self, task: TaskId, top: i32, height: i32);

    /// Moves a task bar into another lane's column.
    fn move_to_lane(&mut self, task: TaskId, lane_index: usize);

    /// Highlights one lane, or clears the highlight.
    fn highlight_lane(&mut self, lane_index: Option<usize>);
}

/// Receives the task set of a zone after every committed change.
///
/// Implementations must not block and must absorb their own failures.
pub trait Persistence {
    /// Saves a zone's tasks.
    fn save(&mut self, zone: &ZoneId, tasks: &[Task]);
}

/// Asks the user for a new task label.
pub trait EditPrompt {
    /// Prompts for a replacement of `current`.
    ///
    /// Returns the answer if it is available immediately. Front ends with
    /// a non-blocking prompt return `None` and deliver the answer later
    /// through [`crate::mutator::apply_label`].
    fn prompt_edit(&mut self, task: TaskId, current: &str) -> Option<String>;
}
