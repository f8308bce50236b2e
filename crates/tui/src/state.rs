//! Application state management.
//!
//! This module defines the state the front end keeps beside the board: the
//! selection, scrolling, the modal prompt, and the [`Overlay`] that the
//! gesture controller draws into while a bar is in flight.

use std::collections::HashMap;

use sitegrid_engine::{EditPrompt, Renderer};
use sitegrid_protocol::{ScheduleBoard, Task, TaskId, TimeOfDay, Zone};

/// In-flight visuals pushed by the gesture controller.
///
/// Positions here override the model until the gesture is committed or
/// cancelled, at which point [`Overlay::settle`] drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    positions: HashMap<TaskId, (i32, i32)>,
    highlighted: Option<usize>,
    moved: Option<TaskId>,
}

impl Overlay {
    /// Returns the in-flight `(top, height)` of a task, if it is being dragged.
    #[must_use]
    pub fn position(&self, task: TaskId) -> Option<(i32, i32)> {
        self.positions.get(&task).copied()
    }

    /// Returns the lane highlighted as the drop target.
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Returns the task that was last moved to another lane.
    #[must_use]
    pub const fn moved(&self) -> Option<TaskId> {
        self.moved
    }

    /// Drops in-flight positions once the model holds the final geometry.
    pub fn settle(&mut self) {
        self.positions.clear();
    }

    /// Forgets everything, including the moved marker.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clears the transient moved marker.
    pub fn clear_moved(&mut self) {
        self.moved = None;
    }
}

impl Renderer for Overlay {
    fn set_position(&mut self, task: TaskId, top: i32, height: i32) {
        self.positions.insert(task, (top, height));
    }

    fn move_to_lane(&mut self, task: TaskId, _lane_index: usize) {
        self.moved = Some(task);
    }

    fn highlight_lane(&mut self, lane_index: Option<usize>) {
        self.highlighted = lane_index;
    }
}

/// What a prompt's answer will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Relabel a task.
    EditLabel(TaskId),
    /// Name a new lane in the current zone.
    NewLane,
    /// Describe a new task for a lane as `<label> HH:MM-HH:MM`.
    NewTask {
        /// Lane the task goes into.
        lane: usize,
    },
}

/// A single-line text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// What the answer is for.
    pub kind: PromptKind,
    /// The text typed so far.
    pub input: String,
}

impl Prompt {
    /// Opens a label editor pre-filled with the current label.
    #[must_use]
    pub fn edit_label(task: TaskId, current: &str) -> Self {
        Self {
            kind: PromptKind::EditLabel(task),
            input: current.to_string(),
        }
    }

    /// Opens an empty lane name prompt.
    #[must_use]
    pub fn new_lane() -> Self {
        Self {
            kind: PromptKind::NewLane,
            input: String::new(),
        }
    }

    /// Opens a new task prompt pre-filled with `entry`.
    #[must_use]
    pub fn new_task(lane: usize, entry: impl Into<String>) -> Self {
        Self {
            kind: PromptKind::NewTask { lane },
            input: entry.into(),
        }
    }

    /// Returns the title shown on the prompt's border.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::EditLabel(_) => " Edit task ",
            PromptKind::NewLane => " New lane ",
            PromptKind::NewTask { .. } => " New task ",
        }
    }

    /// Returns the hint shown under the input.
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self.kind {
            PromptKind::NewTask { .. } => "Label HH:MM-HH:MM, Enter to add",
            PromptKind::EditLabel(_) | PromptKind::NewLane => "Enter to confirm, Esc to cancel",
        }
    }

    /// Appends a character, ignoring control characters.
    pub fn push(&mut self, ch: char) {
        if !ch.is_control() {
            self.input.push(ch);
        }
    }

    /// Removes the last character.
    pub fn backspace(&mut self) {
        self.input.pop();
    }
}

/// Why a new task entry could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskEntryError {
    /// Nothing before the time range.
    #[error("task needs a label before the time range")]
    MissingLabel,

    /// The last word is not a `HH:MM-HH:MM` range.
    #[error("expected a time range like 09:00-10:30, got {0:?}")]
    BadRange(String),

    /// The range ends before it starts.
    #[error("task must end after it starts ({start}-{end})")]
    EmptyRange {
        /// Requested start.
        start: TimeOfDay,
        /// Requested end.
        end: TimeOfDay,
    },
}

/// A parsed `<label> HH:MM-HH:MM` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Task label.
    pub label: String,
    /// Start time.
    pub start: TimeOfDay,
    /// End time.
    pub end: TimeOfDay,
}

impl TaskEntry {
    /// Parses a label followed by a time range, e.g. `Slab pour 09:10-10:00`.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskEntryError`] if the label is missing, the range does
    /// not parse, or the range is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::TimeOfDay;
    /// use sitegrid_tui::state::TaskEntry;
    ///
    /// let entry = TaskEntry::parse("Slab pour 9:10-10:00").unwrap();
    /// assert_eq!(entry.label, "Slab pour");
    /// assert_eq!(entry.start, TimeOfDay::new(9, 10));
    /// assert!(TaskEntry::parse("Slab pour").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, TaskEntryError> {
        let input = input.trim();
        let (label, range) = input
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| TaskEntryError::BadRange(input.to_string()))?;
        let label = label.trim();

        let bad_range = || TaskEntryError::BadRange(range.to_string());
        let (start, end) = range.split_once('-').ok_or_else(bad_range)?;
        let start = TimeOfDay::parse(start).map_err(|_| bad_range())?;
        let end = TimeOfDay::parse(end).map_err(|_| bad_range())?;

        if label.is_empty() {
            return Err(TaskEntryError::MissingLabel);
        }
        if end <= start {
            return Err(TaskEntryError::EmptyRange { start, end });
        }
        Ok(Self {
            label: label.to_string(),
            start,
            end,
        })
    }
}

/// Holds the open prompt, if any.
///
/// As an [`EditPrompt`] it never answers immediately: a click opens the
/// label editor and the answer arrives later with the confirm key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSlot {
    active: Option<Prompt>,
}

impl PromptSlot {
    /// Returns `true` while a prompt is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the open prompt.
    #[must_use]
    pub const fn current(&self) -> Option<&Prompt> {
        self.active.as_ref()
    }

    /// Returns the open prompt for typing into.
    pub fn current_mut(&mut self) -> Option<&mut Prompt> {
        self.active.as_mut()
    }

    /// Opens a prompt, replacing any open one.
    pub fn open(&mut self, prompt: Prompt) {
        self.active = Some(prompt);
    }

    /// Closes the prompt and returns it.
    pub fn take(&mut self) -> Option<Prompt> {
        self.active.take()
    }
}

impl EditPrompt for PromptSlot {
    fn prompt_edit(&mut self, task: TaskId, current: &str) -> Option<String> {
        self.open(Prompt::edit_label(task, current));
        None
    }
}

/// The application state.
///
/// Contains the board and everything the UI tracks about it. The selected
/// task is always a task of the current zone, or nothing.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The zones being scheduled.
    pub board: ScheduleBoard,
    /// Index of the lane new tasks go into.
    pub selected_lane: usize,
    /// The task most recently pressed, created or edited.
    pub selected_task: Option<TaskId>,
    /// First grid row shown at the top of the body.
    pub scroll: u16,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// The modal text prompt.
    pub prompt: PromptSlot,
    /// In-flight gesture visuals.
    pub overlay: Overlay,
    /// The most recent notification.
    pub status: Option<String>,
}

impl AppState {
    /// Creates a new application state with the given board.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::ScheduleBoard;
    /// use sitegrid_tui::AppState;
    ///
    /// let state = AppState::new(ScheduleBoard::default());
    /// assert_eq!(state.selected_lane, 0);
    /// assert!(state.selected_task.is_none());
    /// ```
    #[must_use]
    pub fn new(board: ScheduleBoard) -> Self {
        Self {
            board,
            selected_lane: 0,
            selected_task: None,
            scroll: 0,
            help_visible: false,
            prompt: PromptSlot::default(),
            overlay: Overlay::default(),
            status: None,
        }
    }

    /// Returns the zone on screen.
    #[must_use]
    pub fn zone(&self) -> &Zone {
        self.board.current_zone()
    }

    /// Returns the zone on screen for mutation.
    pub fn zone_mut(&mut self) -> &mut Zone {
        self.board.current_zone_mut()
    }

    /// Returns the selected task, if it still exists.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task.and_then(|id| self.zone().get_task(id))
    }

    /// Selects a task and the lane it sits in.
    pub fn select_task(&mut self, id: TaskId) {
        if let Some(lane) = self.zone().get_task(id).map(|t| t.lane_index) {
            self.selected_task = Some(id);
            self.selected_lane = lane;
        }
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Moves the lane selection to the left, wrapping around.
    pub fn select_lane_left(&mut self) {
        let count = self.zone().lane_count();
        if count > 0 {
            self.selected_lane = (self.selected_lane + count - 1) % count;
        }
    }

    /// Moves the lane selection to the right, wrapping around.
    pub fn select_lane_right(&mut self) {
        let count = self.zone().lane_count();
        if count > 0 {
            self.selected_lane = (self.selected_lane + 1) % count;
        }
    }

    /// Scrolls by `delta` rows, staying within `0..=max`.
    pub fn scroll_by(&mut self, delta: i32, max: u16) {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(max));
        self.scroll = u16::try_from(target).unwrap_or(max);
    }

    /// Makes the next zone current and clears everything tied to the old one.
    pub fn next_zone(&mut self) {
        let id = self.board.next_zone().clone();
        self.selected_task = None;
        self.selected_lane = 0;
        self.overlay.reset();
        self.notify(format!("Zone {id}"));
    }

    /// Replaces the status line.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
