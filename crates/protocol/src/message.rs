//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved while the button is held.
    Move,
    /// Button released.
    Up,
}

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::{Message, PointerPhase};
///
/// let msg = Message::Pointer { phase: PointerPhase::Down, column: 12, row: 4 };
/// assert!(msg.is_pointer());
/// assert!(!Message::NextZone.is_pointer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Escape: close the prompt or help overlay.
    Escape,
    /// Show the next zone.
    NextZone,
    /// Move lane selection to the left.
    SelectLaneLeft,
    /// Move lane selection to the right.
    SelectLaneRight,
    /// Scroll the time axis up by one row.
    ScrollUp,
    /// Scroll the time axis down by one row.
    ScrollDown,
    /// Add a default task to the selected lane.
    AddTask,
    /// Prompt for a new lane name.
    AddLane,
    /// Cycle the trade color of the selected task.
    CycleColor,
    /// Delete the selected task.
    DeleteTask,
    /// Pointer event at terminal coordinates.
    Pointer {
        /// Press, drag or release.
        phase: PointerPhase,
        /// Column (x coordinate) of the event.
        column: u16,
        /// Row (y coordinate) of the event.
        row: u16,
    },

    // --- Prompt messages ---
    /// Input a character while the prompt is open.
    PromptInput {
        /// The character that was input.
        ch: char,
    },
    /// Delete the last character of the prompt.
    PromptBackspace,
    /// Confirm the prompt.
    PromptConfirm,
    /// Cancel the prompt.
    PromptCancel,
}

impl Message {
    /// Returns `true` if this message is a pointer event.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer { .. })
    }

    /// Returns `true` if this message changes the zone layout or task set
    /// (as opposed to geometry of an existing bar).
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::Message;
    ///
    /// assert!(Message::AddLane.is_structural());
    /// assert!(Message::DeleteTask.is_structural());
    /// assert!(!Message::ScrollDown.is_structural());
    /// ```
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::NextZone | Self::AddTask | Self::AddLane | Self::DeleteTask | Self::CycleColor
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }
}
