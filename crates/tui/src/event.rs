//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages. Mouse input becomes [`Message::Pointer`]
//! events carrying the raw terminal cell; the app turns cells into grid
//! pixels.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use sitegrid_protocol::{Message, PointerPhase};

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event to an application message.
///
/// With `prompt_open`, keys go to the text prompt instead of the board.
#[must_use]
pub fn event_to_message(event: &Event, prompt_open: bool) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) if prompt_open => key_to_prompt_message(*key),
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to a pointer message.
///
/// Only the left button is tracked: press, drag and release.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
        _ => return None,
    };
    Some(Message::Pointer {
        phase,
        column: mouse.column,
        row: mouse.row,
    })
}

/// Converts a terminal key event to an application message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Cancel drag or clear selection |
/// | `Tab` | Next zone |
/// | `Left` / `Right` | Select lane |
/// | `Up` / `Down` | Scroll |
/// | `n` | New task in the selected lane, as `label HH:MM-HH:MM` |
/// | `L` | New lane |
/// | `c` | Cycle color of the selected task |
/// | `d` | Delete the selected task |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Tab => Some(Message::NextZone),

        KeyCode::Left => Some(Message::SelectLaneLeft),
        KeyCode::Right => Some(Message::SelectLaneRight),
        KeyCode::Up => Some(Message::ScrollUp),
        KeyCode::Down => Some(Message::ScrollDown),

        KeyCode::Char('n') => Some(Message::AddTask),
        KeyCode::Char('L') => Some(Message::AddLane),
        KeyCode::Char('c') => Some(Message::CycleColor),
        KeyCode::Char('d') => Some(Message::DeleteTask),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event while the text prompt is open.
///
/// # Key Bindings (Prompt Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | Any char | Input |
/// | `Backspace` | Delete last character |
/// | `Enter` | Confirm |
/// | `Esc` | Cancel |
/// | `Ctrl+C` | Quit |
#[must_use]
pub fn key_to_prompt_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Message::PromptConfirm),
        KeyCode::Esc => Some(Message::PromptCancel),
        KeyCode::Backspace => Some(Message::PromptBackspace),
        KeyCode::Char(ch) => Some(Message::PromptInput { ch }),
        _ => None,
    }
}
