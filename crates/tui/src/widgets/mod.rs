//! Widget components for the sitegrid TUI.
//!
//! Each widget is a function that renders state into a buffer, which keeps
//! them easy to test and compose.
//!
//! # Modules
//!
//! - [`schedule`]: The time axis, lane headers and task bars
//! - [`status_bar`]: The footer with the current zone and latest notification
//! - [`help`]: The keybinding overlay
//! - [`prompt`]: The modal text prompt
//!
//! # Color Coding
//!
//! Task bars are filled with the color of their [`TradeColor`]:
//!
//! | Trade | Color |
//! |-------|-------|
//! | `Carpenter` | Yellow |
//! | `Rebar` | Red |
//! | `Concrete` | Light blue |
//! | `Electrical` | Green |
//! | untagged | Gray |
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use sitegrid_engine::GridGeometry;
//! use sitegrid_protocol::ScheduleBoard;
//! use sitegrid_tui::{layout::GridLayout, state::Overlay, widgets};
//!
//! let board = ScheduleBoard::default();
//! let zone = board.current_zone();
//! let area = Rect::new(0, 0, 80, 24);
//! let layout = GridLayout::new(area, zone.lane_count(), 40, 0);
//! let overlay = Overlay::default();
//! let mut buf = Buffer::empty(area);
//!
//! let view = widgets::ScheduleView::new(zone, &layout, GridGeometry::default(), &overlay);
//! widgets::render_schedule(&view, &mut buf);
//! assert_eq!(buf.cell((6, 0)).map(|cell| cell.symbol()), Some("C"));
//! ```

use ratatui::{layout::Rect, style::Color};
use sitegrid_protocol::TradeColor;

pub mod help;
pub mod prompt;
pub mod schedule;
pub mod status_bar;

pub use help::render_help_overlay;
pub use prompt::render_prompt;
pub use schedule::{ScheduleView, render_schedule};
pub use status_bar::render_status_bar;

/// Returns the fill color of a task bar.
#[must_use]
pub const fn trade_color(color: Option<TradeColor>) -> Color {
    match color {
        Some(TradeColor::Carpenter) => Color::Yellow,
        Some(TradeColor::Rebar) => Color::Red,
        Some(TradeColor::Concrete) => Color::LightBlue,
        Some(TradeColor::Electrical) => Color::Green,
        None => Color::Gray,
    }
}

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
