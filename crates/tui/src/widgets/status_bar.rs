//! The footer line: current zone, latest notification and key hints.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
};
use sitegrid_protocol::ZoneId;

/// Hints shown on the right of the status line.
const HINTS: &str = "Tab zone  n new  ? help ";

/// Renders the status line.
///
/// While `dragging`, the hint area tells the user how to back out instead.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use sitegrid_protocol::ZoneId;
/// use sitegrid_tui::widgets::render_status_bar;
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
/// render_status_bar(&ZoneId::new("A"), Some("Task added"), false, area, &mut buf);
/// ```
pub fn render_status_bar(
    zone: &ZoneId,
    status: Option<&str>,
    dragging: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.height == 0 {
        return;
    }
    let zone_label = format!(" Zone {zone} ");
    let hints = if dragging { "Esc cancel drag " } else { HINTS };

    let [zone_area, message_area, hint_area] = Layout::horizontal([
        Constraint::Length(u16::try_from(zone_label.len()).unwrap_or(u16::MAX)),
        Constraint::Min(0),
        Constraint::Length(u16::try_from(hints.len()).unwrap_or(u16::MAX)),
    ])
    .areas(area);

    let zone_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    buf.set_stringn(
        zone_area.x,
        zone_area.y,
        &zone_label,
        usize::from(zone_area.width),
        zone_style,
    );

    if let Some(message) = status {
        buf.set_stringn(
            message_area.x + 1,
            message_area.y,
            message,
            usize::from(message_area.width.saturating_sub(1)),
            Style::default().fg(Color::White),
        );
    }

    buf.set_stringn(
        hint_area.x,
        hint_area.y,
        hints,
        usize::from(hint_area.width),
        Style::default().fg(Color::DarkGray),
    );
}
