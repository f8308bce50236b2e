//! The schedule grid: time axis, lane headers and task bars.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use sitegrid_engine::GridGeometry;
use sitegrid_protocol::{Task, TaskId, Zone};

use crate::layout::{GridLayout, HANDLE_MIN_ROWS};
use crate::state::Overlay;
use crate::widgets::trade_color;

/// Marker drawn before the label of a task that just changed lanes.
pub const MOVED_MARKER: &str = "» ";

/// Everything needed to draw one zone.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleView<'a> {
    zone: &'a Zone,
    layout: &'a GridLayout,
    geometry: GridGeometry,
    overlay: &'a Overlay,
    selected_lane: Option<usize>,
    selected_task: Option<TaskId>,
}

impl<'a> ScheduleView<'a> {
    /// Creates a view with nothing selected.
    #[must_use]
    pub const fn new(
        zone: &'a Zone,
        layout: &'a GridLayout,
        geometry: GridGeometry,
        overlay: &'a Overlay,
    ) -> Self {
        Self {
            zone,
            layout,
            geometry,
            overlay,
            selected_lane: None,
            selected_task: None,
        }
    }

    /// Marks the selected lane and task.
    #[must_use]
    pub const fn selected(mut self, lane: usize, task: Option<TaskId>) -> Self {
        self.selected_lane = Some(lane);
        self.selected_task = task;
        self
    }

    /// Where a task is drawn: the in-flight position while dragged, else the model.
    fn geometry_of(&self, task: &Task) -> (i32, i32) {
        self.overlay
            .position(task.id)
            .unwrap_or((task.top, task.height))
    }
}

/// Renders a zone's schedule into the layout's area.
///
/// Bars in flight are drawn last so they stay on top of the bars they
/// pass over.
pub fn render_schedule(view: &ScheduleView<'_>, buf: &mut Buffer) {
    render_lane_headers(view, buf);
    render_time_axis(view, buf);

    if let Some(columns) = view
        .overlay
        .highlighted()
        .and_then(|lane| view.layout.lane_columns(lane))
    {
        buf.set_style(columns, Style::default().bg(Color::DarkGray));
    }

    let (in_flight, resting): (Vec<&Task>, Vec<&Task>) = view
        .zone
        .tasks
        .iter()
        .partition(|t| view.overlay.position(t.id).is_some());
    for task in resting.into_iter().chain(in_flight) {
        render_bar(view, task, buf);
    }
}

fn render_lane_headers(view: &ScheduleView<'_>, buf: &mut Buffer) {
    let header = view.layout.lane_header();
    if header.height == 0 {
        return;
    }

    for (index, name) in view.zone.lanes.iter().enumerate() {
        let Some(columns) = view.layout.lane_columns(index) else {
            break;
        };
        let style = if view.overlay.highlighted() == Some(index) {
            Style::default().fg(Color::Black).bg(Color::LightYellow)
        } else if view.selected_lane == Some(index) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let cell = Rect::new(columns.x, header.y, columns.width, 1);
        buf.set_style(cell, style);
        let width = usize::from(cell.width.saturating_sub(1).max(1));
        buf.set_stringn(cell.x, cell.y, name, width, style);
    }
}

fn render_time_axis(view: &ScheduleView<'_>, buf: &mut Buffer) {
    let axis = view.layout.axis();
    if axis.width == 0 {
        return;
    }
    let span = view.geometry.span_px();

    for y in axis.y..axis.y + axis.height {
        let Some(grid_row) = view.layout.grid_row_at(y) else {
            continue;
        };
        let offset = grid_row.saturating_mul(view.geometry.unit);
        if offset >= span {
            break;
        }
        let time = view.geometry.time_at(offset);
        let (label, style) = if time.minute == 0 {
            (time.to_string(), Style::default().fg(Color::Gray))
        } else {
            (
                format!("  :{:02}", time.minute),
                Style::default().fg(Color::DarkGray),
            )
        };
        buf.set_stringn(axis.x, y, label, usize::from(axis.width), style);
    }
}

fn render_bar(view: &ScheduleView<'_>, task: &Task, buf: &mut Buffer) {
    let Some(columns) = view.layout.lane_columns(task.lane_index) else {
        return;
    };
    let (top, height) = view.geometry_of(task);
    let rows = view.layout.bar_rows(top, height);
    let row_count = rows.len();
    let width = columns.width.saturating_sub(1).max(1);

    let mut style = Style::default()
        .fg(Color::Black)
        .bg(trade_color(task.color));
    if view.selected_task == Some(task.id) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    for (index, grid_row) in rows.enumerate() {
        let Some(y) = view.layout.screen_row(grid_row) else {
            continue;
        };
        let line = Rect::new(columns.x, y, width, 1);
        buf.set_style(line, style);

        let text = match index {
            0 if view.overlay.moved() == Some(task.id) => format!("{MOVED_MARKER}{}", task.text),
            0 => task.text.clone(),
            last if row_count >= HANDLE_MIN_ROWS && last == row_count - 1 => {
                "═".repeat(usize::from(width))
            }
            1 => view.geometry.format_span(top, height),
            _ => continue,
        };
        buf.set_stringn(line.x, y, text, usize::from(width), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::row_text;
    use sitegrid_engine::Renderer;
    use sitegrid_protocol::ZoneId;

    fn zone() -> Zone {
        Zone::new(ZoneId::new("A"), ["Carpenter", "Rebar", "Concrete", "Electrical"])
    }

    /// 46x25: axis in columns 0..6, four 10-column lanes, body from row 1.
    fn layout(scroll: u16) -> GridLayout {
        GridLayout::new(Rect::new(0, 0, 46, 25), 4, 40, scroll)
    }

    fn draw(view: &ScheduleView<'_>) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, 46, 25));
        render_schedule(view, &mut buf);
        buf
    }

    #[test]
    fn lane_names_and_hours_are_drawn() {
        let zone = zone();
        let layout = layout(0);
        let overlay = Overlay::default();
        let buf = draw(&ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay));

        let header = row_text(&buf, 0);
        assert!(header.contains("Carpenter"));
        assert!(header.contains("Rebar"));
        assert!(row_text(&buf, 1).starts_with("08:00"));
        assert!(row_text(&buf, 2).starts_with("  :15"));
        assert!(row_text(&buf, 5).starts_with("09:00"));
    }

    #[test]
    fn axis_stops_at_end_of_day() {
        let zone = zone();
        // grid rows 30..36 are the last of the day, rows 36.. are past 17:00
        let layout = layout(30);
        let overlay = Overlay::default();
        let buf = draw(&ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay));

        assert!(row_text(&buf, 3).starts_with("16:00"));
        assert!(row_text(&buf, 6).starts_with("  :45"));
        assert_eq!(row_text(&buf, 7), "");
    }

    #[test]
    fn bar_shows_label_span_and_handle() {
        let mut zone = zone();
        zone.add_task(Task::new(1, 320, 160, "Column rebar")).expect("add");
        let layout = layout(0);
        let overlay = Overlay::default();
        let buf = draw(&ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay));

        // grid rows 8..12 are screen rows 9..13, lane 1 starts at column 16
        assert!(row_text(&buf, 9).contains("Column re"));
        assert!(row_text(&buf, 10).contains("10:00 ~ 1"));
        assert!(row_text(&buf, 12).contains("═════════"));
        let cell = buf.cell((16, 11)).expect("cell");
        assert_eq!(cell.bg, Color::Gray);
    }

    #[test]
    fn overlay_position_overrides_model() {
        let mut zone = zone();
        let id = zone.add_task(Task::new(0, 0, 40, "Ties")).expect("add");
        let layout = layout(0);
        let mut overlay = Overlay::default();
        overlay.set_position(id, 160, 40);
        let buf = draw(&ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay));

        assert!(!row_text(&buf, 1).contains("Ties"));
        assert!(row_text(&buf, 5).contains("Ties"));
    }

    #[test]
    fn highlighted_lane_is_shaded() {
        let zone = zone();
        let layout = layout(0);
        let mut overlay = Overlay::default();
        overlay.highlight_lane(Some(2));
        let buf = draw(&ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay));

        assert_eq!(buf.cell((27, 4)).map(|c| c.bg), Some(Color::DarkGray));
        assert_eq!(buf.cell((17, 4)).map(|c| c.bg), Some(Color::Reset));
    }

    #[test]
    fn moved_task_is_marked() {
        let mut zone = zone();
        let id = zone.add_task(Task::new(3, 0, 80, "Lights")).expect("add");
        let layout = layout(0);
        let mut overlay = Overlay::default();
        overlay.move_to_lane(id, 3);
        let buf = draw(&ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay));

        assert!(row_text(&buf, 1).contains("» Lights"));
    }

    #[test]
    fn selected_task_is_emphasised() {
        let mut zone = zone();
        let id = zone.add_task(Task::new(0, 0, 40, "Forms")).expect("add");
        let layout = layout(0);
        let overlay = Overlay::default();
        let view = ScheduleView::new(&zone, &layout, GridGeometry::default(), &overlay)
            .selected(0, Some(id));
        let buf = draw(&view);

        let cell = buf.cell((6, 1)).expect("cell");
        assert!(cell.modifier.contains(Modifier::BOLD));
    }
}
