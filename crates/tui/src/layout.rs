//! Layout measurements and the cell/pixel mapping of the schedule grid.
//!
//! The engine works in grid pixels. On a terminal one row is one grid unit
//! and one column is [`PX_PER_COLUMN`] pixels, so pointer cells are converted
//! here before they reach the gesture controller.

use std::ops::Range;

use ratatui::layout::{Constraint, Layout, Rect};
use sitegrid_engine::{Hit, LaneBounds, LaneLayout, Point, lanes::uniform_lanes};
use sitegrid_protocol::Zone;

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status line in rows.
pub const STATUS_HEIGHT: u16 = 1;

/// Height of the lane name row above the grid body.
pub const LANE_HEADER_HEIGHT: u16 = 1;

/// Width of the time axis on the left of the grid (`"08:00 "`).
pub const TIME_AXIS_WIDTH: u16 = 6;

/// Horizontal pixels covered by one terminal column.
pub const PX_PER_COLUMN: i32 = 8;

/// Bars at least this many rows tall get resize handles.
pub const HANDLE_MIN_ROWS: usize = 3;

/// Minimum terminal height for useful rendering.
///
/// Lane header, status line and a handful of grid rows.
pub const MIN_HEIGHT: u16 = 8;

/// Minimum terminal height for rendering with header.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 40;

/// The regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar, absent in compact mode.
    pub header: Option<Rect>,
    /// Lane names, time axis and bars.
    pub grid: Rect,
    /// Notification line.
    pub status: Rect,
}

/// Splits the terminal area into header, grid and status line.
#[must_use]
pub fn split_screen(area: Rect, show_header: bool) -> ScreenAreas {
    if show_header {
        let [header, grid, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);
        ScreenAreas {
            header: Some(header),
            grid,
            status,
        }
    } else {
        let [grid, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)]).areas(area);
        ScreenAreas {
            header: None,
            grid,
            status,
        }
    }
}

/// Where each part of the grid sits on screen, and how cells map to pixels.
///
/// # Examples
///
/// ```
/// use ratatui::layout::Rect;
/// use sitegrid_tui::layout::GridLayout;
///
/// // 4 lanes over 80 columns, 40px rows, scrolled down by two rows
/// let layout = GridLayout::new(Rect::new(0, 0, 86, 20), 4, 40, 2);
/// let point = layout.to_point(6 + 3, 1);
/// assert_eq!((point.x, point.y), (24, 80));
/// assert_eq!(layout.lane_at_column(6 + 25), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    axis: Rect,
    lane_header: Rect,
    body: Rect,
    lane_width: u16,
    unit: i32,
    scroll: u16,
    lanes: Vec<LaneBounds>,
}

impl GridLayout {
    /// Lays out `lane_count` equal columns inside `area`.
    ///
    /// `scroll` is the first grid row shown at the top of the body.
    #[must_use]
    pub fn new(area: Rect, lane_count: usize, unit: i32, scroll: u16) -> Self {
        let axis_width = TIME_AXIS_WIDTH.min(area.width);
        let header_height = LANE_HEADER_HEIGHT.min(area.height);
        let body = Rect {
            x: area.x + axis_width,
            y: area.y + header_height,
            width: area.width - axis_width,
            height: area.height - header_height,
        };
        let lane_width = u16::try_from(lane_count.max(1))
            .map_or(1, |count| (body.width / count).max(1));

        Self {
            axis: Rect {
                x: area.x,
                y: body.y,
                width: axis_width,
                height: body.height,
            },
            lane_header: Rect {
                x: body.x,
                y: area.y,
                width: body.width,
                height: header_height,
            },
            body,
            lane_width,
            unit: unit.max(1),
            scroll,
            lanes: uniform_lanes(0, i32::from(lane_width) * PX_PER_COLUMN, lane_count),
        }
    }

    /// The time axis column.
    #[must_use]
    pub const fn axis(&self) -> Rect {
        self.axis
    }

    /// The lane name row.
    #[must_use]
    pub const fn lane_header(&self) -> Rect {
        self.lane_header
    }

    /// The area bars are drawn in.
    #[must_use]
    pub const fn body(&self) -> Rect {
        self.body
    }

    /// Columns per lane.
    #[must_use]
    pub const fn lane_width(&self) -> u16 {
        self.lane_width
    }

    /// First visible grid row.
    #[must_use]
    pub const fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Converts a terminal cell to a grid pixel position.
    ///
    /// Cells left of or above the body map to negative pixels.
    #[must_use]
    pub fn to_point(&self, column: u16, row: u16) -> Point {
        let x = (i32::from(column) - i32::from(self.body.x)) * PX_PER_COLUMN;
        let y = (i32::from(row) - i32::from(self.body.y) + i32::from(self.scroll)) * self.unit;
        Point::new(x, y)
    }

    /// Returns the lane under a terminal column.
    #[must_use]
    pub fn lane_at_column(&self, column: u16) -> Option<usize> {
        if column < self.body.x {
            return None;
        }
        let x = self.to_point(column, self.body.y).x;
        sitegrid_engine::lanes::lane_at(x, &self.lanes)
    }

    /// Returns the screen columns of a lane, clipped to the body.
    #[must_use]
    pub fn lane_columns(&self, lane: usize) -> Option<Rect> {
        let offset = u16::try_from(lane).ok()?.checked_mul(self.lane_width)?;
        if offset >= self.body.width || lane >= self.lanes.len() {
            return None;
        }
        Some(Rect {
            x: self.body.x + offset,
            y: self.body.y,
            width: self.lane_width.min(self.body.width - offset),
            height: self.body.height,
        })
    }

    /// Returns the absolute grid rows a bar covers.
    #[must_use]
    pub fn bar_rows(&self, top: i32, height: i32) -> Range<i32> {
        let first = top.div_euclid(self.unit);
        let end = (top.saturating_add(height) + self.unit - 1).div_euclid(self.unit);
        first..end.max(first + 1)
    }

    /// Maps an absolute grid row to a screen row, if it is visible.
    #[must_use]
    pub fn screen_row(&self, grid_row: i32) -> Option<u16> {
        let offset = u16::try_from(grid_row - i32::from(self.scroll)).ok()?;
        (offset < self.body.height).then(|| self.body.y + offset)
    }

    /// Returns the grid row under a screen row, if it is inside the body.
    #[must_use]
    pub fn grid_row_at(&self, row: u16) -> Option<i32> {
        (row >= self.body.y && row < self.body.y + self.body.height)
            .then(|| i32::from(row - self.body.y) + i32::from(self.scroll))
    }

    /// Resolves what a press at a cell lands on.
    ///
    /// Later tasks in the zone are drawn over earlier ones, so they win.
    /// Bars of [`HANDLE_MIN_ROWS`] rows or more have a top handle on their
    /// first row and a bottom handle on their last; shorter bars are
    /// body-only.
    #[must_use]
    pub fn hit_test(&self, zone: &Zone, column: u16, row: u16) -> Hit {
        let (Some(lane), Some(grid_row)) = (self.lane_at_column(column), self.grid_row_at(row))
        else {
            return Hit::None;
        };

        let Some(task) = zone
            .tasks_in_lane(lane)
            .filter(|t| self.bar_rows(t.top, t.height).contains(&grid_row))
            .last()
        else {
            return Hit::None;
        };

        let rows = self.bar_rows(task.top, task.height);
        if rows.len() >= HANDLE_MIN_ROWS {
            if grid_row == rows.start {
                return Hit::TopHandle(task.id);
            }
            if grid_row == rows.end - 1 {
                return Hit::BottomHandle(task.id);
            }
        }
        Hit::Body(task.id)
    }
}

impl LaneLayout for GridLayout {
    fn lane_bounds(&self) -> &[LaneBounds] {
        &self.lanes
    }
}
