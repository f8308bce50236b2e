//! Sample data for first launch and demonstration.
//!
//! # Examples
//!
//! ```
//! use sitegrid_protocol::dummy::sample_board;
//!
//! let board = sample_board();
//! assert_eq!(board.zones().len(), 3);
//! assert_eq!(board.total_tasks(), 9);
//! ```

use crate::board::ScheduleBoard;
use crate::task::{Task, TradeColor};
use crate::zone::{Zone, ZoneId};

/// A builder for sample tasks, reducing boilerplate in [`sample_board`].
struct TaskBuilder {
    lane: usize,
    top: i32,
    height: i32,
    text: String,
    color: TradeColor,
}

impl TaskBuilder {
    fn new(lane: usize, text: impl Into<String>) -> Self {
        Self {
            lane,
            top: 0,
            height: 160,
            text: text.into(),
            color: TradeColor::Carpenter,
        }
    }

    /// Sets the span in grid pixels.
    fn span(mut self, top: i32, height: i32) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    fn color(mut self, color: TradeColor) -> Self {
        self.color = color;
        self
    }

    fn build(self) -> Task {
        Task::new(self.lane, self.top, self.height, self.text).with_color(self.color)
    }
}

fn seed(zone: &mut Zone, tasks: impl IntoIterator<Item = TaskBuilder>) {
    for builder in tasks {
        // Default lanes always cover the sample lane indices.
        let _ = zone.add_task(builder.build());
    }
}

/// Generates a board with a few tasks per zone on the reference grid.
///
/// - **Zone A**: 4 tasks, one per trade
/// - **Zone B**: 3 tasks
/// - **Zone C**: 2 tasks
#[must_use]
pub fn sample_board() -> ScheduleBoard {
    let mut board = ScheduleBoard::default();
    let [zone_a, zone_b, zone_c] = ["A", "B", "C"].map(ZoneId::new);

    if let Some(zone) = board.zone_mut(&zone_a) {
        seed(
            zone,
            [
                TaskBuilder::new(0, "Formwork L2").span(0, 320),
                TaskBuilder::new(1, "Column rebar")
                    .span(160, 240)
                    .color(TradeColor::Rebar),
                TaskBuilder::new(2, "Slab pour")
                    .span(480, 320)
                    .color(TradeColor::Concrete),
                TaskBuilder::new(3, "Temporary lighting")
                    .span(1120, 160)
                    .color(TradeColor::Electrical),
            ],
        );
    }

    if let Some(zone) = board.zone_mut(&zone_b) {
        seed(
            zone,
            [
                TaskBuilder::new(0, "Stair forms").span(320, 160),
                TaskBuilder::new(1, "Wall mesh")
                    .span(0, 480)
                    .color(TradeColor::Rebar),
                TaskBuilder::new(3, "Conduit run")
                    .span(640, 240)
                    .color(TradeColor::Electrical),
            ],
        );
    }

    if let Some(zone) = board.zone_mut(&zone_c) {
        seed(
            zone,
            [
                TaskBuilder::new(2, "Footing pour")
                    .span(160, 480)
                    .color(TradeColor::Concrete),
                TaskBuilder::new(0, "Strip forms").span(960, 240),
            ],
        );
    }

    board
}
