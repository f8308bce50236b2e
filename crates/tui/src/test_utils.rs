//! Test utilities for the TUI crate.
//!
//! Buffer inspection helpers and a recording [`ScheduleSink`].

use ratatui::buffer::Buffer;
use sitegrid_engine::Persistence;
use sitegrid_protocol::{Task, ZoneId};

use crate::storage::ScheduleSink;

/// Converts a ratatui [`Buffer`] to a string, one line per row.
///
/// Trailing whitespace is trimmed from each line.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| row_text(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the text of one buffer row with trailing whitespace trimmed.
#[must_use]
pub(crate) fn row_text(buf: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buf.area.width {
        if let Some(cell) = buf.cell((buf.area.x + x, buf.area.y + y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Keeps a copy of every save.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub tasks: Vec<(ZoneId, Vec<Task>)>,
    pub lanes: Vec<(ZoneId, Vec<String>)>,
}

impl Persistence for RecordingSink {
    fn save(&mut self, zone: &ZoneId, tasks: &[Task]) {
        self.tasks.push((zone.clone(), tasks.to_vec()));
    }
}

impl ScheduleSink for RecordingSink {
    fn save_lanes(&mut self, zone: &ZoneId, lanes: &[String]) {
        self.lanes.push((zone.clone(), lanes.to_vec()));
    }
}
