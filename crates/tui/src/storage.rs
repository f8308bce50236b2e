//! Where the front end sends its changes.

use sitegrid_engine::Persistence;
use sitegrid_protocol::ZoneId;
use sitegrid_store::BackgroundSaver;

/// Persistence for everything the UI can change.
///
/// Task sets go through the engine's [`Persistence`]; lane lists, which
/// only the UI edits, go through [`ScheduleSink::save_lanes`]. Neither
/// call may block.
pub trait ScheduleSink: Persistence {
    /// Saves a zone's lane names.
    fn save_lanes(&mut self, zone: &ZoneId, lanes: &[String]);
}

impl ScheduleSink for BackgroundSaver {
    fn save_lanes(&mut self, zone: &ZoneId, lanes: &[String]) {
        BackgroundSaver::save_lanes(self, zone, lanes);
    }
}
