//! The schedule board: an ordered set of zones and the zone being shown.

use crate::error::{ProtocolError, Result};
use crate::zone::{Zone, ZoneId};

/// Zone identifiers created by [`ScheduleBoard::default`].
pub const DEFAULT_ZONES: [&str; 3] = ["A", "B", "C"];

/// Lane names every default zone starts with.
pub const DEFAULT_LANES: [&str; 4] = ["Carpenter", "Rebar", "Concrete", "Electrical"];

/// A construction schedule split into independent zones.
///
/// Exactly one zone is current at any time; the board never holds zero
/// zones.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::{ScheduleBoard, ZoneId};
///
/// let mut board = ScheduleBoard::default();
/// assert_eq!(board.current_zone().id.as_str(), "A");
///
/// assert!(board.switch_zone(&ZoneId::new("B")));
/// assert_eq!(board.current_zone().id.as_str(), "B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBoard {
    zones: Vec<Zone>,
    current: usize,
}

impl Default for ScheduleBoard {
    fn default() -> Self {
        let zones = DEFAULT_ZONES
            .iter()
            .map(|id| Zone::new(ZoneId::new(*id), DEFAULT_LANES))
            .collect();
        Self { zones, current: 0 }
    }
}

impl ScheduleBoard {
    /// Creates a board from a list of zones. The first zone becomes current.
    ///
    /// Returns `None` if `zones` is empty.
    #[must_use]
    pub fn new(zones: Vec<Zone>) -> Option<Self> {
        if zones.is_empty() {
            return None;
        }
        Some(Self { zones, current: 0 })
    }

    /// Returns all zones in tab order.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Returns the zone currently shown.
    #[must_use]
    pub fn current_zone(&self) -> &Zone {
        &self.zones[self.current]
    }

    /// Returns the zone currently shown, mutably.
    #[must_use]
    pub fn current_zone_mut(&mut self) -> &mut Zone {
        &mut self.zones[self.current]
    }

    /// Returns the index of the current zone.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Looks up a zone by ID.
    #[must_use]
    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    /// Looks up a zone by ID, mutably.
    #[must_use]
    pub fn zone_mut(&mut self, id: &ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| &z.id == id)
    }

    /// Makes another zone current.
    ///
    /// Returns `false` (and changes nothing) if the zone is unknown or
    /// already current.
    pub fn switch_zone(&mut self, id: &ZoneId) -> bool {
        match self.zones.iter().position(|z| &z.id == id) {
            Some(idx) if idx != self.current => {
                self.current = idx;
                true
            }
            _ => false,
        }
    }

    /// Makes the next zone current, wrapping around, and returns its ID.
    pub fn next_zone(&mut self) -> &ZoneId {
        self.current = (self.current + 1) % self.zones.len();
        &self.zones[self.current].id
    }

    /// Replaces a zone with a stored copy carrying the same ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ZoneNotFound`] if the board has no zone with
    /// that ID.
    pub fn replace_zone(&mut self, zone: Zone) -> Result<()> {
        let slot = self
            .zones
            .iter_mut()
            .find(|z| z.id == zone.id)
            .ok_or_else(|| ProtocolError::ZoneNotFound(zone.id.to_string()))?;
        *slot = zone;
        Ok(())
    }

    /// Returns the total number of tasks across all zones.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.zones.iter().map(|z| z.tasks.len()).sum()
    }
}
