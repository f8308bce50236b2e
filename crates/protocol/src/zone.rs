//! Schedule zones: lanes plus the tasks assigned to them.
//!
//! A [`Zone`] is an independent schedule partition (work area A, B, C...).
//! Its lanes are ordered trade columns; every task references a lane by
//! index, and that index stays valid across every operation here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::task::{Task, TaskId, TradeColor};

/// Identifier of a zone, e.g. `"A"`.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::ZoneId;
///
/// let id = ZoneId::new("A");
/// assert_eq!(id.as_str(), "A");
/// assert_eq!(id.to_string(), "A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Creates a zone identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// An independently scheduled work area.
///
/// # Examples
///
/// ```
/// use sitegrid_protocol::{Zone, ZoneId};
///
/// let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter", "Rebar"]);
/// let id = zone.add_task_to_lane(1).unwrap();
///
/// assert_eq!(zone.tasks_in_lane(1).count(), 1);
/// assert_eq!(zone.get_task(id).unwrap().text, "New task");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// The zone's identifier.
    pub id: ZoneId,
    /// Lane names in column order.
    pub lanes: Vec<String>,
    /// Tasks in this zone, in insertion order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Zone {
    /// Creates a zone with the given lanes and no tasks.
    #[must_use]
    pub fn new<I, S>(id: ZoneId, lanes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            lanes: lanes.into_iter().map(Into::into).collect(),
            tasks: Vec::new(),
        }
    }

    /// Returns the number of lanes.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` if `index` names an existing lane.
    #[must_use]
    pub fn has_lane(&self, index: usize) -> bool {
        index < self.lanes.len()
    }

    /// Appends a lane and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidLaneName`] if the trimmed name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::{Zone, ZoneId};
    ///
    /// let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter"]);
    /// assert_eq!(zone.add_lane("Plumbing").unwrap(), 1);
    /// assert!(zone.add_lane("   ").is_err());
    /// ```
    pub fn add_lane(&mut self, name: &str) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProtocolError::InvalidLaneName);
        }
        self.lanes.push(name.to_string());
        Ok(self.lanes.len() - 1)
    }

    /// Removes a lane that no task references.
    ///
    /// Tasks in later lanes have their `lane_index` shifted down so that
    /// every index stays valid.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LaneNotFound`] for an out-of-range index and
    /// [`ProtocolError::LaneInUse`] while any task is still assigned to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::{Task, Zone, ZoneId};
    ///
    /// let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter", "Rebar", "Concrete"]);
    /// zone.add_task(Task::new(2, 0, 40, "Pour")).unwrap();
    ///
    /// assert!(zone.remove_lane(2).is_err());
    /// assert_eq!(zone.remove_lane(1).unwrap(), "Rebar");
    /// assert_eq!(zone.tasks[0].lane_index, 1);
    /// ```
    pub fn remove_lane(&mut self, index: usize) -> Result<String> {
        if !self.has_lane(index) {
            return Err(ProtocolError::LaneNotFound(index));
        }

        let referencing = self.tasks_in_lane(index).count();
        if referencing > 0 {
            return Err(ProtocolError::LaneInUse {
                index,
                tasks: referencing,
            });
        }

        for task in self.tasks.iter_mut().filter(|t| t.lane_index > index) {
            task.lane_index -= 1;
        }
        Ok(self.lanes.remove(index))
    }

    /// Adds a task, checking that its lane exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LaneNotFound`] if the task's lane is out of range.
    pub fn add_task(&mut self, task: Task) -> Result<TaskId> {
        if !self.has_lane(task.lane_index) {
            return Err(ProtocolError::LaneNotFound(task.lane_index));
        }
        let id = task.id;
        self.tasks.push(task);
        Ok(id)
    }

    /// Adds the default new task (10:00, one hour) to a lane.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LaneNotFound`] if the lane does not exist.
    pub fn add_task_to_lane(&mut self, lane_index: usize) -> Result<TaskId> {
        self.add_task(Task::placeholder(lane_index))
    }

    /// Removes and returns a task by ID, if found.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    /// Returns `true` if the task is part of this zone.
    #[must_use]
    pub fn contains_task(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Returns a reference to a task by ID, if found.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns a mutable reference to a task by ID, if found.
    #[must_use]
    pub fn get_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Iterates the tasks of one lane in collection order.
    pub fn tasks_in_lane(&self, lane_index: usize) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.lane_index == lane_index)
    }

    /// Moves a task to another lane, appending it to the end of that lane's
    /// collection.
    ///
    /// Returns `false` if the task or the lane does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_protocol::{Task, Zone, ZoneId};
    ///
    /// let mut zone = Zone::new(ZoneId::new("A"), ["Carpenter", "Rebar"]);
    /// let first = zone.add_task(Task::new(0, 0, 40, "Forms")).unwrap();
    /// zone.add_task(Task::new(1, 0, 40, "Ties")).unwrap();
    ///
    /// assert!(zone.move_task_to_lane(first, 1));
    /// let texts: Vec<_> = zone.tasks_in_lane(1).map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["Ties", "Forms"]);
    /// ```
    pub fn move_task_to_lane(&mut self, id: TaskId, lane_index: usize) -> bool {
        if !self.has_lane(lane_index) {
            return false;
        }
        let Some(mut task) = self.remove_task(id) else {
            return false;
        };
        task.move_to_lane(lane_index);
        self.tasks.push(task);
        true
    }

    /// Sets a task's trade color. Returns `false` if the task is not found.
    pub fn set_color(&mut self, id: TaskId, color: TradeColor) -> bool {
        match self.get_task_mut(id) {
            Some(task) => {
                task.color = Some(color);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_zone() -> Zone {
        Zone::new(
            ZoneId::new("A"),
            ["Carpenter", "Rebar", "Concrete", "Electrical"],
        )
    }

    #[test]
    fn add_task_rejects_unknown_lane() {
        let mut zone = sample_zone();
        let err = zone.add_task(Task::new(4, 0, 40, "Nowhere"));
        assert!(matches!(err, Err(ProtocolError::LaneNotFound(4))));
        assert!(zone.tasks.is_empty());
    }

    #[test]
    fn placeholder_task_defaults() {
        let mut zone = sample_zone();
        let id = zone.add_task_to_lane(3).expect("lane exists");
        let task = zone.get_task(id).expect("task exists");

        assert_eq!(task.lane_index, 3);
        assert_eq!((task.top, task.height), (320, 160));
        assert_eq!(task.color, Some(TradeColor::Carpenter));
    }

    #[test]
    fn task_belongs_to_exactly_one_lane_after_move() {
        let mut zone = sample_zone();
        let id = zone.add_task(Task::new(1, 0, 40, "Forms")).expect("add");

        assert!(zone.move_task_to_lane(id, 3));

        let lanes_holding: Vec<usize> = (0..zone.lane_count())
            .filter(|&lane| zone.tasks_in_lane(lane).any(|t| t.id == id))
            .collect();
        assert_eq!(lanes_holding, vec![3]);
    }

    #[test]
    fn move_to_missing_lane_keeps_task() {
        let mut zone = sample_zone();
        let id = zone.add_task(Task::new(1, 0, 40, "Forms")).expect("add");

        assert!(!zone.move_task_to_lane(id, 9));
        assert_eq!(zone.get_task(id).expect("still there").lane_index, 1);
    }

    #[test]
    fn move_unknown_task_is_false() {
        let mut zone = sample_zone();
        assert!(!zone.move_task_to_lane(TaskId::new_v4(), 0));
    }

    #[test]
    fn remove_lane_out_of_range() {
        let mut zone = sample_zone();
        assert!(matches!(
            zone.remove_lane(10),
            Err(ProtocolError::LaneNotFound(10))
        ));
    }

    #[test]
    fn remove_lane_in_use_is_rejected() {
        let mut zone = sample_zone();
        zone.add_task(Task::new(0, 0, 40, "a")).expect("add");
        zone.add_task(Task::new(0, 40, 40, "b")).expect("add");

        match zone.remove_lane(0) {
            Err(ProtocolError::LaneInUse { index, tasks }) => {
                assert_eq!(index, 0);
                assert_eq!(tasks, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(zone.lane_count(), 4);
    }

    #[test]
    fn remove_lane_reindexes_later_tasks() {
        let mut zone = sample_zone();
        let early = zone.add_task(Task::new(0, 0, 40, "early")).expect("add");
        let late = zone.add_task(Task::new(3, 0, 40, "late")).expect("add");

        zone.remove_lane(1).expect("lane is empty");

        assert_eq!(zone.lanes, ["Carpenter", "Concrete", "Electrical"]);
        assert_eq!(zone.get_task(early).expect("early").lane_index, 0);
        assert_eq!(zone.get_task(late).expect("late").lane_index, 2);
        assert!(zone.tasks.iter().all(|t| zone.has_lane(t.lane_index)));
    }

    #[test]
    fn set_color_on_missing_task() {
        let mut zone = sample_zone();
        assert!(!zone.set_color(TaskId::new_v4(), TradeColor::Rebar));
    }

    #[test]
    fn zone_serialization_roundtrip() {
        let mut zone = sample_zone();
        zone.add_task_to_lane(0).expect("add");

        let json = serde_json::to_string(&zone).expect("serialize");
        assert!(json.contains(r#""id":"A""#));
        let parsed: Zone = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, zone);
    }
}
