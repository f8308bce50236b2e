//! File-backed schedule storage.
//!
//! Each zone gets its own directory holding the task set and the lane
//! names as pretty-printed JSON.
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/
//! └── schedules/
//!     ├── A/
//!     │   ├── tasks.json
//!     │   └── lanes.json
//!     └── B/
//!         └── tasks.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use sitegrid_engine::Persistence;
use sitegrid_protocol::dummy::sample_board;
use sitegrid_protocol::{DEFAULT_LANES, ScheduleBoard, Task, Zone, ZoneId};
use tracing::{debug, instrument, warn};

use crate::error::{Result, StoreError};

const SCHEDULES_DIR: &str = "schedules";
const TASKS_FILE: &str = "tasks.json";
const LANES_FILE: &str = "lanes.json";

/// A zone's task set as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTasks {
    /// Every task of the zone.
    pub tasks: Vec<Task>,
    /// When the file was written.
    pub saved_at: DateTime<Utc>,
}

/// A zone's lane names as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLanes {
    /// Lane names in column order.
    pub lanes: Vec<String>,
    /// When the file was written.
    pub saved_at: DateTime<Utc>,
}

/// Reads and writes zone schedules below a data directory.
///
/// # Examples
///
/// ```no_run
/// use sitegrid_store::ScheduleStore;
///
/// # fn example() -> sitegrid_store::Result<()> {
/// let store = ScheduleStore::new("/srv/sitegrid")?;
/// let board = store.load_board();
/// println!("{} tasks on the board", board.total_tasks());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    base_path: PathBuf,
}

impl ScheduleStore {
    /// Opens the store below `data_dir`, creating `schedules/` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip_all, fields(data_dir = %data_dir.as_ref().display()))]
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_path(data_dir.as_ref().join(SCHEDULES_DIR))
    }

    /// Opens the store at an exact schedules directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_path(base_path: PathBuf) -> Result<Self> {
        if !base_path.exists() {
            debug!(?base_path, "creating schedules directory");
            fs::create_dir_all(&base_path).map_err(|source| StoreError::Io {
                path: base_path.clone(),
                source,
            })?;
        }
        Ok(Self { base_path })
    }

    /// Returns the schedules directory.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loads a zone's stored tasks. Returns `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_tasks(&self, zone: &ZoneId) -> Result<Option<StoredTasks>> {
        read_json(&self.zone_dir(zone).join(TASKS_FILE))
    }

    /// Loads a zone's stored lane names. Returns `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_lanes(&self, zone: &ZoneId) -> Result<Option<StoredLanes>> {
        read_json(&self.zone_dir(zone).join(LANES_FILE))
    }

    /// Writes a zone's task set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, tasks), fields(tasks = tasks.len()))]
    pub fn save_tasks(&self, zone: &ZoneId, tasks: &[Task]) -> Result<()> {
        let stored = StoredTasks {
            tasks: tasks.to_vec(),
            saved_at: Utc::now(),
        };
        write_json(&self.zone_dir(zone).join(TASKS_FILE), &stored)
    }

    /// Writes a zone's lane names.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, lanes), fields(lanes = lanes.len()))]
    pub fn save_lanes(&self, zone: &ZoneId, lanes: &[String]) -> Result<()> {
        let stored = StoredLanes {
            lanes: lanes.to_vec(),
            saved_at: Utc::now(),
        };
        write_json(&self.zone_dir(zone).join(LANES_FILE), &stored)
    }

    /// Rebuilds a zone from disk.
    ///
    /// Returns `None` if neither tasks nor lanes were ever saved. A zone
    /// with stored tasks but no stored lanes gets the default lanes. Tasks
    /// pointing at a lane that does not exist are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored file cannot be read or parsed.
    #[instrument(skip(self))]
    pub fn load_zone(&self, id: &ZoneId) -> Result<Option<Zone>> {
        let lanes = self.load_lanes(id)?;
        let tasks = self.load_tasks(id)?;
        if lanes.is_none() && tasks.is_none() {
            debug!("no stored schedule");
            return Ok(None);
        }

        let mut zone = match lanes {
            Some(stored) => Zone::new(id.clone(), stored.lanes),
            None => Zone::new(id.clone(), DEFAULT_LANES),
        };
        for task in tasks.map(|s| s.tasks).unwrap_or_default() {
            let (task_id, lane) = (task.id, task.lane_index);
            if zone.add_task(task).is_err() {
                warn!(%task_id, lane, "dropping stored task with unknown lane");
            }
        }
        debug!(tasks = zone.tasks.len(), lanes = zone.lane_count(), "loaded zone");
        Ok(Some(zone))
    }

    /// Builds the board from disk, falling back to sample data.
    ///
    /// Every zone of the sample board is replaced by its stored copy when
    /// one exists and can be read; unreadable zones are logged and keep
    /// the sample data.
    #[instrument(skip(self))]
    pub fn load_board(&self) -> ScheduleBoard {
        let mut board = sample_board();
        let ids: Vec<ZoneId> = board.zones().iter().map(|z| z.id.clone()).collect();

        for id in ids {
            match self.load_zone(&id) {
                Ok(Some(zone)) => {
                    // The id comes from the board itself
                    let _ = board.replace_zone(zone);
                }
                Ok(None) => {}
                Err(error) => warn!(zone = %id, %error, "keeping sample data for zone"),
            }
        }
        board
    }

    /// Returns the directory for one zone.
    fn zone_dir(&self, zone: &ZoneId) -> PathBuf {
        // Sanitize to prevent path traversal
        let safe = zone.as_str().replace(['/', '\\', '.'], "_");
        self.base_path.join(safe)
    }
}

impl Persistence for ScheduleStore {
    fn save(&mut self, zone: &ZoneId, tasks: &[Task]) {
        if let Err(error) = self.save_tasks(zone, tasks) {
            warn!(%zone, %error, "failed to save schedule");
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| {
                warn!(?path, error = %source, "failed to parse schedule file");
                StoreError::Corrupt {
                    path: path.to_path_buf(),
                    source,
                }
            }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(io_err)?;
    debug!(?path, "schedule file written");
    Ok(())
}
