//! Fire-and-forget schedule writes.
//!
//! The [`BackgroundSaver`] hands save requests to a single writer running
//! on tokio's blocking pool. Requests are written in the order they were
//! sent; the sender never waits for the disk.

use sitegrid_engine::Persistence;
use sitegrid_protocol::{Task, ZoneId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::schedule::ScheduleStore;

/// A write queued for the background writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    /// Replace a zone's task set.
    Tasks {
        /// The zone to write.
        zone: ZoneId,
        /// Its full task set.
        tasks: Vec<Task>,
    },
    /// Replace a zone's lane names.
    Lanes {
        /// The zone to write.
        zone: ZoneId,
        /// Lane names in column order.
        lanes: Vec<String>,
    },
}

/// Queues schedule writes for a background writer.
///
/// Dropping every clone of the saver closes the queue; the writer drains
/// what is left and its [`JoinHandle`] completes.
///
/// # Examples
///
/// ```no_run
/// use sitegrid_store::{BackgroundSaver, ScheduleStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = ScheduleStore::new("/srv/sitegrid")?;
/// let (saver, writer) = BackgroundSaver::spawn(store);
///
/// // ... hand `saver` to the UI ...
///
/// drop(saver);
/// writer.await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BackgroundSaver {
    tx: mpsc::UnboundedSender<SaveRequest>,
}

impl BackgroundSaver {
    /// Starts the writer for `store`. Must be called within a tokio runtime.
    #[must_use]
    pub fn spawn(store: ScheduleStore) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveRequest>();
        let handle = tokio::task::spawn_blocking(move || {
            while let Some(request) = rx.blocking_recv() {
                write(&store, &request);
            }
            debug!("schedule writer stopped");
        });
        (Self { tx }, handle)
    }

    /// Queues a lane list write.
    pub fn save_lanes(&self, zone: &ZoneId, lanes: &[String]) {
        self.send(SaveRequest::Lanes {
            zone: zone.clone(),
            lanes: lanes.to_vec(),
        });
    }

    fn send(&self, request: SaveRequest) {
        if self.tx.send(request).is_err() {
            warn!("schedule writer has stopped, dropping save");
        }
    }
}

impl Persistence for BackgroundSaver {
    fn save(&mut self, zone: &ZoneId, tasks: &[Task]) {
        self.send(SaveRequest::Tasks {
            zone: zone.clone(),
            tasks: tasks.to_vec(),
        });
    }
}

fn write(store: &ScheduleStore, request: &SaveRequest) {
    let (zone, result) = match request {
        SaveRequest::Tasks { zone, tasks } => (zone, store.save_tasks(zone, tasks)),
        SaveRequest::Lanes { zone, lanes } => (zone, store.save_lanes(zone, lanes)),
    };
    if let Err(error) = result {
        warn!(%zone, %error, "failed to save schedule");
    }
}
