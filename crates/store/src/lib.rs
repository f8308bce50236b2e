//! Schedule persistence for the sitegrid application.
//!
//! - [`schedule`]: per-zone JSON files and board loading
//! - [`saver`]: a background writer that never blocks the caller
//! - [`error`]: error types for storage operations
//!
//! Both [`ScheduleStore`] and [`BackgroundSaver`] implement the engine's
//! [`Persistence`](sitegrid_engine::Persistence) trait and absorb their own
//! write failures by logging them.

pub mod error;
pub mod saver;
pub mod schedule;

pub use error::{Result, StoreError};
pub use saver::{BackgroundSaver, SaveRequest};
pub use schedule::{ScheduleStore, StoredLanes, StoredTasks};
