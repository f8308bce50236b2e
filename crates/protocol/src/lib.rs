//! Shared protocol types for the sitegrid application.
//!
//! This crate defines the core types used across all sitegrid components,
//! including tasks, zones and their lanes, the schedule board, messages,
//! and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, trade colors, and the `Task` struct
//! - [`zone`]: Zones with their ordered lanes and task set
//! - [`board`]: The `ScheduleBoard` holding every zone
//! - [`time`]: Wall-clock `TimeOfDay`
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Creating and managing tasks on a board:
//!
//! ```
//! use sitegrid_protocol::{ScheduleBoard, Task, TradeColor};
//!
//! let mut board = ScheduleBoard::default();
//! let zone = board.current_zone_mut();
//!
//! // A one-hour task starting at the grid origin in the first lane
//! let id = zone.add_task(Task::new(0, 0, 160, "Formwork")).unwrap();
//!
//! // Move it to the rebar lane and recolor it
//! zone.move_task_to_lane(id, 1);
//! zone.set_color(id, TradeColor::Rebar);
//! assert_eq!(zone.get_task(id).unwrap().lane_index, 1);
//! ```

pub mod board;
pub mod dummy;
pub mod error;
pub mod message;
pub mod task;
pub mod time;
pub mod zone;

// Re-export primary types at crate root for convenience
pub use board::{DEFAULT_LANES, DEFAULT_ZONES, ScheduleBoard};
pub use error::{ProtocolError, Result};
pub use message::{Message, PointerPhase};
pub use task::{
    DEFAULT_TASK_HEIGHT, DEFAULT_TASK_TEXT, DEFAULT_TASK_TOP, Task, TaskId, TradeColor,
};
pub use time::TimeOfDay;
pub use zone::{Zone, ZoneId};
