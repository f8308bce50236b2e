//! Error types for the sitegrid-protocol crate.
//!
//! This module defines all error types that can occur when working with
//! protocol types, such as unknown lanes and invalid names or times.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The lane index does not exist in the zone.
    #[error("lane not found: index {0}")]
    LaneNotFound(usize),

    /// The lane still has tasks assigned and cannot be removed.
    #[error("lane {index} is still referenced by {tasks} task(s)")]
    LaneInUse {
        /// The lane that was asked to be removed.
        index: usize,
        /// How many tasks reference it.
        tasks: usize,
    },

    /// A lane name was empty or whitespace.
    #[error("invalid lane name: name cannot be empty")]
    InvalidLaneName,

    /// The zone does not exist on the board.
    #[error("zone not found: {0}")]
    ZoneNotFound(String),

    /// A time string could not be parsed.
    #[error("invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
