//! Configuration management for the sitegrid application.
//!
//! This crate loads, validates and persists the user-tunable settings of
//! the scheduler: the grid quantization and operating hours, and where
//! schedule data is stored.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`grid`]: Grid unit, operating hours and drag threshold
//! - [`storage`]: Data directory resolution
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./sitegrid.json5` or `./sitegrid.json`)
//! 2. User config (`~/.config/sitegrid/config.json5` or `config.json`)
//! 3. Built-in defaults
//!
//! ```json5
//! {
//!   grid: {
//!     unit_px: 40,        // one grid row
//!     unit_minutes: 15,
//!     day_start: "08:00",
//!     day_end: "17:00",
//!     drag_threshold_px: 5,
//!   },
//!   storage: { data_dir: "/srv/sitegrid" },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use sitegrid_config::Config;
//!
//! # async fn example() -> sitegrid_config::Result<()> {
//! let config = Config::load().await?;
//! println!("Schedules stored in {}", config.data_dir()?.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod persistence;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use grid::GridConfig;
pub use storage::StorageConfig;
