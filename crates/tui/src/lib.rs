//! Terminal UI for the sitegrid application.
//!
//! This crate provides a Ratatui-based front end for the schedule grid.
//! It is the pointer source, lane layout provider, renderer and label
//! editor that the gesture engine talks to.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Selection, prompt and in-flight overlay
//! - [`layout`]: Screen regions and the cell/pixel mapping
//! - [`storage`]: Where committed changes are sent
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use sitegrid_config::GridConfig;
//! use sitegrid_protocol::dummy::sample_board;
//! use sitegrid_store::{BackgroundSaver, ScheduleStore};
//! use sitegrid_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let (saver, writer) = BackgroundSaver::spawn(ScheduleStore::new("/tmp/sitegrid")?);
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(sample_board(), &GridConfig::default(), saver);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     drop(app);
//!     writer.await?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod state;
pub mod storage;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::AppState;
pub use storage::ScheduleSink;
