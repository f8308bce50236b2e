//! sitegrid - A terminal construction schedule board.
//!
//! This is the main binary that loads the configuration and the stored
//! schedule, then launches the TUI application.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use sitegrid_config::Config;
use sitegrid_store::{BackgroundSaver, ScheduleStore};
use sitegrid_tui::{App, terminal};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "SITEGRID_LOG";

/// Log file name inside the data directory.
const LOG_FILE: &str = "sitegrid.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().await.context("failed to load configuration")?;
    let data_dir = config.data_dir()?;
    init_logging(&data_dir)?;
    tracing::info!(data_dir = %data_dir.display(), "starting sitegrid");

    let store = ScheduleStore::new(&data_dir)?;
    let board = store.load_board();
    let (saver, writer) = BackgroundSaver::spawn(store);

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(board, &config.grid, saver);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    // Dropping the app closes the save queue; wait for pending writes
    drop(app);
    if let Err(error) = writer.await {
        tracing::warn!(%error, "background saver stopped abnormally");
    }
    tracing::info!("sitegrid stopped");

    result
}

/// Sends log output to a file, since the terminal belongs to the UI.
fn init_logging(data_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
