//! Configuration file discovery, reading and writing.
//!
//! Files may be JSON5 (comments, unquoted keys, trailing commas) or plain
//! JSON; both go through the JSON5 parser. Writes always produce
//! pretty-printed JSON.
//!
//! # File Locations
//!
//! The first existing file wins:
//!
//! 1. Working directory: `./sitegrid.json5`, then `./sitegrid.json`
//! 2. User config directory: `<config_dir>/sitegrid/config.json5`, then
//!    `<config_dir>/sitegrid/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Project-local file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["sitegrid.json5", "sitegrid.json"];

/// Directory name below the platform config directory.
const USER_CONFIG_DIR: &str = "sitegrid";

/// File names inside the user config directory, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Returns the first of `names` that exists below `dir`.
fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|p| p.is_file())
}

/// Finds a configuration file, searching the working directory and then the
/// user config directory.
///
/// # Examples
///
/// ```no_run
/// use sitegrid_config::persistence::find_config_file;
///
/// match find_config_file() {
///     Some(path) => println!("using {}", path.display()),
///     None => println!("using built-in defaults"),
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = user_config_dir().ok();
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Finds a configuration file below explicit local and user directories.
///
/// Local names (`sitegrid.json5`, `sitegrid.json`) are tried in
/// `local_dir` before user names (`config.json5`, `config.json`) in
/// `user_dir`.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    first_existing(local_dir, LOCAL_FILE_NAMES)
        .or_else(|| user_dir.and_then(|dir| first_existing(dir, USER_FILE_NAMES)))
}

/// Returns the user configuration directory, typically
/// `~/.config/sitegrid/` on Linux.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config
/// directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and deserializes a JSON5 or JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read, or
/// [`ConfigError::ParseJson5`] if its content does not parse into `T`.
///
/// # Examples
///
/// ```no_run
/// use sitegrid_config::persistence::read_config_file;
/// use sitegrid_config::Config;
///
/// # fn main() -> sitegrid_config::Result<()> {
/// let config: Config = read_config_file("sitegrid.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Serializes `value` as pretty JSON and writes it to `path`, creating
/// parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::WriteFile`] on I/O failure or
/// [`ConfigError::SerializeJson`] if `value` cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source: std::io::Error| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(write_err)
}
