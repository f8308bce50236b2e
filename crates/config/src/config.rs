//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the sitegrid application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::GridConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::storage::StorageConfig;

/// The main configuration struct for the sitegrid application.
///
/// # Examples
///
/// ```
/// use sitegrid_config::{Config, GridConfig, StorageConfig};
///
/// let config = Config::default();
/// assert_eq!(config.grid, GridConfig::default());
///
/// let config = Config {
///     storage: StorageConfig::at("/srv/sitegrid"),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Grid quantization and operating hours.
    #[serde(default)]
    pub grid: GridConfig,

    /// Where schedules and logs are written.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Loads configuration from the default file locations.
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sitegrid_config::Config;
    ///
    /// # async fn example() -> sitegrid_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("{} rows per day", config.grid.units_per_day());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid settings are inconsistent.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()
    }

    /// Returns the resolved data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the platform
    /// default cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf> {
        self.storage.resolve_data_dir()
    }
}
