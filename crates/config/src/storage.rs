//! Storage location configuration.
//!
//! Schedules are written below a data directory. By default this is the
//! platform data directory (`~/.local/share/sitegrid` on Linux); a config
//! file may point it elsewhere.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Application directory name below the platform data directory.
const DATA_DIR_NAME: &str = "sitegrid";

/// Where schedule data lives on disk.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use sitegrid_config::StorageConfig;
///
/// let config = StorageConfig::at("/tmp/sitegrid-data");
/// assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/tmp/sitegrid-data"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit data directory; the platform default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Creates a storage configuration pointing at `data_dir`.
    #[must_use]
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Returns the data directory to use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if no directory is configured
    /// and the platform data directory cannot be determined.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join(DATA_DIR_NAME))
            .ok_or(ConfigError::NoHomeDirectory)
    }
}
