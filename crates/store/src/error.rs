//! Error types for schedule storage.

use std::path::PathBuf;

/// Errors that can occur while reading or writing schedules.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A file or directory could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored file does not contain valid schedule JSON.
    #[error("corrupt schedule file {path}: {source}")]
    Corrupt {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Schedule data could not be serialized.
    #[error("failed to serialize schedule: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/data/schedules/A/tasks.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "I/O error at /data/schedules/A/tasks.json: denied"
        );
    }
}
