//! Error taxonomy for logger construction and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the construction and level entry points.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log path has no usable file name component.
    #[error("Bad file: {0:?} has no file name")]
    BadFile(String),

    /// Negative rotation size or backup count.
    #[error("Bad size or backup: max_size_mb={max_size_mb}, max_backups={max_backups}")]
    BadSizeOrBackup { max_size_mb: i64, max_backups: i64 },

    /// Level name is not one of debug, info, warn, error.
    #[error("Bad log level: {0:?}")]
    InvalidLevel(String),

    /// Log directory could not be created. Never returned from `configure`;
    /// reported on stderr and through the logger instead.
    #[error("Failed to create log directory {}: {source}", .directory.display())]
    DirectoryCreate {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Log file could not be opened. Reported like `DirectoryCreate`.
    #[error("Failed to open log file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for logger operations.
pub type LogResult<T> = Result<T, LogError>;
