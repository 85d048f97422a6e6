//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::sink::RollingPolicy;

/// Root logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Encode records as JSON lines instead of console text.
    pub encode_json: bool,

    /// Also write records to `<directory>/<filename>`.
    /// The file fields below are ignored when this is false.
    pub file_logging: bool,

    /// Directory for the log file.
    pub directory: String,

    /// Log file name inside `directory`.
    pub filename: String,

    /// Size in megabytes before the file is rolled (0 = 100 MB).
    pub max_size_mb: u64,

    /// Rolled files to keep (0 = keep all).
    pub max_backups: u64,

    /// Days to keep rolled files (0 = no age limit).
    pub max_age_days: u64,

    /// Append the caller location to debug records.
    pub stack_on_debug: bool,

    /// Minimum severity written. When unset, `configure` keeps the level
    /// currently in effect (see `set_level`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,

    /// Value of the `logger` key.
    pub name: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            encode_json: false,
            file_logging: false,
            directory: ".".to_string(),
            filename: "app.log".to_string(),
            max_size_mb: 100,
            max_backups: 0,
            max_age_days: 0,
            stack_on_debug: false,
            level: None,
            name: None,
        }
    }
}

impl LoggerConfig {
    /// Full path of the active log file.
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.directory).join(&self.filename)
    }

    pub fn rolling_policy(&self) -> RollingPolicy {
        RollingPolicy {
            max_size_mb: self.max_size_mb,
            max_backups: self.max_backups,
            max_age_days: self.max_age_days,
        }
    }
}
