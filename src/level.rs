//! Severity levels and the threshold policy.
//!
//! # Design Decisions
//! - Ordering follows declaration order: debug < info < warn < error < panic < fatal
//! - Only debug/info/warn/error may be used as a minimum threshold
//! - Names are case-sensitive

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Severity of a single log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Level {
    /// Parse a level name usable as the minimum threshold.
    ///
    /// `panic` and `fatal` are call severities only and are rejected here.
    pub fn parse_threshold(name: &str) -> Result<Self, LogError> {
        match name {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            other => Err(LogError::InvalidLevel(other.to_string())),
        }
    }

    /// Lowercase name, as written to the `level` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }

    /// Map a `tracing` level onto a severity. Trace collapses into debug.
    pub fn from_tracing(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Level {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        Level::parse_threshold(&value)
    }
}

impl From<Level> for &'static str {
    fn from(level: Level) -> Self {
        level.as_str()
    }
}
