//! Process-wide logger and configuration.
//!
//! # Data Flow
//! ```text
//! init / configure / set_level
//!     → Logger::build (or Logger::with_level)
//!     → atomic swap of Arc<Logger> and Arc<LoggerConfig>
//!     → facade calls load the current Arc<Logger>
//! ```
//!
//! # Design Decisions
//! - A safe default (console text on stdout, info) exists before any call
//! - Config and logger are published together as one snapshot, so readers
//!   never see a level in one that disagrees with the other
//! - Writers (configure, set_level, install) are serialized by a mutex;
//!   readers only load the snapshot pointer

use std::path::{is_separator, Path};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;

use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::level::Level;
use crate::logger::instance::Logger;
use crate::logger::facade::Log;
use crate::logger::redirect;
use crate::sink::{RecordSink, StdoutSink};

struct Published {
    config: Arc<LoggerConfig>,
    logger: Arc<Logger>,
}

struct State {
    published: ArcSwap<Published>,
    writer: Mutex<()>,
}

impl State {
    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, config: LoggerConfig, logger: Logger) {
        self.published.store(Arc::new(Published {
            config: Arc::new(config),
            logger: Arc::new(logger),
        }));
    }
}

static STATE: LazyLock<State> = LazyLock::new(|| {
    let logger = Logger::default();
    let config = LoggerConfig {
        level: Some(logger.level()),
        ..LoggerConfig::default()
    };
    State {
        published: ArcSwap::from_pointee(Published {
            config: Arc::new(config),
            logger: Arc::new(logger),
        }),
        writer: Mutex::new(()),
    }
});

/// The logger every facade call writes through.
pub fn current() -> Arc<Logger> {
    Arc::clone(&STATE.published.load().logger)
}

/// The most recently applied configuration.
///
/// Its `level` is always set and matches [`current`].
pub fn config() -> Arc<LoggerConfig> {
    Arc::clone(&STATE.published.load().config)
}

/// Publish a prebuilt logger as the process logger.
///
/// The stored configuration keeps its other settings and takes the
/// logger's level.
pub fn install(logger: Logger) {
    let _writer = STATE.lock_writer();
    let config = LoggerConfig {
        level: Some(logger.level()),
        ..LoggerConfig::clone(&config())
    };
    STATE.publish(config, logger);
}

/// Build a logger writing to stdout (plus the rolling file, if enabled)
/// and publish it together with `config`.
///
/// Without an explicit `config.level` the logger is built at the level
/// currently in effect. Also routes ambient `tracing` and `log` records
/// into the process logger. File failures are not returned; see
/// [`Logger::build`].
pub fn configure(config: LoggerConfig) {
    configure_with_console(config, Arc::new(StdoutSink));
}

/// [`configure`] with a caller-supplied console sink in place of stdout.
pub fn configure_with_console(config: LoggerConfig, console: Arc<dyn RecordSink>) {
    {
        let _writer = STATE.lock_writer();
        let level = config.level.unwrap_or_else(|| current().level());
        let config = LoggerConfig {
            level: Some(level),
            ..config
        };
        let logger = Logger::build(&config, console);
        STATE.publish(config, logger);
    }
    redirect::install();
}

/// Set the minimum level by name (`debug`, `info`, `warn` or `error`).
///
/// Takes effect immediately by republishing the current logger at the new
/// level. Unknown names leave everything unchanged.
pub fn set_level(name: &str) -> LogResult<()> {
    let level = Level::parse_threshold(name)?;
    let _writer = STATE.lock_writer();
    let published = STATE.published.load_full();
    let config = LoggerConfig {
        level: Some(level),
        ..LoggerConfig::clone(&published.config)
    };
    STATE.publish(config, published.logger.with_level(level));
    Ok(())
}

/// Configure JSON logging to `file` with size-based rotation.
///
/// An empty `level` means `error`. The directory part of `file` defaults to
/// the current directory.
pub fn init(
    file: &str,
    level: &str,
    max_size_mb: i64,
    max_backups: i64,
    stack_on_debug: bool,
) -> LogResult<Log> {
    let (directory, filename) = split_file_path(file)?;
    if max_size_mb < 0 || max_backups < 0 {
        return Err(LogError::BadSizeOrBackup {
            max_size_mb,
            max_backups,
        });
    }

    set_level(if level.is_empty() { "error" } else { level })?;

    let config = LoggerConfig {
        encode_json: true,
        file_logging: true,
        directory,
        filename,
        max_size_mb: max_size_mb as u64,
        max_backups: max_backups as u64,
        max_age_days: 0,
        stack_on_debug,
        level: None,
        name: None,
    };
    configure(config);

    Ok(Log)
}

/// Split a log path into (directory, filename).
fn split_file_path(file: &str) -> LogResult<(String, String)> {
    let bad_file = || LogError::BadFile(file.to_string());
    if file.ends_with(is_separator) {
        return Err(bad_file());
    }

    let path = Path::new(file);
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(bad_file)?;
    let directory = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    };
    Ok((directory, filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_path() {
        assert_eq!(
            split_file_path("/tmp/app.log").unwrap(),
            ("/tmp".to_string(), "app.log".to_string())
        );
        assert_eq!(
            split_file_path("app.log").unwrap(),
            (".".to_string(), "app.log".to_string())
        );
        assert_eq!(
            split_file_path("logs/nested/app.log").unwrap(),
            ("logs/nested".to_string(), "app.log".to_string())
        );
    }

    #[test]
    fn test_split_file_path_rejects_missing_name() {
        for path in ["", "/", "/tmp/", ".", ".."] {
            match split_file_path(path) {
                Err(LogError::BadFile(p)) => assert_eq!(p, path),
                other => panic!("expected BadFile for {path:?}, got {other:?}"),
            }
        }
    }
}
