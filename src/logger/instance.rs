//! The logger instance.
//!
//! # Responsibilities
//! - Bind an encoder, a sink and a minimum level together
//! - Build the sink from a configuration (stdout plus optional rolling file)
//! - Encode and write records that pass the level check
//!
//! # Design Decisions
//! - Immutable once built; a level change produces a new instance
//! - Sinks are shared via Arc, so derived instances write to the same file
//! - Panic and fatal records are never filtered

use std::fmt;
use std::fs;
use std::sync::Arc;

use chrono::Utc;

use crate::config::LoggerConfig;
use crate::encoder::{Encoder, Record};
use crate::error::LogError;
use crate::field::{self, Field};
use crate::level::Level;
use crate::observability::metrics;
use crate::sink::{DiscardSink, MultiSink, RecordSink, RollingFile, RollingFileSink, StdoutSink};

/// An encoder, a sink and a level filter.
#[derive(Clone)]
pub struct Logger {
    encoder: Encoder,
    sink: Arc<dyn RecordSink>,
    level: Level,
    name: Option<Arc<str>>,
    stack_on_debug: bool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("encoder", &self.encoder)
            .field("level", &self.level)
            .field("name", &self.name)
            .field("stack_on_debug", &self.stack_on_debug)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    /// Console text on stdout at info level, usable before any configuration.
    fn default() -> Self {
        Self::new(Encoder::Console, Arc::new(StdoutSink), Level::Info)
    }
}

impl Logger {
    pub fn new(encoder: Encoder, sink: Arc<dyn RecordSink>, level: Level) -> Self {
        Self {
            encoder,
            sink,
            level,
            name: None,
            stack_on_debug: false,
        }
    }

    /// Build a logger from a configuration.
    ///
    /// `console` receives every record; production callers pass
    /// [`StdoutSink`]. When file logging is enabled the log directory is
    /// created and the file opened first. If either fails the file half
    /// degrades to a [`DiscardSink`], the failure is written to stderr, and
    /// a warning is emitted through the new logger. A config without a level
    /// builds at `info`.
    pub fn build(config: &LoggerConfig, console: Arc<dyn RecordSink>) -> Self {
        let mut sinks = vec![console];
        let mut file_failure = None;

        if config.file_logging {
            match open_file(config) {
                Ok(file) => sinks.push(Arc::new(RollingFileSink::new(file))),
                Err(err) => {
                    eprintln!("{err}");
                    metrics::record_file_failure();
                    sinks.push(Arc::new(DiscardSink));
                    file_failure = Some(err);
                }
            }
        }

        let logger = Self {
            encoder: Encoder::select(config.encode_json),
            sink: Arc::new(MultiSink::new(sinks)),
            level: config.level.unwrap_or_default(),
            name: config.name.as_deref().map(Arc::from),
            stack_on_debug: config.stack_on_debug,
        };

        if let Some(err) = file_failure {
            logger.log(
                Level::Warn,
                "file logging disabled: log file unavailable",
                &[
                    field::string("directory", config.directory.clone()),
                    field::err(&err),
                ],
            );
        }
        logger
    }

    /// A copy of this logger with a different minimum level.
    pub fn with_level(&self, level: Level) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// A copy of this logger writing `name` under the `logger` key.
    pub fn named(&self, name: &str) -> Self {
        Self {
            name: Some(Arc::from(name)),
            ..self.clone()
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn encoder(&self) -> Encoder {
        self.encoder
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn stack_on_debug(&self) -> bool {
        self.stack_on_debug
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level >= Level::Panic || level >= self.level
    }

    /// Write one record if `level` passes the filter.
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        self.emit(level, None, message, fields);
    }

    /// Like [`Logger::log`], overriding the `logger` key for this record.
    pub(crate) fn emit(&self, level: Level, name: Option<&str>, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        let record = Record {
            timestamp_ms: Utc::now().timestamp_millis(),
            level,
            logger: name.or(self.name.as_deref()),
            message,
            fields,
        };
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(&record, &mut buf);

        metrics::record_emitted(level);
        if let Err(e) = self.sink.write_record(&buf) {
            metrics::record_write_error();
            eprintln!("{} write error: {}", Utc::now().to_rfc3339(), e);
        }
        if level >= Level::Panic {
            self.sync();
        }
    }

    /// Flush every sink. Errors go to stderr.
    pub fn sync(&self) {
        if let Err(e) = self.sink.sync() {
            eprintln!("{} sync error: {}", Utc::now().to_rfc3339(), e);
        }
    }
}

fn open_file(config: &LoggerConfig) -> Result<RollingFile, LogError> {
    fs::create_dir_all(&config.directory).map_err(|source| LogError::DirectoryCreate {
        directory: config.directory.clone().into(),
        source,
    })?;
    RollingFile::open(&config.directory, &config.filename, config.rolling_policy()).map_err(
        |source| LogError::FileOpen {
            path: config.file_path(),
            source,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use serde_json::Value;

    fn json_logger(level: Level) -> (Logger, MemorySink) {
        let out = MemorySink::new();
        let logger = Logger::new(Encoder::Json, Arc::new(out.clone()), level);
        (logger, out)
    }

    #[test]
    fn test_level_filter() {
        let (logger, out) = json_logger(Level::Warn);
        logger.log(Level::Debug, "d", &[]);
        logger.log(Level::Info, "i", &[]);
        logger.log(Level::Warn, "w", &[]);
        logger.log(Level::Error, "e", &[]);

        let msgs: Vec<String> = out
            .lines()
            .iter()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["msg"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(msgs, vec!["w", "e"]);
    }

    #[test]
    fn test_panic_and_fatal_never_filtered() {
        let (logger, _) = json_logger(Level::Error);
        assert!(logger.enabled(Level::Panic));
        assert!(logger.enabled(Level::Fatal));
        assert!(logger.with_level(Level::Fatal).enabled(Level::Panic));
    }

    #[test]
    fn test_with_level_shares_sink() {
        let (logger, out) = json_logger(Level::Error);
        let debug = logger.with_level(Level::Debug);
        debug.log(Level::Debug, "shared", &[]);
        logger.log(Level::Debug, "dropped", &[]);
        assert_eq!(out.lines().len(), 1);
        assert_eq!(logger.level(), Level::Error);
    }

    #[test]
    fn test_name_and_override() {
        let (logger, out) = json_logger(Level::Info);
        let named = logger.named("db");
        named.log(Level::Info, "a", &[]);
        named.emit(Level::Info, Some("hyper"), "b", &[]);
        let lines = out.lines();
        let a: Value = serde_json::from_str(&lines[0]).unwrap();
        let b: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(a["logger"], "db");
        assert_eq!(b["logger"], "hyper");
    }

    #[test]
    fn test_build_without_file_logging() {
        let dir = tempfile::tempdir().unwrap();
        let console = MemorySink::new();
        let config = LoggerConfig {
            directory: dir.path().to_string_lossy().into_owned(),
            ..LoggerConfig::default()
        };
        let logger = Logger::build(&config, Arc::new(console.clone()));
        assert_eq!(logger.level(), Level::Info);
        logger.log(Level::Info, "hello", &[]);

        assert!(console.contents().contains("\thello"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_build_with_file_logging() {
        let dir = tempfile::tempdir().unwrap();
        let console = MemorySink::new();
        let config = LoggerConfig {
            encode_json: true,
            file_logging: true,
            directory: dir.path().join("nested").to_string_lossy().into_owned(),
            filename: "svc.log".to_string(),
            ..LoggerConfig::default()
        };
        let logger = Logger::build(&config, Arc::new(console.clone()));
        logger.log(Level::Info, "to both", &[]);
        logger.sync();

        let on_disk: String = fs::read_dir(&config.directory)
            .unwrap()
            .map(|e| fs::read_to_string(e.unwrap().path()).unwrap())
            .collect();
        assert_eq!(on_disk, console.contents());
        assert!(on_disk.contains("\"msg\":\"to both\""));
    }

    #[test]
    fn test_build_degrades_when_directory_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let console = MemorySink::new();
        let config = LoggerConfig {
            encode_json: true,
            file_logging: true,
            directory: blocker.join("logs").to_string_lossy().into_owned(),
            ..LoggerConfig::default()
        };
        let logger = Logger::build(&config, Arc::new(console.clone()));
        logger.log(Level::Info, "still works", &[]);

        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        let warning: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(warning["level"], "warn");
        assert!(warning["error"].as_str().unwrap().contains("Failed to create log directory"));
        assert!(lines[1].contains("still works"));
    }
}
