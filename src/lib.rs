//! Process-wide structured logging.
//!
//! Leveled records (debug/info/warn/error/panic/fatal) with typed fields,
//! encoded as JSON lines or console text, written to stdout and optionally
//! to a size-rotated file.
//!
//! ```no_run
//! use logkit::field;
//!
//! let log = logkit::init("/var/log/svc/svc.log", "info", 20, 3, false)?;
//! log.info("started", &[field::int("port", 8080)]);
//! logkit::infof!("listening on {}", 8080);
//! # Ok::<(), logkit::LogError>(())
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod observability;
pub mod sink;

pub use config::LoggerConfig;
pub use error::{LogError, LogResult};
pub use field::Field;
pub use level::Level;
pub use logger::{
    configure, configure_with_console, current, debug, error, fatal, info, init, install,
    panic, set_level, sync, warn, Log, Logger,
};
pub use logger::{debug_fmt, error_fmt, fatal_fmt, info_fmt, panic_fmt, warn_fmt};
