//! Logger subsystem.
//!
//! # Data Flow
//! ```text
//! init(file, level, size, backups, stack)
//!     → set_level → configure
//! configure(LoggerConfig)
//!     → instance.rs (Logger::build: encoder + stdout/file sink + level)
//!     → state.rs (atomic swap of the process logger)
//!     → redirect.rs (ambient tracing events → process logger)
//!
//! Call sites:
//!     facade.rs (debug/info/warn/error/panic/fatal)
//!     → current Logger → encoder → sinks
//! ```
//!
//! # Design Decisions
//! - One process logger, replaced wholesale, never mutated in place
//! - Debug records carry the caller location when stack capture is on
//! - Panic unwinds the calling thread; fatal exits the process

pub mod instance;
pub mod facade;
pub mod redirect;
pub mod state;

pub use self::instance::Logger;
pub use facade::*;
pub use redirect::RedirectLayer;
pub use state::{config, configure, configure_with_console, current, init, install, set_level};
