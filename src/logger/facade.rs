//! Leveled logging calls against the process logger.
//!
//! Every function loads the current process logger, so call sites need no
//! wiring. Use the `field` constructors for attributes:
//!
//! ```no_run
//! use logkit::field;
//! logkit::info("Importing new file", &[field::string("source", "a.csv"), field::int("size", 1024)]);
//! ```
//!
//! Fields are written as JSON in the file and as a trailing JSON object on
//! the console.

use std::fmt;

use crate::field::{self, CallSite, Field};
use crate::level::Level;
use crate::logger::state;

/// Handle returned by [`crate::init`]. Writes through the process logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Log;

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    debug_at(CallSite::here(), msg, fields);
}

pub fn info(msg: &str, fields: &[Field]) {
    state::current().log(Level::Info, msg, fields);
}

pub fn warn(msg: &str, fields: &[Field]) {
    state::current().log(Level::Warn, msg, fields);
}

pub fn error(msg: &str, fields: &[Field]) {
    state::current().log(Level::Error, msg, fields);
}

/// Write a panic record, then panic with `msg`.
///
/// The panic unwinds the current thread and can be caught with
/// `std::panic::catch_unwind`.
#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    state::current().log(Level::Panic, msg, fields);
    panic!("{msg}");
}

/// Write a fatal record, flush, then exit the process with status 1.
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    let logger = state::current();
    logger.log(Level::Fatal, msg, fields);
    logger.sync();
    std::process::exit(1);
}

/// Debug record attributed to `site`.
///
/// When stack capture is enabled a `stacktrace` field naming `site` is
/// appended after the caller's fields.
pub fn debug_at(site: CallSite, msg: &str, fields: &[Field]) {
    let logger = state::current();
    if !logger.enabled(Level::Debug) {
        return;
    }
    if logger.stack_on_debug() {
        let mut with_stack = Vec::with_capacity(fields.len() + 1);
        with_stack.extend_from_slice(fields);
        with_stack.push(field::caller(Some(site)));
        logger.log(Level::Debug, msg, &with_stack);
    } else {
        logger.log(Level::Debug, msg, fields);
    }
}

#[track_caller]
pub fn debug_fmt(args: fmt::Arguments<'_>) {
    debug_fmt_at(CallSite::here(), args);
}

pub fn debug_fmt_at(site: CallSite, args: fmt::Arguments<'_>) {
    if state::current().enabled(Level::Debug) {
        debug_at(site, &args.to_string(), &[]);
    }
}

pub fn info_fmt(args: fmt::Arguments<'_>) {
    log_fmt(Level::Info, args);
}

pub fn warn_fmt(args: fmt::Arguments<'_>) {
    log_fmt(Level::Warn, args);
}

pub fn error_fmt(args: fmt::Arguments<'_>) {
    log_fmt(Level::Error, args);
}

#[track_caller]
pub fn panic_fmt(args: fmt::Arguments<'_>) -> ! {
    panic(&args.to_string(), &[])
}

pub fn fatal_fmt(args: fmt::Arguments<'_>) -> ! {
    fatal(&args.to_string(), &[])
}

fn log_fmt(level: Level, args: fmt::Arguments<'_>) {
    let logger = state::current();
    if logger.enabled(level) {
        logger.log(level, &args.to_string(), &[]);
    }
}

/// Flush the process logger's sinks.
pub fn sync() {
    state::current().sync();
}

impl Log {
    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        debug(msg, fields);
    }

    pub fn info(&self, msg: &str, fields: &[Field]) {
        info(msg, fields);
    }

    pub fn warn(&self, msg: &str, fields: &[Field]) {
        warn(msg, fields);
    }

    pub fn error(&self, msg: &str, fields: &[Field]) {
        error(msg, fields);
    }

    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        panic(msg, fields)
    }

    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        fatal(msg, fields)
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        debug_fmt(args);
    }

    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        info_fmt(args);
    }

    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        warn_fmt(args);
    }

    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        error_fmt(args);
    }

    #[track_caller]
    pub fn panic_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        panic_fmt(args)
    }

    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        fatal_fmt(args)
    }

    pub fn sync(&self) {
        sync();
    }
}

/// Formatted debug record; the call site includes the enclosing function.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::logger::facade::debug_fmt_at(
            $crate::call_site!(),
            ::std::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::logger::facade::info_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::logger::facade::warn_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::logger::facade::error_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::logger::facade::panic_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::logger::facade::fatal_fmt(::std::format_args!($($arg)+))
    };
}
