//! Output destinations for encoded records.
//!
//! # Data Flow
//! ```text
//! Logger (encoded line)
//!     → MultiSink
//!         → StdoutSink (always)
//!         → RollingFileSink (file logging enabled, directory usable)
//!         → DiscardSink   (file logging enabled, directory unusable)
//! ```
//!
//! # Design Decisions
//! - A sink receives whole lines; partial writes never interleave
//! - Errors are returned to the logger, which counts and reports them
//! - Sinks are shared via Arc between logger instances

pub mod rolling;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

pub use rolling::{RollingFile, RollingPolicy};

/// A destination for encoded records.
pub trait RecordSink: Send + Sync {
    /// Write one complete, encoded record.
    fn write_record(&self, line: &[u8]) -> io::Result<()>;

    /// Flush buffered output.
    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Process standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl RecordSink for StdoutSink {
    fn write_record(&self, line: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(line)
    }

    fn sync(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl RecordSink for DiscardSink {
    fn write_record(&self, _line: &[u8]) -> io::Result<()> {
        Ok(())
    }
}

/// A size-rotated file shared between threads.
///
/// Writes are serialized by the mutex, so records never interleave.
pub struct RollingFileSink {
    file: Mutex<RollingFile>,
}

impl RollingFileSink {
    pub fn new(file: RollingFile) -> Self {
        Self {
            file: Mutex::new(file),
        }
    }
}

impl RecordSink for RollingFileSink {
    fn write_record(&self, line: &[u8]) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(line)
    }

    fn sync(&self) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()
    }
}

/// Fans a record out to several sinks.
///
/// Every sink is attempted; the first error is returned.
#[derive(Clone, Default)]
pub struct MultiSink {
    sinks: Vec<Arc<dyn RecordSink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Arc<dyn RecordSink>>) -> Self {
        Self { sinks }
    }
}

impl RecordSink for MultiSink {
    fn write_record(&self, line: &[u8]) -> io::Result<()> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.write_record(line) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn sync(&self) -> io::Result<()> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.sync() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// In-memory sink, handy as a stand-in for stdout.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Written lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl RecordSink for MemorySink {
    fn write_record(&self, line: &[u8]) -> io::Result<()> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(line);
        Ok(())
    }
}
