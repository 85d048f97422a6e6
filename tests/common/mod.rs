//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logkit::sink::MemorySink;
use logkit::LoggerConfig;
use serde_json::Value;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the process logger.
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Configure the process logger with an in-memory console in place of stdout.
#[allow(dead_code)]
pub fn capture(config: LoggerConfig) -> MemorySink {
    let out = MemorySink::new();
    logkit::configure_with_console(config, Arc::new(out.clone()));
    out
}

/// JSON console config at the given level.
#[allow(dead_code)]
pub fn json_config(level: logkit::Level) -> LoggerConfig {
    LoggerConfig {
        encode_json: true,
        level: Some(level),
        ..LoggerConfig::default()
    }
}

/// Parse every captured line as JSON.
#[allow(dead_code)]
pub fn json_lines(out: &MemorySink) -> Vec<Value> {
    out.lines()
        .iter()
        .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("invalid JSON line {l:?}: {e}")))
        .collect()
}

/// Contents of every file in `dir`, in name order.
#[allow(dead_code)]
pub fn read_dir_lines(dir: &std::path::Path) -> Vec<String> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    paths
        .iter()
        .flat_map(|p| {
            std::fs::read_to_string(p)
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}
