//! Logging counters.
//!
//! # Metrics
//! - `logkit_records_total` (counter): records written, by level
//! - `logkit_write_errors_total` (counter): records a sink failed to write
//! - `logkit_pruned_files_total` (counter): rolled files deleted for age
//! - `logkit_file_failures_total` (counter): log files that could not be opened

use metrics::{counter, describe_counter};
use std::sync::Once;

use crate::level::Level;

static DESCRIBE: Once = Once::new();

/// Register metric descriptions with the installed recorder.
pub fn describe() {
    DESCRIBE.call_once(|| {
        describe_counter!("logkit_records_total", "Log records written, by level");
        describe_counter!("logkit_write_errors_total", "Log records a sink failed to write");
        describe_counter!("logkit_pruned_files_total", "Rolled log files deleted for age");
        describe_counter!(
            "logkit_file_failures_total",
            "Log files that could not be opened, directory creation included"
        );
    });
}

/// Record one emitted record.
pub fn record_emitted(level: Level) {
    counter!("logkit_records_total", "level" => level.as_str()).increment(1);
}

/// Record a failed sink write.
pub fn record_write_error() {
    counter!("logkit_write_errors_total").increment(1);
}

/// Record rolled files removed by the age sweep.
pub fn record_pruned(count: u64) {
    counter!("logkit_pruned_files_total").increment(count);
}

/// Record a log directory or file that could not be opened.
pub fn record_file_failure() {
    counter!("logkit_file_failures_total").increment(1);
}
