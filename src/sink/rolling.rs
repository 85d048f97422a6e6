//! Size-rotated log file.
//!
//! # Responsibilities
//! - Append to `<directory>/<filename>` through a `logroller` writer
//! - Rotate by size and keep at most `max_backups` rolled files (logroller)
//! - Delete rolled files older than `max_age_days` (directory sweep)
//!
//! # Design Decisions
//! - `max_size_mb == 0` means 100 MB; zero backups or zero days disable
//!   that retention rule
//! - The age sweep runs after the first write and again every `max_bytes`
//!   written, so it follows rotations without hooking into them
//! - Age is judged by modification time, since a rolled file is never
//!   written again

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use logroller::{LogRoller, LogRollerBuilder, Rotation, RotationSize};

use crate::observability::metrics;

const MEGABYTE: u64 = 1024 * 1024;
const DEFAULT_MAX_SIZE_MB: u64 = 100;

/// Rotation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollingPolicy {
    pub max_size_mb: u64,
    pub max_backups: u64,
    pub max_age_days: u64,
}

impl RollingPolicy {
    /// Effective size limit in megabytes.
    pub fn size_mb(&self) -> u64 {
        if self.max_size_mb == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size_mb
        }
    }

    /// Effective size limit in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.size_mb().saturating_mul(MEGABYTE)
    }
}

/// Append-only writer that rolls `<directory>/<filename>` by size.
pub struct RollingFile {
    directory: PathBuf,
    filename: String,
    policy: RollingPolicy,
    roller: LogRoller,
    since_sweep: u64,
    swept: bool,
}

impl RollingFile {
    /// Open (or create) the active file. `directory` must already exist.
    pub fn open(directory: &str, filename: &str, policy: RollingPolicy) -> io::Result<Self> {
        let mut builder = LogRollerBuilder::new(directory, filename)
            .rotation(Rotation::SizeBased(RotationSize::MB(policy.size_mb())));
        if policy.max_backups > 0 {
            builder = builder.max_keep_files(policy.max_backups);
        }
        let roller = builder
            .build()
            .map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self {
            directory: PathBuf::from(directory),
            filename: filename.to_string(),
            policy,
            roller,
            since_sweep: 0,
            swept: false,
        })
    }

    /// Path of the active file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Delete rolled files last modified more than `max_age_days` ago.
    ///
    /// Rolled files are the ones named `<stem>.*` next to the active file.
    /// Returns how many were removed.
    pub fn prune_expired(&self) -> io::Result<usize> {
        if self.policy.max_age_days == 0 {
            return Ok(0);
        }
        let days = self.policy.max_age_days.min(36_500) as i64;
        let cutoff = Utc::now() - ChronoDuration::days(days);

        let stem = Path::new(&self.filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = format!("{stem}.");

        let mut removed = 0;
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.filename || !name.starts_with(&prefix) {
                continue;
            }
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let modified: DateTime<Utc> = meta.modified()?.into();
            if modified < cutoff && fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }

        if removed > 0 {
            metrics::record_pruned(removed as u64);
        }
        Ok(removed)
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.roller.write(buf)?;
        self.since_sweep += n as u64;

        if !self.swept || self.since_sweep >= self.policy.max_bytes() {
            self.swept = true;
            self.since_sweep = 0;
            // Best effort; retried after the next max_bytes.
            let _ = self.prune_expired();
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.roller.flush()
    }
}
