//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Logger emission   → metrics::record_emitted (per level)
//! Sink write error  → metrics::record_write_error
//! Age sweep         → metrics::record_pruned
//! File open failure → metrics::record_file_failure
//!
//! Consumers:
//!     → whatever `metrics` recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - No exporter is installed here; without a recorder every call is a no-op
//! - Counters only, updated on the emitting thread

pub mod metrics;
