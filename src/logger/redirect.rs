//! Routes ambient `tracing` events and `log` records into the process logger.
//!
//! Libraries in the process log through `tracing` or the `log` facade; once
//! [`install`] runs, their records are encoded and written like any facade
//! call. The target becomes the `logger` key and trace counts as debug.
//! `log` records arrive through `tracing-log`, whose `log.*` bookkeeping
//! fields are dropped.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::field::{self, Field, FieldValue};
use crate::level::Level;
use crate::logger::instance::Logger;
use crate::logger::state;

static INSTALL: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install a global `tracing` subscriber that forwards to the process
/// logger, and bridge the `log` facade into it.
///
/// Runs once per process. If the host already set a global subscriber or
/// `log` logger nothing is replaced and [`is_installed`] reports false.
pub fn install() {
    INSTALL.call_once(|| {
        let installed = tracing_subscriber::registry()
            .with(RedirectLayer::new())
            .try_init()
            .is_ok();
        INSTALLED.store(installed, Ordering::Release);
    });
}

/// Whether ambient `tracing` events are being redirected.
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

enum Target {
    Process,
    Fixed(Arc<Logger>),
}

/// A `tracing_subscriber` layer that writes events through a [`Logger`].
pub struct RedirectLayer {
    target: Target,
}

impl RedirectLayer {
    /// Forward to whatever logger is currently published.
    pub fn new() -> Self {
        Self {
            target: Target::Process,
        }
    }

    /// Forward to a specific logger.
    pub fn to_logger(logger: Logger) -> Self {
        Self {
            target: Target::Fixed(Arc::new(logger)),
        }
    }
}

impl Default for RedirectLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Subscriber> Layer<S> for RedirectLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let logger = match &self.target {
            Target::Process => state::current(),
            Target::Fixed(logger) => Arc::clone(logger),
        };
        let meta = event.metadata();
        let level = Level::from_tracing(*meta.level());
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        logger.emit(level, Some(meta.target()), &visitor.message, &visitor.fields);
    }
}

const LOG_FIELD_PREFIX: &str = "log.";

/// Collects the `message` field and turns the rest into typed fields.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<Field>,
}

impl EventVisitor {
    fn push(&mut self, field: Field) {
        if !field.key().starts_with(LOG_FIELD_PREFIX) {
            self.fields.push(field);
        }
    }
}

impl Visit for EventVisitor {
    fn record_f64(&mut self, f: &TracingField, value: f64) {
        self.push(field::float(f.name(), value));
    }

    fn record_i64(&mut self, f: &TracingField, value: i64) {
        self.push(field::int64(f.name(), value));
    }

    fn record_u64(&mut self, f: &TracingField, value: u64) {
        match i64::try_from(value) {
            Ok(v) => self.push(field::int64(f.name(), v)),
            Err(_) => self.push(field::string(f.name(), value.to_string())),
        }
    }

    fn record_bool(&mut self, f: &TracingField, value: bool) {
        self.push(field::bool(f.name(), value));
    }

    fn record_str(&mut self, f: &TracingField, value: &str) {
        if f.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push(field::string(f.name(), value.to_string()));
        }
    }

    fn record_error(&mut self, f: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(Field::new(f.name(), FieldValue::Error(value.to_string())));
    }

    fn record_debug(&mut self, f: &TracingField, value: &dyn fmt::Debug) {
        if f.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push(field::string(f.name(), format!("{value:?}")));
        }
    }
}
