//! Record encoding (JSON lines or console text).
//!
//! # Schema
//! Both encoders share the same keys: `timestamp`, `level`, `logger`,
//! `msg`, and `stacktrace` for the caller location on debug records. Time is epoch milliseconds in both modes.
//!
//! # Design Decisions
//! - One record per line, newline terminated
//! - Fields follow the message in call order; a repeated key keeps the last value
//! - Durations are integer nanoseconds

use serde_json::{Map, Value};

use crate::field::{Field, FieldValue};
use crate::level::Level;

pub const TIME_KEY: &str = "timestamp";
pub const LEVEL_KEY: &str = "level";
pub const NAME_KEY: &str = "logger";
pub const MESSAGE_KEY: &str = "msg";
pub const STACKTRACE_KEY: &str = crate::field::STACKTRACE_KEY;

/// Everything an encoder needs for one line.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub timestamp_ms: i64,
    pub level: Level,
    pub logger: Option<&'a str>,
    pub message: &'a str,
    pub fields: &'a [Field],
}

/// Line encoder selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoder {
    Json,
    #[default]
    Console,
}

impl Encoder {
    pub fn select(encode_json: bool) -> Self {
        if encode_json {
            Encoder::Json
        } else {
            Encoder::Console
        }
    }

    /// Append one encoded, newline-terminated record to `buf`.
    pub fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) {
        match self {
            Encoder::Json => encode_json(record, buf),
            Encoder::Console => encode_console(record, buf),
        }
    }
}

fn encode_json(record: &Record<'_>, buf: &mut Vec<u8>) {
    let mut obj = Map::new();
    obj.insert(LEVEL_KEY.to_string(), Value::from(record.level.as_str()));
    obj.insert(TIME_KEY.to_string(), Value::from(record.timestamp_ms));
    if let Some(name) = record.logger {
        obj.insert(NAME_KEY.to_string(), Value::from(name));
    }
    obj.insert(MESSAGE_KEY.to_string(), Value::from(record.message));
    insert_fields(&mut obj, record.fields);

    // Serializing a Map of plain values cannot fail.
    let _ = serde_json::to_writer(&mut *buf, &Value::Object(obj));
    buf.push(b'\n');
}

fn encode_console(record: &Record<'_>, buf: &mut Vec<u8>) {
    let mut line = format!("{}\t{}", record.timestamp_ms, record.level);
    if let Some(name) = record.logger {
        line.push('\t');
        line.push_str(name);
    }
    line.push('\t');
    line.push_str(record.message);
    if !record.fields.is_empty() {
        let mut obj = Map::new();
        insert_fields(&mut obj, record.fields);
        line.push('\t');
        line.push_str(&Value::Object(obj).to_string());
    }
    line.push('\n');
    buf.extend_from_slice(line.as_bytes());
}

fn insert_fields(obj: &mut Map<String, Value>, fields: &[Field]) {
    for field in fields {
        obj.insert(field.key().to_string(), field_to_json(field.value()));
    }
}

fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(b) => Value::from(*b),
        FieldValue::Int(i) | FieldValue::Int64(i) => Value::from(*i),
        FieldValue::Float(f) => Value::from(*f),
        FieldValue::Str(s) => Value::from(s.as_ref()),
        FieldValue::Duration(d) => Value::from(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
        FieldValue::Error(e) | FieldValue::Caller(e) => Value::from(e.as_str()),
    }
}
