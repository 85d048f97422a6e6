//! Typed key/value attributes attached to a single record.
//!
//! ```
//! use logkit::field;
//! let fields = [field::string("source", "import.csv"), field::int("size", 1024)];
//! assert_eq!(fields[1].key(), "size");
//! ```

use std::borrow::Cow;
use std::panic::Location;
use std::time::Duration;

/// Key written by [`err`].
pub const ERROR_KEY: &str = "error";

/// Key used for the caller location appended to debug records.
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Int64(i64),
    Float(f64),
    Str(Cow<'static, str>),
    Duration(Duration),
    Error(String),
    Caller(String),
}

/// One key/value pair. No validation is applied to the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Field {
    Field::new(key, FieldValue::Bool(value))
}

/// Platform-sized integer field.
pub fn int(key: impl Into<Cow<'static, str>>, value: isize) -> Field {
    Field::new(key, FieldValue::Int(value as i64))
}

pub fn int64(key: impl Into<Cow<'static, str>>, value: i64) -> Field {
    Field::new(key, FieldValue::Int64(value))
}

pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Field {
    Field::new(key, FieldValue::Float(value))
}

pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Field {
    Field::new(key, FieldValue::Str(value.into()))
}

/// Duration field, encoded as integer nanoseconds.
pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Field {
    Field::new(key, FieldValue::Duration(value))
}

/// Error field under the `error` key, rendered with `Display`.
pub fn err(error: &dyn std::error::Error) -> Field {
    Field::new(ERROR_KEY, FieldValue::Error(error.to_string()))
}

/// Source position of a logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    /// Path of the enclosing function, e.g. `app::db::connect`.
    pub function: Option<&'static str>,
}

impl CallSite {
    /// The position of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
            function: None,
        }
    }
}

/// Caller location field under the `stacktrace` key.
///
/// Renders `file:function:line` when the enclosing function is known,
/// `file:line` otherwise, and an empty string when no location is available.
pub fn caller(site: Option<CallSite>) -> Field {
    let src = match site {
        Some(CallSite { file, line, function: Some(function) }) => {
            format!("{file}:{function}:{line}")
        }
        Some(CallSite { file, line, function: None }) => format!("{file}:{line}"),
        None => String::new(),
    };
    Field::new(STACKTRACE_KEY, FieldValue::Caller(src))
}

/// The [`CallSite`] of the macro invocation, enclosing function included.
///
/// ```
/// # fn main() {
/// let site = logkit::call_site!();
/// assert!(site.function.unwrap().ends_with("main"));
/// # }
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::field::CallSite {
            file: ::std::file!(),
            line: ::std::line!(),
            function: {
                fn __logkit_here() {}
                let path = ::std::any::type_name_of_val(&__logkit_here);
                ::std::option::Option::Some(
                    path.strip_suffix("::__logkit_here").unwrap_or(path),
                )
            },
        }
    };
}
