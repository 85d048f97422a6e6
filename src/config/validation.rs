//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, including level names)
//! - Check the file target is usable when file logging is enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Directory existence is not checked; configure creates it on demand

use std::fmt;

use crate::config::schema::LoggerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyFilename,
    FilenameHasSeparator(String),
    EmptyDirectory,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyFilename => write!(f, "filename must not be empty when file logging is enabled"),
            ValidationError::FilenameHasSeparator(name) => {
                write!(f, "filename {:?} must not contain a path separator", name)
            }
            ValidationError::EmptyDirectory => write!(f, "directory must not be empty when file logging is enabled"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.file_logging {
        if config.filename.is_empty() {
            errors.push(ValidationError::EmptyFilename);
        } else if config.filename.contains(['/', '\\']) {
            errors.push(ValidationError::FilenameHasSeparator(config.filename.clone()));
        }
        if config.directory.is_empty() {
            errors.push(ValidationError::EmptyDirectory);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
