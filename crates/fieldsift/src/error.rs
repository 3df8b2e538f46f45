//! Error types for the fieldsift crate.
//!
//! Errors are split by who caused them: [`ConfigError`] is a mistake in the
//! model declaration, [`UsageError`] is a bad option on the command line,
//! [`ReadError`] comes from the reader, and [`SearchError`] wraps everything a
//! search run can fail with.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::op::Op;

/// Errors raised while converting a raw option value for a field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Value is not a number and not one of the field's specials.
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    /// Invalid regular expression pattern.
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Ordering operator used with a special value.
    #[error("operator '{op}' cannot be used with '{value}'")]
    InvalidOperator { op: Op, value: String },

    /// Value does not complete to any choice.
    #[error("'{value}' is not a valid choice. Valid choices are: {choices}")]
    InvalidChoice { value: String, choices: String },

    /// Value is a prefix of more than one choice.
    #[error("'{value}' is ambiguous. Valid choices are: {choices}")]
    AmbiguousChoice { value: String, choices: String },
}

/// Mistakes in a model declaration, detected when the model is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A model needs at least one field.
    #[error("model has no fields")]
    NoFields,

    /// Two fields were declared with the same name.
    #[error("field '{0}' is declared twice")]
    DuplicateField(String),

    /// Two options synthesized for the model share a name.
    #[error("option '--{option}' is claimed by both {first} and {second}")]
    OptionConflict {
        option: String,
        first: String,
        second: String,
    },

    /// More than one field claims bare positional arguments.
    #[error("fields '{first}' and '{second}' both redirect positional arguments")]
    MultipleRedirects { first: String, second: String },

    /// An implied option string could not be tokenized.
    #[error("implied filters of field '{field}' are malformed: {reason}")]
    MalformedImplied { field: String, reason: String },

    /// An implied option string names an option no field defines.
    #[error("implied filters of field '{field}' use unknown option '{option}'")]
    UnknownImpliedOption { field: String, option: String },

    /// An implied value option is missing its value.
    #[error("implied option '{option}' of field '{field}' needs a value")]
    ImpliedMissingValue { field: String, option: String },

    /// An implied value does not parse for its target field.
    #[error("implied option '{option}' of field '{field}' has a bad value: {source}")]
    ImpliedValue {
        field: String,
        option: String,
        #[source]
        source: FieldError,
    },

    /// A field implies filters on itself.
    #[error("field '{0}' implies a filter on itself")]
    SelfImplied(String),
}

/// A bad value given for an option on the command line.
#[derive(Debug, Error)]
#[error("Invalid value for '{option}': {source}")]
pub struct UsageError {
    /// The option as the user spelled it, e.g. `--age`.
    pub option: String,
    /// The offending raw value.
    pub value: String,
    /// Why the value was rejected.
    #[source]
    pub source: FieldError,
}

impl UsageError {
    /// Creates a usage error for `option`.
    pub fn new(option: impl Into<String>, value: impl Into<String>, source: FieldError) -> Self {
        Self {
            option: option.into(),
            value: value.into(),
            source,
        }
    }
}

/// Errors raised by readers.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file cannot be read.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Input path is a directory.
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Other I/O failure on an input file.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not valid JSON.
    #[error("{}:{line}: {source}", .path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Reader-specific failure.
    #[error("{0}")]
    Other(String),
}

impl ReadError {
    /// Classifies an I/O error on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => ReadError::NotFound(path),
            io::ErrorKind::PermissionDenied => ReadError::PermissionDenied(path),
            io::ErrorKind::IsADirectory => ReadError::NotAFile(path),
            _ => ReadError::Io { path, source },
        }
    }
}

/// Errors that can occur during a search run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A command-line value was rejected.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The reader failed.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A value cannot be ordered by its field.
    #[error("cannot sort by {field}: '{value}' is not a valid value")]
    Unsortable { field: String, value: String },

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_names_option_and_value() {
        let err = UsageError::new("--age", "X", FieldError::InvalidNumber("X".into()));
        let message = err.to_string();
        assert!(message.contains("--age"));
        assert!(message.contains("'X'"));
        assert!(message.starts_with("Invalid value"));
    }

    #[test]
    fn io_errors_are_classified() {
        let err = ReadError::from_io("a.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ReadError::NotFound(_)));
        assert_eq!(err.to_string(), "File not found: a.json");

        let err = ReadError::from_io("b.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "Permission denied: b.json");
    }
}
