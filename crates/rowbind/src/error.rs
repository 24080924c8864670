//! Error types for the rowbind library.

use thiserror::Error;

use crate::schema::FieldType;

/// Main error type for decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A header column has no matching schema field.
    #[error("unknown field: '{label}'")]
    UnknownField { label: String },

    /// A cell could not be coerced to the type of its field.
    #[error("field '{field}' type conversion to {field_type} failed for value '{raw_value}': {cause}")]
    Conversion {
        field: String,
        field_type: FieldType,
        raw_value: String,
        #[source]
        cause: CoercionError,
    },

    /// The schema declares a type with neither a built-in nor a custom converter.
    #[error("no conversion registered for type {field_type} (field '{field}')")]
    UnsupportedType { field: String, field_type: FieldType },

    /// A data row does not have the number of fields the reader was told to expect.
    #[error("row {row} has {found} fields, expected {expected}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Invalid delimiter, quote or comment character.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration document.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Why a single string could not be turned into a typed value.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// The cell was empty and the target type has no empty form.
    #[error("empty value")]
    Empty,

    /// Not a recognizable integer.
    #[error("invalid integer syntax")]
    InvalidInteger,

    /// A valid integer that does not fit the target width.
    #[error("value {value} out of range for {target}")]
    OutOfRange { value: String, target: FieldType },

    /// Not a recognizable floating point number.
    #[error("invalid float: {0}")]
    InvalidFloat(#[from] std::num::ParseFloatError),

    /// Not one of the accepted boolean spellings.
    #[error("invalid boolean syntax")]
    InvalidBool,

    /// Not an RFC 3339 timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    /// RFC 3339 variant other than the uppercase `T`/`Z` layout.
    #[error("timestamp must use an uppercase 'T' separator and 'Z' suffix")]
    TimestampLayout,

    /// A converted value of one kind was offered to a field of another.
    #[error("cannot store {found} value in {expected} field")]
    Mismatch {
        expected: FieldType,
        found: &'static str,
    },

    /// The record has no field at this position.
    #[error("record has no field at position {0}")]
    NoSuchField(usize),

    /// Failure reported by a caller-supplied converter.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
