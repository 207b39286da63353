//! Error types for layout resolution and record (de)serialization.

use thiserror::Error;

/// Error produced when a type cannot be reduced to a fixed-layout record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unsupported type {ty} for field {record}.{field}")]
    UnsupportedFieldType {
        record: &'static str,
        field: String,
        ty: &'static str,
    },
    #[error("record {0} has no fields")]
    EmptyLayout(&'static str),
    #[error("size {size} declared on non-text field {record}.{field}")]
    UnexpectedSize {
        record: &'static str,
        field: String,
        size: usize,
    },
}

/// Error type for record operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("insufficient data: needed {needed} bytes, {remaining} remaining")]
    InsufficientData { needed: usize, remaining: usize },
    #[error("unsupported value for field {field}: {reason}")]
    UnsupportedFieldValue { field: String, reason: String },
    #[error("invalid data in {0}: {1}")]
    InvalidData(String, String), // field, message
    #[error("type mismatch in {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("field count mismatch: layout has {expected}, record has {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
