//! Error types for board operations.
//!
//! [`BoardError`] is returned by everything that turns external schedule data
//! into a board layout. A failing table is never laid out partially.

use std::io;

use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("line '{source_line}' links to '{target}', which is not a row of this table")]
    UnknownLinkTarget { source_line: String, target: String },

    #[error("line '{line}' links to itself")]
    SelfLink { line: String },

    #[error("link {from} -> {to} must point to a lower row")]
    UnnormalizedLink { from: usize, to: usize },

    #[error("table failed validation: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    #[error("unknown column field '{key}'")]
    UnknownColumn { key: String },

    #[error("value of column '{key}' is longer than {max} characters")]
    ColumnValueTooLong { key: String, max: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for BoardError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
