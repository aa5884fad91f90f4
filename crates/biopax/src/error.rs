//! Error types for BioPAX operations.
//!
//! This module provides the main error type [`BiopaxError`] which wraps
//! the error conditions that can occur while reading, querying and writing
//! models.

use std::io;

use thiserror::Error;

use biopax_core::model::ModelError;
use biopax_parser::error::ParseError;

/// The main error type for BioPAX operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans, together with the text those spans point into: the document for
/// decode errors, the path for query errors.
#[derive(Debug, Error)]
pub enum BiopaxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for BiopaxError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl BiopaxError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
