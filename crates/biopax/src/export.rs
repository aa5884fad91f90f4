//! Export functionality for BioPAX models.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a [`Model`] in an output format. It is the final stage of the
//! codec pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! RDF/XML Text
//!     ↓ read, decode, resolve
//! Model
//!     ↓ synthesize inverses
//! Model with inverse links
//!     ↓ export (this module)
//! RDF/XML Text
//! ```
//!
//! # Available Backends
//!
//! - [`owl`]: RDF/XML output via [`owl::OwlWriter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`BiopaxError::Export`] at the crate
//! boundary.
//!
//! [`BiopaxError::Export`]: crate::BiopaxError::Export

/// RDF/XML export backend.
pub mod owl;

use biopax_core::model::Model;

/// Abstraction for model export backends.
///
/// Implementors convert a [`Model`] into a specific output format.
///
/// See the [`owl`] module for the built-in RDF/XML implementation.
pub trait Exporter {
    /// Exports every node of a model.
    ///
    /// Inverse links are derived data and are never written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the model cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_model(&mut self, model: &Model) -> Result<(), Error>;
}

/// Errors that can occur during model export.
///
/// This type is converted into [`BiopaxError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`BiopaxError::Export`]: crate::BiopaxError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
