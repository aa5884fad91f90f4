//! Error and diagnostic system for the BioPAX parser.
//!
//! Every problem found in a document or a path query becomes a
//! [`Diagnostic`]: a severity, an [`ErrorCode`], a message, labeled byte
//! spans into the input and optional help. Phases accumulate diagnostics in a
//! `DiagnosticCollector` and fail with a [`ParseError`] holding all of them,
//! so a document with several unknown types reports each one.
//!
//! # Example
//!
//! ```
//! # use biopax_parser::error::{Diagnostic, ErrorCode};
//! # use biopax_parser::Span;
//!
//! let diag = Diagnostic::error("an object with id `Protein_1` already exists")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(120..138), "duplicate identity")
//!     .with_secondary_label(Span::new(40..58), "first defined here");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
