//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Only [`Severity::Error`] makes a [`DiagnosticCollector`] fail; warnings
/// are informational.
///
/// [`DiagnosticCollector`]: super::DiagnosticCollector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal problem; the document or path is rejected.
    Error,

    /// A non-fatal problem worth reporting.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
