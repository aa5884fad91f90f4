//! Collector for accumulating diagnostics during a processing phase.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so that a phase can report every problem in a
/// document instead of stopping at the first one.
///
/// ```text
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(Diagnostic::error("unknown type `Protien`").with_code(ErrorCode::E100));
/// collector.emit(Diagnostic::error("unknown type `Complx`").with_code(ErrorCode::E100));
/// let result = collector.finish(); // Err with both diagnostics
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether an error has been emitted so far.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are no errors, returns `Ok(())`.
    ///
    /// Warnings are discarded in the success case.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_warning_only_finish_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unused namespace"));
        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_every_diagnostic() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("unknown type `Protien`")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("ignored element"));
        collector.emit(Diagnostic::error("missing identity").with_code(ErrorCode::E101));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.diagnostics()[0].message(), "unknown type `Protien`");
        assert_eq!(err.diagnostics()[2].code(), Some(ErrorCode::E101));
    }
}
