//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the input document.
///
/// A diagnostic usually has one primary label marking the offending markup
/// and optionally secondary labels for related places, such as the first
/// definition of a duplicated id:
///
/// ```text
/// error[E102]: an object with id `Protein_1` already exists
///    |
/// 12 | <bp:Protein rdf:ID="Protein_1">
///    |             ^^^^^^^^^^^^^^^^^^ duplicate identity
///    |
///  3 | <bp:Protein rdf:ID="Protein_1">
///    |             ------------------ first defined here
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "unknown type");

        assert_eq!(label.span().start(), 10);
        assert_eq!(label.span().end(), 20);
        assert_eq!(label.message(), "unknown type");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..15), "first defined here");

        assert_eq!(label.message(), "first defined here");
        assert!(label.is_secondary());
    }
}
