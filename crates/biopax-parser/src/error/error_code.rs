//! Error codes for the BioPAX diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - XML reader errors
//! - `E1xx` - Decoder errors
//! - `E2xx` - Reference resolution errors
//! - `E3xx` - Path query errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Reader Errors (E0xx)
    // =========================================================================
    /// Malformed markup.
    ///
    /// The document contains text that is not well-formed XML, such as a tag
    /// without a name or an attribute without a quoted value.
    E001,

    /// Mismatched closing tag.
    ///
    /// A closing tag does not match the most recently opened element.
    E002,

    /// Unexpected end of document.
    ///
    /// The document ended inside a tag, comment or CDATA section, or with
    /// elements still open.
    E003,

    /// Invalid entity reference.
    ///
    /// Only the predefined entities (`&lt;`, `&gt;`, `&amp;`, `&quot;`,
    /// `&apos;`) and numeric character references are understood.
    E004,

    /// Undeclared namespace prefix.
    ///
    /// An element or attribute uses a prefix with no `xmlns:` declaration in
    /// scope.
    E005,

    // =========================================================================
    // Decoder Errors (E1xx)
    // =========================================================================
    /// Unknown type.
    ///
    /// A top-level or nested element names a type that is not part of
    /// BioPAX Level 3.
    E100,

    /// Missing identity.
    ///
    /// An object element carries neither `rdf:ID` nor `rdf:about`.
    E101,

    /// Duplicate identity.
    ///
    /// Two object elements claim the same id.
    E102,

    // =========================================================================
    // Resolution Errors (E2xx)
    // =========================================================================
    /// Dangling reference.
    ///
    /// An `rdf:resource` names an object that is not defined in the document.
    /// Only reported in strict resolution mode.
    E200,

    // =========================================================================
    // Path Query Errors (E3xx)
    // =========================================================================
    /// Unknown type constraint.
    ///
    /// A `:Type` filter in a path names a type that is not part of the
    /// schema.
    E300,

    /// Invalid path.
    ///
    /// The path does not follow the `attr[*][:Type]/...` grammar.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // XML reader errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            // Decoder errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Resolution errors
            ErrorCode::E200 => "E200",
            // Path query errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // XML reader errors
            ErrorCode::E001 => "malformed markup",
            ErrorCode::E002 => "mismatched closing tag",
            ErrorCode::E003 => "unexpected end of document",
            ErrorCode::E004 => "invalid entity reference",
            ErrorCode::E005 => "undeclared namespace prefix",
            // Decoder errors
            ErrorCode::E100 => "unknown type",
            ErrorCode::E101 => "missing identity",
            ErrorCode::E102 => "duplicate identity",
            // Resolution errors
            ErrorCode::E200 => "dangling reference",
            // Path query errors
            ErrorCode::E300 => "unknown type constraint",
            ErrorCode::E301 => "invalid path",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
