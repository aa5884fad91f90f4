//! Parser for attribute-path queries.
//!
//! A path is a `/`-separated list of segments. Each segment names an
//! attribute, optionally marked `*` for transitive closure and optionally
//! constrained to a type:
//!
//! ```text
//! path    := segment ('/' segment)*
//! segment := attr ['*'] [':' Type] ['*']
//! ```
//!
//! The closure marker may appear before or after the type constraint, but
//! only once. Type names are checked against the schema while parsing, so a
//! query naming an unknown type is rejected even if evaluation would never
//! reach that segment.

use std::{fmt, ops::Range};

use winnow::{
    Parser as _,
    combinator::{cut_err, opt, preceded, repeat},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use biopax_core::schema::{Schema, TypeTag};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathDiagnostic {
    message: &'static str,
    help: Option<&'static str>,
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<PathDiagnostic>>;

/// One step of a [`PathQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    attribute: String,
    transitive: bool,
    type_filter: Option<TypeTag>,
}

impl Segment {
    pub fn new(
        attribute: impl Into<String>,
        transitive: bool,
        type_filter: Option<TypeTag>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            transitive,
            type_filter,
        }
    }

    /// The attribute followed from each node.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Whether the attribute is followed repeatedly until no new nodes appear.
    pub fn is_transitive(&self) -> bool {
        self.transitive
    }

    /// Nodes must be of this type or a subtype to survive the segment.
    pub fn type_filter(&self) -> Option<TypeTag> {
        self.type_filter
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute)?;
        if self.transitive {
            write!(f, "*")?;
        }
        if let Some(type_filter) = self.type_filter {
            write!(f, ":{type_filter}")?;
        }
        Ok(())
    }
}

/// A parsed attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    segments: Vec<Segment>,
}

impl PathQuery {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A segment before its type name is looked up.
#[derive(Debug)]
struct RawSegment<'a> {
    attribute: &'a str,
    transitive: bool,
    type_name: Option<(&'a str, Range<usize>)>,
}

fn attribute_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let start = input.current_token_start();
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .context(PathDiagnostic {
            message: "expected an attribute name",
            help: Some("attribute names look like `member_physical_entity`"),
            start,
        })
        .parse_next(input)
}

fn type_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let start = input.current_token_start();
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric()),
    )
        .take()
        .context(PathDiagnostic {
            message: "expected a type name after `:`",
            help: Some("type names look like `UnificationXref`"),
            start,
        })
        .parse_next(input)
}

fn segment<'a>(input: &mut Input<'a>) -> IResult<RawSegment<'a>> {
    let start = input.current_token_start();
    let attribute = attribute_name.parse_next(input)?;
    let star_before = opt('*').parse_next(input)?.is_some();
    let constraint = opt(preceded(':', cut_err(type_name.with_span()))).parse_next(input)?;
    let star_after = opt('*').parse_next(input)?.is_some();

    if star_before && star_after {
        return Err(ErrMode::Cut(ContextError::new().add_context(
            input,
            &input.checkpoint(),
            PathDiagnostic {
                message: "closure marker `*` given twice",
                help: Some("mark a segment transitive with a single `*`"),
                start,
            },
        )));
    }

    Ok(RawSegment {
        attribute,
        transitive: star_before || star_after,
        type_name: constraint,
    })
}

fn segments<'a>(input: &mut Input<'a>) -> IResult<Vec<RawSegment<'a>>> {
    let first = segment.parse_next(input)?;
    let rest: Vec<RawSegment<'a>> = repeat(0.., preceded('/', cut_err(segment))).parse_next(input)?;

    let mut all = Vec::with_capacity(rest.len() + 1);
    all.push(first);
    all.extend(rest);
    Ok(all)
}

fn convert_err_mode(err: ErrMode<ContextError<PathDiagnostic>>, error_pos: usize) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(PathDiagnostic {
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let span = Span::new(*start..error_pos.max(*start + 1));
        let mut diag = Diagnostic::error(*message)
            .with_code(ErrorCode::E301)
            .with_label(span, ErrorCode::E301.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    let span = Span::new(error_pos..error_pos.saturating_add(1));
    Diagnostic::error("unexpected character in path")
        .with_code(ErrorCode::E301)
        .with_label(span, ErrorCode::E301.description())
}

/// Parses a path query, resolving its type constraints.
///
/// # Errors
///
/// Returns `E301` for malformed syntax, or one `E300` per type name the
/// schema does not know.
///
/// # Example
///
/// ```
/// use biopax_parser::parse_path;
///
/// let path = parse_path("xref:UnificationXref/xref_of").unwrap();
/// assert_eq!(path.segments().len(), 2);
/// assert_eq!(path.to_string(), "xref:UnificationXref/xref_of");
/// ```
pub fn parse_path(path: &str) -> Result<PathQuery, ParseError> {
    let mut input = LocatingSlice::new(path);
    let raw = match segments(&mut input) {
        Ok(raw) => raw,
        Err(err) => {
            let error_pos = input.current_token_start();
            return Err(convert_err_mode(err, error_pos).into());
        }
    };

    if !input.is_empty() {
        let error_pos = input.current_token_start();
        let unexpected = input.chars().next().unwrap_or_default();
        return Err(Diagnostic::error(format!("unexpected `{unexpected}` in path"))
            .with_code(ErrorCode::E301)
            .with_label(
                Span::new(error_pos..error_pos + unexpected.len_utf8()),
                ErrorCode::E301.description(),
            )
            .with_help("segments are separated by `/`")
            .into());
    }

    let schema = Schema::biopax();
    let mut diagnostics = DiagnosticCollector::new();
    let mut segments = Vec::with_capacity(raw.len());
    for RawSegment {
        attribute,
        transitive,
        type_name,
    } in raw
    {
        let type_filter = match type_name {
            None => None,
            Some((name, range)) => match schema.tag(name) {
                Ok(type_tag) => Some(type_tag),
                Err(err) => {
                    diagnostics.emit(
                        Diagnostic::error(err.to_string())
                            .with_code(ErrorCode::E300)
                            .with_label(Span::new(range), ErrorCode::E300.description()),
                    );
                    None
                }
            },
        };
        segments.push(Segment::new(attribute, transitive, type_filter));
    }
    diagnostics.finish()?;

    Ok(PathQuery { segments })
}
