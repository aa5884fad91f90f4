//! XML lexer and tree builder.
//!
//! Reading happens in two passes. The lexer turns the source into
//! [`PositionedToken`]s (tags, text, CDATA and ignorable markup), recovering
//! after malformed markup so that all lexical problems are reported at once.
//! The tree builder then matches start and end tags, expands namespace
//! prefixes and decodes entity references.

use std::{borrow::Cow, collections::HashMap};

use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, delimited, opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{take_till, take_until, take_while},
};

use super::{
    Attribute, Element, QName,
    namespace::{NamespaceStack, split_qualified},
};
use crate::{
    error::{self, Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Diagnostic context attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<XmlDiagnostic>>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawAttribute<'a> {
    name: &'a str,
    value: &'a str,
    /// Byte offset of the first character of the value.
    value_offset: usize,
    span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    StartTag {
        name: &'a str,
        attributes: Vec<RawAttribute<'a>>,
        self_closing: bool,
    },
    EndTag(&'a str),
    /// Character data with entity references still encoded.
    Text(&'a str),
    CData(&'a str),
    /// The document type declaration with its internal subset, if any.
    Doctype(Option<&'a str>),
    /// Comments and processing instructions.
    Ignorable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PositionedToken<'a> {
    token: Token<'a>,
    span: Span,
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric() || c == '-' || c == '.'
}

/// Parse an XML name, prefix included.
fn name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., is_name_char)
        .verify(|s: &str| s.chars().next().is_some_and(is_name_start))
        .parse_next(input)
}

fn comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    "<!--".parse_next(input)?;
    cut_err(terminated(take_until(0.., "-->"), "-->"))
        .context(XmlDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated comment",
            help: Some("close the comment with `-->`"),
            start,
        })
        .value(Token::Ignorable)
        .parse_next(input)
}

fn cdata<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    "<![CDATA[".parse_next(input)?;
    cut_err(terminated(take_until(0.., "]]>"), "]]>"))
        .context(XmlDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated CDATA section",
            help: Some("close the section with `]]>`"),
            start,
        })
        .map(Token::CData)
        .parse_next(input)
}

/// Parse `<!DOCTYPE ...>`, keeping the internal subset in brackets.
fn doctype<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    "<!DOCTYPE".parse_next(input)?;
    cut_err(delimited(
        take_till(0.., ['[', '>']),
        opt(delimited('[', take_until(0.., "]"), ']')),
        (take_till(0.., '>'), '>'),
    ))
    .context(XmlDiagnostic {
        code: ErrorCode::E003,
        message: "unterminated DOCTYPE declaration",
        help: None,
        start,
    })
    .map(Token::Doctype)
    .parse_next(input)
}

/// Parse `<?...?>`, including the XML declaration.
fn processing_instruction<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    "<?".parse_next(input)?;
    cut_err(terminated(take_until(0.., "?>"), "?>"))
        .context(XmlDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated processing instruction",
            help: Some("close the instruction with `?>`"),
            start,
        })
        .value(Token::Ignorable)
        .parse_next(input)
}

fn end_tag<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    "</".parse_next(input)?;
    cut_err(terminated(name, (multispace0, '>')))
        .context(XmlDiagnostic {
            code: ErrorCode::E001,
            message: "malformed closing tag",
            help: Some("closing tags look like `</bp:name>`"),
            start,
        })
        .map(Token::EndTag)
        .parse_next(input)
}

/// Parse a quoted attribute value, returning it with its start offset.
fn quoted_value<'a>(input: &mut Input<'a>) -> IResult<(&'a str, usize)> {
    let mut quote = alt(('"', '\'')).parse_next(input)?;
    let offset = input.current_token_start();
    let value = take_till(0.., move |c: char| c == quote || c == '<').parse_next(input)?;
    quote.parse_next(input)?;
    Ok((value, offset))
}

/// Parse whitespace followed by `name="value"`.
fn attribute<'a>(input: &mut Input<'a>) -> IResult<RawAttribute<'a>> {
    multispace1.parse_next(input)?;
    let start = input.current_token_start();
    let name = name.parse_next(input)?;
    // Commit once the attribute name is read.
    let (value, value_offset) = cut_err(preceded((multispace0, '=', multispace0), quoted_value))
        .context(XmlDiagnostic {
            code: ErrorCode::E001,
            message: "malformed attribute",
            help: Some("attributes look like `name=\"value\"`"),
            start,
        })
        .parse_next(input)?;
    let end = input.current_token_start();

    Ok(RawAttribute {
        name,
        value,
        value_offset,
        span: Span::new(start..end),
    })
}

fn start_tag<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    '<'.parse_next(input)?;
    let name = name.parse_next(input)?;
    let (attributes, self_closing) = cut_err((
        repeat(0.., attribute),
        preceded(multispace0, alt(("/>".value(true), '>'.value(false)))),
    ))
    .context(XmlDiagnostic {
        code: ErrorCode::E001,
        message: "malformed start tag",
        help: Some("expected attributes followed by `>` or `/>`"),
        start,
    })
    .parse_next(input)?;

    Ok(Token::StartTag {
        name,
        attributes,
        self_closing,
    })
}

fn text<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_till(1.., '<').map(Token::Text).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,                // Must come before start_tag
        cdata,                  // Must come before start_tag
        doctype,                // Must come before start_tag
        processing_instruction, // Must come before start_tag
        end_tag,                // Must come before start_tag
        start_tag,
        text,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken {
        token,
        span: Span::new(start_pos..end_pos),
    })
}

/// Lexer that accumulates tokens and diagnostics.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    // Nothing left to close the construct with.
                    let at_end = !input.contains('>');
                    self.diagnostics
                        .emit(Self::convert_err_mode(e, error_pos, at_end));

                    // Skip to the next tag.
                    if !input.is_empty() {
                        input.next_token();
                    }
                    let skip = input.find('<').unwrap_or(input.len());
                    input.next_slice(skip);
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an `ErrMode` and error position to a [`Diagnostic`].
    ///
    /// Uses the innermost [`XmlDiagnostic`] context if any, else reports
    /// malformed markup at the error position.
    fn convert_err_mode(
        err: ErrMode<ContextError<XmlDiagnostic>>,
        error_pos: usize,
        at_end: bool,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(XmlDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let code = if at_end { ErrorCode::E003 } else { *code };
            let span = Span::new(*start..error_pos.max(*start + 1));

            let mut diag = Diagnostic::error(*message)
                .with_code(code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character in markup")
            .with_code(ErrorCode::E001)
            .with_label(span, ErrorCode::E001.description())
            .with_help("use `&lt;` for a literal `<` in text")
    }
}

/// Parse `<!ENTITY name "value">`.
fn entity_declaration<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    (
        "<!ENTITY",
        multispace1,
        take_while(1.., is_name_char).verify(|s: &str| s.chars().next().is_some_and(is_name_start)),
        multispace1,
        alt((
            delimited('"', take_till(0.., '"'), '"'),
            delimited('\'', take_till(0.., '\''), '\''),
        )),
        multispace0,
        '>',
    )
        .map(|(_, _, name, _, value, _, _)| (name, value))
        .parse_next(input)
}

/// General entities declared in a DOCTYPE internal subset.
///
/// Other declarations, including parameter entities, are skipped.
fn entity_declarations(subset: &str) -> HashMap<String, String> {
    let mut entities = HashMap::new();
    let mut input = subset;
    while !input.is_empty() {
        let checkpoint = input.checkpoint();
        match entity_declaration.parse_next(&mut input) {
            Ok((name, value)) => {
                entities.insert(name.to_string(), value.to_string());
            }
            Err(_) => {
                input.reset(&checkpoint);
                input.next_token();
            }
        }
    }
    entities
}

fn numeric_reference(entity: &str) -> Option<char> {
    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Appends the replacement text of `&entity;` to `out`.
///
/// Returns false if the entity is neither predefined, numeric nor declared.
fn push_entity(out: &mut String, entity: &str, declared: &HashMap<String, String>) -> bool {
    let ch = match entity {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        _ if entity.starts_with('#') => match numeric_reference(entity) {
            Some(ch) => ch,
            None => return false,
        },
        _ => match declared.get(entity) {
            Some(text) => {
                out.push_str(text);
                return true;
            }
            None => return false,
        },
    };
    out.push(ch);
    true
}

/// Decodes entity and character references in text found at byte `offset`.
fn unescape<'r>(
    raw: &'r str,
    offset: usize,
    declared: &HashMap<String, String>,
) -> error::Result<Cow<'r, str>> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut consumed = 0;
    while let Some(amp) = raw[consumed..].find('&') {
        let amp = consumed + amp;
        out.push_str(&raw[consumed..amp]);

        let start = offset + amp;
        let rest = &raw[amp + 1..];
        let Some(semi) = rest.find(';').filter(|semi| *semi <= 32) else {
            return Err(Diagnostic::error("unescaped `&` in character data")
                .with_code(ErrorCode::E004)
                .with_label(Span::new(start..start + 1), ErrorCode::E004.description())
                .with_help("use `&amp;` for a literal ampersand"));
        };

        let entity = &rest[..semi];
        if !push_entity(&mut out, entity, declared) {
            return Err(
                Diagnostic::error(format!("unknown entity reference `&{entity};`"))
                    .with_code(ErrorCode::E004)
                    .with_label(
                        Span::new(start..start + semi + 2),
                        ErrorCode::E004.description(),
                    )
                    .with_help("declare the entity in the DOCTYPE or use a numeric reference"),
            );
        }
        consumed = amp + semi + 2;
    }
    out.push_str(&raw[consumed..]);
    Ok(Cow::Owned(out))
}

fn no_root_element(source_len: usize) -> Diagnostic {
    Diagnostic::error("document has no root element")
        .with_code(ErrorCode::E003)
        .with_label(
            Span::new(source_len..source_len),
            ErrorCode::E003.description(),
        )
}

struct OpenElement<'a> {
    raw_name: &'a str,
    element: Element,
}

/// Matches tags into an element tree.
struct TreeBuilder<'a> {
    namespaces: NamespaceStack,
    stack: Vec<OpenElement<'a>>,
    root: Option<Element>,
    /// Entities declared in the DOCTYPE.
    entities: HashMap<String, String>,
    diagnostics: DiagnosticCollector,
}

impl<'a> TreeBuilder<'a> {
    fn new() -> Self {
        Self {
            namespaces: NamespaceStack::new(),
            stack: Vec::new(),
            root: None,
            entities: HashMap::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn build(
        mut self,
        tokens: Vec<PositionedToken<'a>>,
        source_len: usize,
    ) -> Result<Element, ParseError> {
        for PositionedToken { token, span } in tokens {
            match token {
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => self.start_tag(name, attributes, self_closing, span),
                Token::EndTag(name) => self.end_tag(name, span),
                Token::Text(raw) => match unescape(raw, span.start(), &self.entities) {
                    Ok(text) => self.text(&text, span),
                    Err(diagnostic) => self.diagnostics.emit(diagnostic),
                },
                Token::CData(content) => self.text(content, span),
                Token::Doctype(Some(subset)) => self.entities = entity_declarations(subset),
                Token::Doctype(None) | Token::Ignorable => {}
            }
        }
        self.finish(source_len)
    }

    fn start_tag(
        &mut self,
        name: &'a str,
        attributes: Vec<RawAttribute<'a>>,
        self_closing: bool,
        span: Span,
    ) {
        let mut declarations = Vec::new();
        let mut plain = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let value = match unescape(attribute.value, attribute.value_offset, &self.entities) {
                Ok(value) => value.into_owned(),
                Err(diagnostic) => {
                    self.diagnostics.emit(diagnostic);
                    attribute.value.to_string()
                }
            };
            if attribute.name == "xmlns" {
                declarations.push((None, value));
            } else if let Some(prefix) = attribute.name.strip_prefix("xmlns:") {
                declarations.push((Some(prefix.to_string()), value));
            } else {
                plain.push((attribute, value));
            }
        }
        // Declarations on a tag are in scope for the tag's own names.
        self.namespaces.push(declarations);

        let qname = self.element_name(name, span);
        let mut resolved = Vec::with_capacity(plain.len());
        for (attribute, value) in plain {
            let attribute_name = self.attribute_name(attribute.name, attribute.span);
            resolved.push(Attribute::new(attribute_name, value, attribute.span));
        }

        let element = Element::new(qname, resolved, span);
        if self_closing {
            self.namespaces.pop();
            self.attach(element);
        } else {
            self.stack.push(OpenElement {
                raw_name: name,
                element,
            });
        }
    }

    fn end_tag(&mut self, name: &str, span: Span) {
        let Some(position) = self.stack.iter().rposition(|open| open.raw_name == name) else {
            self.diagnostics.emit(
                Diagnostic::error(format!("closing tag `</{name}>` has no matching start tag"))
                    .with_code(ErrorCode::E002)
                    .with_label(span, ErrorCode::E002.description()),
            );
            return;
        };

        while self.stack.len() > position + 1 {
            if let Some(open) = self.stack.last() {
                self.diagnostics.emit(
                    Diagnostic::error(format!("mismatched closing tag `</{name}>`"))
                        .with_code(ErrorCode::E002)
                        .with_label(span, format!("expected `</{}>`", open.raw_name))
                        .with_secondary_label(open.element.span(), "unclosed element opened here"),
                );
            }
            self.close_innermost();
        }
        self.close_innermost();
    }

    fn text(&mut self, text: &str, span: Span) {
        if let Some(open) = self.stack.last_mut() {
            open.element.push_text(text);
        } else if !text
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
            .is_empty()
        {
            self.diagnostics.emit(
                Diagnostic::error("text outside the root element")
                    .with_code(ErrorCode::E001)
                    .with_label(span, ErrorCode::E001.description()),
            );
        }
    }

    fn finish(mut self, source_len: usize) -> Result<Element, ParseError> {
        while let Some(open) = self.stack.last() {
            self.diagnostics.emit(
                Diagnostic::error(format!("element `<{}>` is never closed", open.raw_name))
                    .with_code(ErrorCode::E003)
                    .with_label(open.element.span(), ErrorCode::E003.description())
                    .with_help(format!("add `</{}>`", open.raw_name)),
            );
            self.close_innermost();
        }

        if self.root.is_none() {
            self.diagnostics.emit(no_root_element(source_len));
        }
        self.diagnostics.finish()?;
        self.root
            .ok_or_else(|| ParseError::from(no_root_element(source_len)))
    }

    fn close_innermost(&mut self) {
        if let Some(open) = self.stack.pop() {
            self.namespaces.pop();
            self.attach(open.element);
        }
    }

    fn attach(&mut self, element: Element) {
        if let Some(parent) = self.stack.last_mut() {
            parent.element.push_child(element);
        } else if self.root.is_none() {
            self.root = Some(element);
        } else {
            self.diagnostics.emit(
                Diagnostic::error("document has more than one root element")
                    .with_code(ErrorCode::E001)
                    .with_label(element.span(), ErrorCode::E001.description()),
            );
        }
    }

    fn element_name(&mut self, name: &str, span: Span) -> QName {
        let (prefix, local) = split_qualified(name);
        match self.namespaces.element_namespace(prefix) {
            Ok(namespace) => QName::new(namespace, local),
            Err(_) => {
                self.undeclared_prefix(prefix.unwrap_or_default(), span);
                QName::new(None, local)
            }
        }
    }

    fn attribute_name(&mut self, name: &str, span: Span) -> QName {
        let (prefix, local) = split_qualified(name);
        match self.namespaces.attribute_namespace(prefix) {
            Ok(namespace) => QName::new(namespace, local),
            Err(_) => {
                self.undeclared_prefix(prefix.unwrap_or_default(), span);
                QName::new(None, local)
            }
        }
    }

    fn undeclared_prefix(&mut self, prefix: &str, span: Span) {
        self.diagnostics.emit(
            Diagnostic::error(format!("undeclared namespace prefix `{prefix}`"))
                .with_code(ErrorCode::E005)
                .with_label(span, ErrorCode::E005.description())
                .with_help(format!(
                    "declare it with `xmlns:{prefix}=\"...\"` on this or an enclosing element"
                )),
        );
    }
}

/// Reads a document into its root [`Element`].
///
/// # Errors
///
/// Returns every lexical problem found in the document, or, if lexing
/// succeeded, every structural problem (mismatched tags, undeclared
/// prefixes, bad entity references).
pub fn read_document(source: &str) -> Result<Element, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(source));
    let tokens = lexer.finish()?;
    TreeBuilder::new().build(tokens, source.len())
}
