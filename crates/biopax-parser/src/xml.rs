//! A namespace-aware XML element tree.
//!
//! BioPAX exports only use a small part of XML: elements, attributes, text,
//! CDATA, comments, processing instructions, a DOCTYPE and namespace
//! declarations. [`read_document`] turns such a document into an [`Element`]
//! tree whose names are expanded to `(namespace URI, local name)` pairs, so
//! the decoder never has to care which prefixes a producer chose.

mod namespace;
mod reader;

use std::rc::Rc;

pub use reader::read_document;

use crate::span::Span;

/// An expanded XML name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    namespace: Option<Rc<str>>,
    local: String,
}

impl QName {
    pub fn new(namespace: Option<Rc<str>>, local: impl Into<String>) -> Self {
        Self {
            namespace,
            local: local.into(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Whether this name is `local` in `namespace`.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.in_namespace(namespace) && self.local == local
    }

    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

/// An attribute with its entity references decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: QName,
    value: String,
    span: Span,
}

impl Attribute {
    pub fn new(name: QName, value: impl Into<String>, span: Span) -> Self {
        Self {
            name,
            value: value.into(),
            span,
        }
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Span of the whole `name="value"` pair.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// An element with its attributes, child elements and text content.
///
/// Namespace declarations are consumed by the reader and do not appear among
/// the attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: QName,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
    text: String,
    span: Span,
}

impl Element {
    pub fn new(name: QName, attributes: Vec<Attribute>, span: Span) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
            span,
        }
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The attribute `local` in `namespace`, if present.
    pub fn attribute(&self, namespace: &str, local: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.is(namespace, local))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Concatenated character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Span of the start tag.
    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
