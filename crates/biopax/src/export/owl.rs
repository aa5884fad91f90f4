//! RDF/XML export.
//!
//! Writes a model in the layout BioPAX tools commonly produce: one
//! top-level element per node, separated by blank lines, with property
//! elements indented below it. Attributes are written in the order the
//! schema declares them for the node's type, followed by attributes the
//! schema does not declare, in insertion order.

use std::{borrow::Cow, io::Write};

use log::{debug, warn};

use biopax_core::{
    model::{AttributeValue, Model, Node, Term},
    namespace::{BP, Datatype, PREFIXES, is_url, snake_to_camel},
    symbol::Symbol,
};

use super::{Error, Exporter};

/// Writes models as RDF/XML to any [`Write`] sink.
pub struct OwlWriter<W: Write> {
    writer: W,
    indent: String,
}

impl<W: Write> OwlWriter<W> {
    /// Creates a writer with one space of indentation per property level.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            indent: " ".to_string(),
        }
    }

    /// Sets the indentation width of property elements.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, model: &Model) -> Result<(), Error> {
        writeln!(self.writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(self.writer, "<rdf:RDF")?;
        for (prefix, uri) in PREFIXES {
            writeln!(self.writer, r#" xmlns:{prefix}="{uri}""#)?;
        }
        writeln!(
            self.writer,
            r#" xml:base="{}">"#,
            escape(model.xml_base(), true)
        )?;
        writeln!(self.writer, r#"<owl:Ontology rdf:about="">"#)?;
        writeln!(
            self.writer,
            r#"{}<owl:imports rdf:resource="{BP}" />"#,
            self.indent
        )?;
        writeln!(self.writer, "</owl:Ontology>")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_node(&mut self, model: &Model, node: &Node) -> Result<(), Error> {
        let identity = if is_url(node.id()) { "rdf:about" } else { "rdf:ID" };
        let tag = node.type_name();
        let id = escape(node.id(), true);

        let properties = ordered_properties(node);
        if properties.is_empty() {
            writeln!(self.writer, r#"<bp:{tag} {identity}="{id}" />"#)?;
            return Ok(());
        }

        writeln!(self.writer, r#"<bp:{tag} {identity}="{id}">"#)?;
        for (name, value, datatype) in properties {
            let property = snake_to_camel(&name.to_owned_string());
            for term in value.terms() {
                self.write_term(model, node, &property, datatype, term)?;
            }
        }
        writeln!(self.writer, "</bp:{tag}>")?;
        Ok(())
    }

    fn write_term(
        &mut self,
        model: &Model,
        node: &Node,
        property: &str,
        datatype: Datatype,
        term: &Term,
    ) -> Result<(), Error> {
        let indent = &self.indent;
        match term {
            Term::Literal(text) => writeln!(
                self.writer,
                r#"{indent}<bp:{property} rdf:datatype="{}">{}</bp:{property}>"#,
                datatype.uri(),
                escape(text, false)
            )?,
            Term::Node(target) => {
                let target = model.node(*target).ok_or_else(|| {
                    Error::Render(format!(
                        "`{}.{property}` points to node {target}, which is not in the model",
                        node.id()
                    ))
                })?;
                let resource = if is_url(target.id()) {
                    Cow::Borrowed(target.id())
                } else {
                    Cow::Owned(format!("#{}", target.id()))
                };
                writeln!(
                    self.writer,
                    r#"{indent}<bp:{property} rdf:resource="{}" />"#,
                    escape(&resource, true)
                )?;
            }
            Term::Unresolved(target) => {
                warn!(
                    id = node.id(),
                    property,
                    target = target.as_str();
                    "Dropping unresolved reference"
                );
            }
        }
        Ok(())
    }
}

impl<W: Write> Exporter for OwlWriter<W> {
    fn export_model(&mut self, model: &Model) -> Result<(), Error> {
        self.write_header(model)?;
        for (_, node) in model.iter() {
            self.write_node(model, node)?;
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "</rdf:RDF>")?;
        self.writer.flush()?;

        debug!(nodes = model.len(); "Model exported");
        Ok(())
    }
}

/// Attributes of a node with the datatype their literals are written with.
fn ordered_properties(node: &Node) -> Vec<(Symbol, &AttributeValue, Datatype)> {
    let descriptor = node.type_tag().descriptor();
    let declared = descriptor
        .attributes()
        .map(|spec| (spec.name(), node.get(spec.name()), spec.kind().datatype()));
    let undeclared = node
        .attributes()
        .filter(|(name, _)| !node.declares(*name))
        .map(|(name, value)| (name, value, Datatype::default()));

    declared
        .chain(undeclared)
        .filter(|(_, value, _)| !value.is_absent())
        .collect()
}

/// Escapes markup characters, and quotes too inside attribute values.
fn escape(text: &str, in_attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (in_attribute && c == '"');
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
