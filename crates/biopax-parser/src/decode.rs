//! Decoding of RDF/XML elements into model nodes.
//!
//! Every top-level element in the BioPAX namespace becomes a [`Node`]. Its
//! property elements become attribute terms: literals, nested objects
//! (decoded and registered on the spot) or placeholders naming the target of
//! an `rdf:resource` reference. Placeholders are replaced by the resolver.

use std::collections::HashMap;

use log::{debug, info};

use biopax_core::{
    model::{Model, Node, NodeRef, ResolutionMode, Term},
    namespace::{BP, Datatype, RDF, XML, camel_to_snake},
    schema::Schema,
    symbol::Symbol,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    xml::Element,
};

/// Configuration for decoding a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeConfig {
    /// How references to objects missing from the document are handled
    resolution: ResolutionMode,
}

impl DecodeConfig {
    /// Create a new DecodeConfig with the given resolution mode
    pub fn new(resolution: ResolutionMode) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> ResolutionMode {
        self.resolution
    }
}

/// A decoded but not yet resolved document.
pub(crate) struct Decoded {
    pub model: Model,
    /// Span of the first `rdf:resource` naming each target id.
    pub reference_spans: HashMap<String, Span>,
}

pub(crate) struct Decoder {
    model: Model,
    diagnostics: DiagnosticCollector,
    /// Span of the element that defined each id.
    definitions: HashMap<String, Span>,
    reference_spans: HashMap<String, Span>,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            diagnostics: DiagnosticCollector::new(),
            definitions: HashMap::new(),
            reference_spans: HashMap::new(),
        }
    }

    /// Decodes every object below the document root.
    ///
    /// # Errors
    ///
    /// Returns all decode diagnostics together; no partial model is produced.
    pub fn decode(mut self, root: &Element) -> Result<Decoded, ParseError> {
        if !root.name().is(RDF, "RDF") {
            debug!(root = root.name().local(); "Document root is not rdf:RDF");
        }
        if let Some(base) = root.attribute(XML, "base") {
            self.model.set_xml_base(base.value());
        }

        for element in root.children() {
            if element.name().in_namespace(BP) {
                self.decode_object(element);
            } else {
                debug!(element = element.name().local(); "Skipping non-BioPAX element");
            }
        }

        self.diagnostics.finish()?;
        info!(nodes = self.model.len(); "Decoded document");

        Ok(Decoded {
            model: self.model,
            reference_spans: self.reference_spans,
        })
    }

    /// Decodes one object element, registering it before its nested objects.
    fn decode_object(&mut self, element: &Element) -> Option<NodeRef> {
        let type_name = element.name().local();
        let type_tag = match Schema::biopax().tag(type_name) {
            Ok(type_tag) => type_tag,
            Err(err) => {
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E100)
                        .with_label(element.span(), "unknown type")
                        .with_help("object elements must name a BioPAX Level 3 class"),
                );
                return None;
            }
        };

        let Some(id) = identity(element) else {
            self.diagnostics.emit(
                Diagnostic::error(format!("`{type_name}` object has no identity"))
                    .with_code(ErrorCode::E101)
                    .with_label(element.span(), "missing identity")
                    .with_help("add a non-empty `rdf:ID` or `rdf:about` attribute"),
            );
            return None;
        };

        if let Some(first) = self.definitions.get(&id) {
            self.diagnostics.emit(
                Diagnostic::error(format!("object `{id}` is defined more than once"))
                    .with_code(ErrorCode::E102)
                    .with_label(element.span(), "duplicate definition")
                    .with_secondary_label(*first, "first defined here"),
            );
            return None;
        }

        let node = match self.model.insert(Node::new(id.clone(), type_tag)) {
            Ok(node) => node,
            Err(err) => {
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E102)
                        .with_label(element.span(), "duplicate definition"),
                );
                return None;
            }
        };
        self.definitions.insert(id, element.span());

        for property in element.children() {
            self.decode_property(node, property);
        }
        Some(node)
    }

    fn decode_property(&mut self, node: NodeRef, property: &Element) {
        if !property.name().in_namespace(BP) {
            debug!(property = property.name().local(); "Skipping non-BioPAX property");
            return;
        }

        let name = Symbol::new(&camel_to_snake(property.name().local()));
        if Schema::biopax().is_inverse_attribute(name) {
            debug!(attribute = name.to_string(); "Ignoring derived attribute in input");
            return;
        }

        if property.children().is_empty() {
            let term = self.classify(property);
            self.push(node, name, term);
        } else {
            for nested in property.children() {
                if let Some(child) = self.decode_object(nested) {
                    self.push(node, name, Term::Node(child));
                }
            }
        }
    }

    /// Classifies a leaf property by its `rdf:resource` and `rdf:datatype`.
    fn classify(&mut self, property: &Element) -> Term {
        let resource = property.attribute(RDF, "resource");
        let datatype = property.attribute(RDF, "datatype");

        match (resource, datatype) {
            (Some(resource), _) => {
                let target = strip_fragment(resource.value());
                self.reference_spans
                    .entry(target.to_string())
                    .or_insert(resource.span());
                Term::Unresolved(target.to_string())
            }
            (None, Some(datatype)) if Datatype::from_marker(datatype.value()).is_none() => {
                debug!(
                    property = property.name().local(),
                    datatype = datatype.value();
                    "Unrecognized datatype, keeping text as literal"
                );
                Term::Literal(property.text().to_string())
            }
            (None, _) => Term::Literal(property.text().to_string()),
        }
    }

    fn push(&mut self, node: NodeRef, name: Symbol, term: Term) {
        let Some(target) = self.model.node_mut(node) else {
            return;
        };
        if !target.declares(name) {
            debug!(
                id = target.id(),
                attribute = name.to_string();
                "Keeping undeclared attribute as a list"
            );
        }
        if let Some(previous) = target.push(name, term) {
            debug!(
                id = target.id(),
                attribute = name.to_string(),
                previous:?;
                "Repeated singular attribute, keeping the last value"
            );
        }
    }
}

/// Id from `rdf:ID`, else `rdf:about` without a leading `#`.
fn identity(element: &Element) -> Option<String> {
    element
        .attribute(RDF, "ID")
        .map(|id| id.value())
        .or_else(|| {
            element
                .attribute(RDF, "about")
                .map(|about| strip_fragment(about.value()))
        })
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn strip_fragment(reference: &str) -> &str {
    reference.strip_prefix('#').unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use biopax_core::model::AttributeValue;

    use super::*;
    use crate::xml::read_document;

    fn wrap(body: &str) -> String {
        format!(
            r#"<rdf:RDF xmlns:rdf="{RDF}" xmlns:bp="{BP}" xmlns:owl="http://www.w3.org/2002/07/owl#" xml:base="http://example.org/test#">
{body}
</rdf:RDF>"#
        )
    }

    fn decode(body: &str) -> Result<Decoded, ParseError> {
        let root = read_document(&wrap(body)).unwrap();
        Decoder::new().decode(&root)
    }

    fn codes(err: &ParseError) -> Vec<ErrorCode> {
        err.diagnostics().iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_literal_and_reference_classification() {
        let decoded = decode(
            r##"<bp:Protein rdf:ID="P1">
  <bp:displayName rdf:datatype="http://www.w3.org/2001/XMLSchema#string">EGFR</bp:displayName>
  <bp:standardName>EGFR_HUMAN</bp:standardName>
  <bp:comment rdf:datatype="xsd:boolean">true</bp:comment>
  <bp:entityReference rdf:resource="#PR1"/>
</bp:Protein>"##,
        )
        .unwrap();
        let model = decoded.model;
        let protein = model.get("P1").unwrap();

        assert_eq!(model.xml_base(), "http://example.org/test#");
        assert_eq!(protein.literal("display_name"), Some("EGFR"));
        assert_eq!(protein.literal("standard_name"), Some("EGFR_HUMAN"));
        assert_eq!(
            protein.attribute("comment").literals().collect::<Vec<_>>(),
            ["true"]
        );
        assert_eq!(
            protein.attribute("entity_reference").first(),
            Some(&Term::Unresolved("PR1".to_string()))
        );
        assert!(decoded.reference_spans.contains_key("PR1"));
    }

    #[test]
    fn test_nested_object_registered() {
        let decoded = decode(
            r#"<bp:Protein rdf:about="http://example.org/P1">
  <bp:xref>
    <bp:UnificationXref rdf:ID="U1">
      <bp:db>uniprot</bp:db>
      <bp:id>P00533</bp:id>
    </bp:UnificationXref>
  </bp:xref>
</bp:Protein>"#,
        )
        .unwrap();
        let model = decoded.model;

        assert_eq!(model.len(), 2);
        // The parent is registered before its nested objects.
        assert_eq!(model.lookup("http://example.org/P1").map(|r| r.index()), Some(0));
        let xref = model.lookup("U1").unwrap();
        let protein = model.get("http://example.org/P1").unwrap();
        assert_eq!(protein.attribute("xref").nodes().collect::<Vec<_>>(), [xref]);
        assert_eq!(model[xref].literal("db"), Some("uniprot"));
    }

    #[test]
    fn test_list_and_singular_routing() {
        let decoded = decode(
            r#"<bp:Protein rdf:ID="P1">
  <bp:name>first</bp:name>
  <bp:name>second</bp:name>
  <bp:displayName>old</bp:displayName>
  <bp:displayName>new</bp:displayName>
</bp:Protein>"#,
        )
        .unwrap();
        let protein = decoded.model.get("P1").unwrap().clone();

        assert!(protein.attribute("name").is_list());
        assert_eq!(
            protein.attribute("name").literals().collect::<Vec<_>>(),
            ["first", "second"]
        );
        assert_eq!(protein.literal("display_name"), Some("new"));
    }

    #[test]
    fn test_undeclared_attribute_kept_as_list() {
        let decoded = decode(
            r#"<bp:Protein rdf:ID="P1"><bp:madeUpProperty>x</bp:madeUpProperty></bp:Protein>"#,
        )
        .unwrap();
        let protein = decoded.model.get("P1").unwrap().clone();
        assert_eq!(
            protein.attribute("made_up_property"),
            &AttributeValue::List(vec![Term::Literal("x".to_string())])
        );
    }

    #[test]
    fn test_non_biopax_elements_skipped() {
        let decoded = decode(
            r#"<owl:Ontology rdf:about=""><owl:imports rdf:resource="http://www.biopax.org/release/biopax-level3.owl#"/></owl:Ontology>
<bp:Protein rdf:ID="P1"><rdf:comment>ignored</rdf:comment></bp:Protein>"#,
        )
        .unwrap();
        assert_eq!(decoded.model.len(), 1);
        assert_eq!(decoded.model.get("P1").unwrap().attributes().count(), 0);
    }

    #[test]
    fn test_empty_literal() {
        let decoded = decode(r#"<bp:Protein rdf:ID="P1"><bp:comment/></bp:Protein>"#).unwrap();
        assert_eq!(
            decoded.model.get("P1").unwrap().attribute("comment").literals().collect::<Vec<_>>(),
            [""]
        );
    }

    #[test]
    fn test_unknown_type() {
        let err = decode(r#"<bp:Gadget rdf:ID="G1"/>"#).err().unwrap();
        assert_eq!(codes(&err), [ErrorCode::E100]);
    }

    #[test]
    fn test_missing_identity() {
        let err = decode(r#"<bp:Protein><bp:comment>x</bp:comment></bp:Protein>"#)
            .err()
            .unwrap();
        assert_eq!(codes(&err), [ErrorCode::E101]);

        let err = decode(r#"<bp:Protein rdf:ID=""/>"#).err().unwrap();
        assert_eq!(codes(&err), [ErrorCode::E101]);
    }

    #[test]
    fn test_duplicate_identity() {
        let err = decode(r##"<bp:Protein rdf:ID="P1"/><bp:Dna rdf:about="#P1"/>"##)
            .err()
            .unwrap();
        assert_eq!(codes(&err), [ErrorCode::E102]);
        assert!(err.diagnostics()[0].labels()[1].is_secondary());
    }

    #[test]
    fn test_errors_collected_across_elements() {
        let err = decode(r#"<bp:Gadget rdf:ID="G1"/><bp:Protein/><bp:Widget rdf:ID="W1"/>"#)
            .err()
            .unwrap();
        assert_eq!(
            codes(&err),
            [ErrorCode::E100, ErrorCode::E101, ErrorCode::E100]
        );
    }

    #[test]
    fn test_inverse_names_in_input_ignored() {
        let decoded = decode(
            r##"<bp:UnificationXref rdf:ID="U1"><bp:xrefOf rdf:resource="#P1"/></bp:UnificationXref>"##,
        )
        .unwrap();
        assert_eq!(decoded.model.get("U1").unwrap().attributes().count(), 0);
    }
}
