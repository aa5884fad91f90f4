//! XML namespaces and naming conventions of the BioPAX wire format.
//!
//! BioPAX documents mix four vocabularies: the structural `bp` namespace for
//! types and properties, `rdf` for identity and reference markers, `xsd` for
//! literal datatypes and `owl` for the ontology-import wrapper. This module
//! holds their URIs together with the helpers shared by the decoder and the
//! encoder.

use std::fmt;

/// The BioPAX Level 3 structural namespace.
pub const BP: &str = "http://www.biopax.org/release/biopax-level3.owl#";
/// The RDF syntax namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// The XML Schema datatype namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// The OWL namespace.
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
/// The reserved `xml:` namespace.
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefix/URI pairs declared on the root of encoded documents.
pub const PREFIXES: [(&str, &str); 4] = [("xsd", XSD), ("owl", OWL), ("rdf", RDF), ("bp", BP)];

/// `xml:base` used when a document does not declare one.
pub const DEFAULT_XML_BASE: &str = BP;

/// Literal datatypes understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Datatype {
    #[default]
    String,
    Int,
    Float,
}

impl Datatype {
    /// The local name within the `xsd` namespace.
    pub fn local_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
        }
    }

    /// The full datatype URI written to `rdf:datatype`.
    pub fn uri(&self) -> String {
        format!("{XSD}{}", self.local_name())
    }

    /// Recognizes a datatype written either as a full XSD URI or in the
    /// abbreviated `xsd:` form.
    ///
    /// ```
    /// use biopax_core::namespace::Datatype;
    ///
    /// assert_eq!(
    ///     Datatype::from_marker("http://www.w3.org/2001/XMLSchema#int"),
    ///     Some(Datatype::Int)
    /// );
    /// assert_eq!(Datatype::from_marker("xsd:float"), Some(Datatype::Float));
    /// assert_eq!(Datatype::from_marker("xsd:boolean"), None);
    /// ```
    pub fn from_marker(marker: &str) -> Option<Self> {
        let local = marker
            .strip_prefix(XSD)
            .or_else(|| marker.strip_prefix("xsd:"))?;
        match local {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            _ => None,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xsd:{}", self.local_name())
    }
}

/// Returns true when an identifier is an absolute URL rather than a fragment.
///
/// Absolute ids are written with `rdf:about`, fragments with `rdf:ID`.
pub fn is_url(id: &str) -> bool {
    id.starts_with("http")
}

/// Converts a wire property name (`entityReference`) to an attribute name
/// (`entity_reference`).
///
/// An underscore is inserted before every uppercase letter except a leading
/// one, so `eCNumber` becomes `e_c_number` and `kEQ` becomes `k_e_q`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Converts an attribute name back to its wire form.
pub fn snake_to_camel(name: &str) -> String {
    let mut parts = name.split('_');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("entityReference"), "entity_reference");
        assert_eq!(camel_to_snake("displayName"), "display_name");
        assert_eq!(camel_to_snake("xref"), "xref");
        assert_eq!(camel_to_snake("eCNumber"), "e_c_number");
        assert_eq!(camel_to_snake("deltaGPrime0"), "delta_g_prime0");
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("entity_reference"), "entityReference");
        assert_eq!(snake_to_camel("e_c_number"), "eCNumber");
        assert_eq!(snake_to_camel("k_e_q"), "kEQ");
        assert_eq!(snake_to_camel("comment"), "comment");
    }

    #[test]
    fn test_case_conversion_inverts() {
        for wire in ["memberPhysicalEntity", "participantStoichiometry", "pMg", "deltaGPrime0"] {
            assert_eq!(snake_to_camel(&camel_to_snake(wire)), wire);
        }
    }

    #[test]
    fn test_datatype_markers() {
        assert_eq!(Datatype::from_marker(&Datatype::Int.uri()), Some(Datatype::Int));
        assert_eq!(Datatype::from_marker("xsd:string"), Some(Datatype::String));
        assert_eq!(Datatype::from_marker("string"), None);
        assert_eq!(Datatype::Float.to_string(), "xsd:float");
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://identifiers.org/uniprot/P00533"));
        assert!(is_url("https://example.org/x"));
        assert!(!is_url("Protein_1"));
    }
}
