//! End-to-end tests for the read, decode and resolve pipeline.

use biopax_core::model::{AttributeValue, ResolutionMode, Term};
use proptest::prelude::*;

use crate::{DecodeConfig, ParseError, error::ErrorCode, parse, parse_with_report, xml};

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE rdf:RDF [
  <!ENTITY xsd "http://www.w3.org/2001/XMLSchema#">
]>
<rdf:RDF xmlns:xsd="http://www.w3.org/2001/XMLSchema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#"
         xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:bp="http://www.biopax.org/release/biopax-level3.owl#"
         xml:base="http://pathwaycommons.org/test#">
<owl:Ontology rdf:about="">
 <owl:imports rdf:resource="http://www.biopax.org/release/biopax-level3.owl#" />
</owl:Ontology>
"#;

fn document(body: &str) -> String {
    format!("{HEADER}{body}\n</rdf:RDF>\n")
}

fn codes(err: &ParseError) -> Vec<ErrorCode> {
    err.diagnostics().iter().filter_map(|d| d.code()).collect()
}

#[test]
fn test_reaction_document() {
    let source = document(
        r##"<!-- a small reaction -->
<bp:BiochemicalReaction rdf:ID="BiochemicalReaction_1">
 <bp:displayName rdf:datatype="http://www.w3.org/2001/XMLSchema#string">EGFR phosphorylation</bp:displayName>
 <bp:left rdf:resource="#Protein_1" />
 <bp:right rdf:resource="#Protein_2" />
 <bp:conversionDirection rdf:datatype="http://www.w3.org/2001/XMLSchema#string">LEFT-TO-RIGHT</bp:conversionDirection>
</bp:BiochemicalReaction>

<bp:Protein rdf:ID="Protein_1">
 <bp:displayName rdf:datatype="http://www.w3.org/2001/XMLSchema#string">EGFR</bp:displayName>
 <bp:entityReference rdf:resource="#ProteinReference_1" />
</bp:Protein>

<bp:Protein rdf:ID="Protein_2">
 <bp:displayName rdf:datatype="http://www.w3.org/2001/XMLSchema#string">EGFR &amp; phosphate</bp:displayName>
 <bp:entityReference rdf:resource="#ProteinReference_1" />
 <bp:feature>
  <bp:ModificationFeature rdf:ID="ModificationFeature_1">
   <bp:modificationType rdf:resource="#SequenceModificationVocabulary_1" />
  </bp:ModificationFeature>
 </bp:feature>
</bp:Protein>

<bp:ProteinReference rdf:about="http://identifiers.org/uniprot/P00533">
 <bp:name rdf:datatype="http://www.w3.org/2001/XMLSchema#string">EGFR</bp:name>
</bp:ProteinReference>

<bp:ProteinReference rdf:ID="ProteinReference_1" />

<bp:SequenceModificationVocabulary rdf:ID="SequenceModificationVocabulary_1">
 <bp:term rdf:datatype="http://www.w3.org/2001/XMLSchema#string">O-phospho-L-tyrosine</bp:term>
</bp:SequenceModificationVocabulary>"##,
    );

    let (model, report) = parse_with_report(&source, DecodeConfig::default()).unwrap();

    assert!(report.is_empty());
    assert!(model.is_resolved());
    assert_eq!(model.len(), 7);
    assert_eq!(model.xml_base(), "http://pathwaycommons.org/test#");

    let reaction = model.get("BiochemicalReaction_1").unwrap();
    let p1 = model.lookup("Protein_1").unwrap();
    let p2 = model.lookup("Protein_2").unwrap();
    assert_eq!(reaction.attribute("left").nodes().collect::<Vec<_>>(), [p1]);
    assert_eq!(reaction.attribute("right").nodes().collect::<Vec<_>>(), [p2]);
    assert_eq!(
        reaction.literal("conversion_direction"),
        Some("LEFT-TO-RIGHT")
    );

    assert_eq!(model[p2].literal("display_name"), Some("EGFR & phosphate"));
    let feature = model.lookup("ModificationFeature_1").unwrap();
    assert_eq!(model[p2].attribute("feature").nodes().collect::<Vec<_>>(), [feature]);

    let vocabulary = model.lookup("SequenceModificationVocabulary_1").unwrap();
    assert_eq!(
        model[feature].attribute("modification_type").first(),
        Some(&Term::Node(vocabulary))
    );

    assert!(model.get("http://identifiers.org/uniprot/P00533").is_some());
}

#[test]
fn test_dangling_reference_lenient() {
    let source = document(
        r##"<bp:Protein rdf:ID="Protein_1">
 <bp:entityReference rdf:resource="#Missing_1" />
 <bp:xref rdf:resource="#Missing_2" />
</bp:Protein>"##,
    );

    let (model, report) = parse_with_report(&source, DecodeConfig::default()).unwrap();

    assert!(model.is_resolved());
    let protein = model.get("Protein_1").unwrap();
    assert_eq!(
        protein.attribute("entity_reference"),
        &AttributeValue::Single(Term::Literal("Missing_1".to_string()))
    );
    assert_eq!(report.dangling_targets(), ["Missing_1", "Missing_2"]);
}

#[test]
fn test_dangling_reference_strict() {
    let source = document(
        r##"<bp:Protein rdf:ID="Protein_1">
 <bp:entityReference rdf:resource="#Missing_1" />
</bp:Protein>
<bp:Protein rdf:ID="Protein_2">
 <bp:entityReference rdf:resource="#Missing_1" />
</bp:Protein>"##,
    );

    let err = parse(&source, DecodeConfig::new(ResolutionMode::Strict)).unwrap_err();

    assert_eq!(codes(&err), [ErrorCode::E200]);
    let span = err.diagnostics()[0].labels()[0].span();
    let first = source.find(r##"rdf:resource="#Missing_1""##).unwrap();
    assert_eq!(span.start(), first);
    assert_eq!(&source[span.start()..span.end()], r##"rdf:resource="#Missing_1""##);
}

#[test]
fn test_reader_errors_stop_before_decoding() {
    // The unknown type would be E100, but the broken markup is reported first.
    let source = document(r#"<bp:Gadget rdf:ID="G1"><bp:comment>x</bp:Gadget>"#);
    let err = parse(&source, DecodeConfig::default()).unwrap_err();
    assert_eq!(codes(&err), [ErrorCode::E002]);
}

#[test]
fn test_decode_errors_reported_together() {
    let source = document(
        r#"<bp:Protein rdf:ID="P1" />
<bp:Protein rdf:ID="P1" />
<bp:Gizmo rdf:ID="G1" />"#,
    );
    let err = parse(&source, DecodeConfig::default()).unwrap_err();
    assert_eq!(codes(&err), [ErrorCode::E102, ErrorCode::E100]);
}

#[test]
fn test_error_display_mentions_code() {
    let err = parse(&document("<bp:Gizmo rdf:ID=\"G1\" />"), DecodeConfig::default()).unwrap_err();
    assert!(err.to_string().contains("E100"), "{err}");
}

#[test]
fn test_single_quoted_attributes_and_character_references() {
    let source = document(
        r#"<bp:SmallMolecule rdf:ID='SmallMolecule_1'>
 <bp:displayName>&#945;-D-glucose &#x2192; G6P</bp:displayName>
</bp:SmallMolecule>"#,
    );
    let model = parse(&source, DecodeConfig::default()).unwrap();
    assert_eq!(
        model.get("SmallMolecule_1").unwrap().literal("display_name"),
        Some("α-D-glucose → G6P")
    );
}

#[test]
fn test_doctype_entities_in_datatypes() {
    let source = document(
        r#"<bp:Stoichiometry rdf:ID="Stoichiometry_1">
 <bp:stoichiometricCoefficient rdf:datatype="&xsd;float">2.0</bp:stoichiometricCoefficient>
</bp:Stoichiometry>"#,
    );
    let model = parse(&source, DecodeConfig::default()).unwrap();
    assert_eq!(
        model
            .get("Stoichiometry_1")
            .unwrap()
            .literal("stoichiometric_coefficient"),
        Some("2.0")
    );
}

proptest! {
    #[test]
    fn reader_never_panics(source in "[<>/a-z:=\"' &;#!?\\[\\]-]{0,64}") {
        let _ = xml::read_document(&source);
    }

    #[test]
    fn escaped_text_decodes_to_original(text in "[ -~]{0,40}") {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        let source = document(&format!(
            "<bp:Protein rdf:ID=\"P\"><bp:displayName>{escaped}</bp:displayName></bp:Protein>"
        ));
        let model = parse(&source, DecodeConfig::default()).unwrap();
        prop_assert_eq!(model.get("P").unwrap().literal("display_name"), Some(text.as_str()));
    }
}
