//! Integration tests for the ModelCodec API.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tempfile::tempdir;

use biopax::{
    BiopaxError, ModelCodec,
    config::{AppConfig, DecodingConfig, ExportConfig},
    model::{Model, ResolutionMode, Term},
    tools,
};
use biopax_parser::error::ErrorCode;

const EGFR: &str = include_str!("../../../samples/egfr_phosphorylation.owl");
const DANGLING: &str = include_str!("../../../samples/dangling_reference.owl");

/// Node-for-node view of a model, with references written as target ids.
type Snapshot = BTreeMap<String, (String, BTreeMap<String, Vec<String>>)>;

fn snapshot(model: &Model) -> Snapshot {
    model
        .iter()
        .map(|(_, node)| {
            let attributes = node
                .attributes()
                .filter(|(_, value)| !value.is_absent())
                .map(|(name, value)| {
                    let terms = value
                        .terms()
                        .iter()
                        .map(|term| match term {
                            Term::Literal(text) => format!("literal:{text}"),
                            Term::Node(target) => format!("node:{}", model[*target].id()),
                            Term::Unresolved(target) => format!("unresolved:{target}"),
                        })
                        .collect();
                    (name.to_string(), terms)
                })
                .collect();
            (
                node.id().to_string(),
                (node.type_name().to_string(), attributes),
            )
        })
        .collect()
}

fn ids(model: &Model, nodes: &[biopax::model::NodeRef]) -> Vec<String> {
    nodes.iter().map(|node| model[*node].id().to_string()).collect()
}

#[test]
fn test_parse_sample_document() {
    let codec = ModelCodec::default();
    let (model, report) = codec.parse_with_report(EGFR).expect("Failed to parse");

    assert!(report.is_empty());
    assert!(model.is_resolved());
    assert_eq!(model.len(), 21);
    assert_eq!(model.xml_base(), "http://example.org/egfr#");

    let protein = model.get("Protein_EGFR").unwrap();
    assert_eq!(protein.attribute("name").literals().collect::<Vec<_>>(), ["ErbB1", "HER1"]);

    let site = model.get("SequenceSite_1068").unwrap();
    assert_eq!(site.literal("sequence_position"), Some("1068"));

    let vocabulary = model.get("SequenceModificationVocabulary_pY").unwrap();
    assert_eq!(vocabulary.literal("term"), Some("O4'-phospho-L-tyrosine"));
}

#[test]
fn test_inverse_links_after_parse() {
    let codec = ModelCodec::default();
    let model = codec.parse(EGFR).unwrap();

    let reference = model.lookup("http://identifiers.org/uniprot/P00533").unwrap();
    assert_eq!(
        ids(&model, &model.inverse(reference, "entity_reference_of").collect::<Vec<_>>()),
        ["Protein_EGFR", "Protein_EGFR_pY1068"]
    );

    let dimer = model.lookup("Complex_EGFR_dimer").unwrap();
    assert_eq!(
        ids(&model, &model.inverse(dimer, "controller_of").collect::<Vec<_>>()),
        ["Catalysis_1"]
    );
}

#[test]
fn test_query_paths() {
    let codec = ModelCodec::default();
    let model = codec.parse(EGFR).unwrap();

    let dimer = model.lookup("Complex_EGFR_dimer").unwrap();
    let members = codec.query(&model, dimer, "member_physical_entity*").unwrap();
    assert_eq!(ids(&model, &members), ["Complex_EGFR_EGF", "Protein_EGFR"]);

    let reference = model.lookup("http://identifiers.org/uniprot/P00533").unwrap();
    let back = codec
        .query(&model, reference, "xref:UnificationXref/xref_of")
        .unwrap();
    assert_eq!(ids(&model, &back), ["http://identifiers.org/uniprot/P00533"]);

    let reactions = codec
        .query(&model, reference, "entity_reference_of/participant_of:BiochemicalReaction")
        .unwrap();
    assert_eq!(ids(&model, &reactions), ["BiochemicalReaction_1", "BiochemicalReaction_1"]);
}

#[test]
fn test_query_errors_carry_the_path() {
    let codec = ModelCodec::default();
    let model = codec.parse(EGFR).unwrap();
    let root = model.lookup("Protein_EGFR").unwrap();

    let err = codec.query(&model, root, "feature:NoSuchType").unwrap_err();
    let BiopaxError::Parse { err, src } = err else {
        panic!("Expected a parse error, got {err:?}");
    };
    assert_eq!(src, "feature:NoSuchType");
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E300));
}

#[test]
fn test_traversal_tools_on_sample() {
    let model = ModelCodec::default().parse(EGFR).unwrap();

    assert_eq!(
        ids(&model, &tools::modification_reactions(&model)),
        ["BiochemicalReaction_1"]
    );
    assert_eq!(ids(&model, &tools::cofactored_catalyses(&model)), ["Catalysis_1"]);

    let active = model.lookup("Protein_EGFR_pY1068").unwrap();
    assert_eq!(
        ids(&model, &tools::modifications(&model, active, "phospho")),
        ["ModificationFeature_Y1068"]
    );
}

#[test]
fn test_round_trip_sample() {
    let codec = ModelCodec::default();
    let model = codec.parse(EGFR).unwrap();

    let owl = codec.render_owl(&model).unwrap();
    let reparsed = codec.parse(&owl).unwrap();

    assert_eq!(snapshot(&reparsed), snapshot(&model));
    assert_eq!(reparsed.xml_base(), model.xml_base());
    assert_eq!(reparsed.inverse_index().len(), model.inverse_index().len());
}

#[test]
fn test_write_and_read_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("egfr.owl");

    let config = AppConfig::new(DecodingConfig::default(), ExportConfig::new(2));
    let codec = ModelCodec::new(config);
    let model = codec.parse(EGFR).unwrap();
    codec.write_owl(&model, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\n  <bp:displayName "));

    let reparsed = codec.parse_file(&path).unwrap();
    assert_eq!(snapshot(&reparsed), snapshot(&model));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let err = ModelCodec::default()
        .parse_file(temp_dir.path().join("absent.owl"))
        .unwrap_err();
    assert!(matches!(err, BiopaxError::Io(_)), "{err:?}");
}

#[test]
fn test_dangling_reference_modes() {
    let lenient = ModelCodec::default();
    let (model, report) = lenient.parse_with_report(DANGLING).unwrap();
    assert_eq!(report.dangling_targets(), ["ProteinReference_P04637"]);
    assert_eq!(
        model.get("Protein_TP53").unwrap().literal("entity_reference"),
        Some("ProteinReference_P04637")
    );

    let strict = ModelCodec::new(AppConfig::new(
        DecodingConfig::new(ResolutionMode::Strict),
        ExportConfig::default(),
    ));
    let err = strict.parse(DANGLING).unwrap_err();
    let BiopaxError::Parse { err, src } = err else {
        panic!("Expected a parse error, got {err:?}");
    };
    assert_eq!(src, DANGLING);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
}

fn complex_model(names: &[String], edges: &[(usize, usize)]) -> Model {
    let mut model = Model::new("http://example.org/generated#");
    let nodes: Vec<_> = (0..names.len())
        .map(|index| model.add_node(&format!("Complex_{index}"), "Complex").unwrap())
        .collect();
    for (node, name) in nodes.iter().zip(names) {
        model
            .push_term(*node, "name", Term::Literal(name.clone()))
            .unwrap();
    }
    for (from, to) in edges {
        model
            .push_term(
                nodes[from % nodes.len()],
                "member_physical_entity",
                Term::Node(nodes[to % nodes.len()]),
            )
            .unwrap();
    }
    model.synthesize_inverses();
    model
}

proptest! {
    #[test]
    fn round_trip_preserves_generated_models(
        names in prop::collection::vec("[ -~]{0,16}", 1..6),
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..12),
    ) {
        let model = complex_model(&names, &edges);
        let codec = ModelCodec::default();

        let owl = codec.render_owl(&model).unwrap();
        let reparsed = codec.parse(&owl).unwrap();

        prop_assert_eq!(snapshot(&reparsed), snapshot(&model));
        prop_assert_eq!(reparsed.inverse_index(), model.inverse_index());
    }

    #[test]
    fn synthesis_is_idempotent(
        edges in prop::collection::vec((0usize..5, 0usize..5), 0..12),
    ) {
        let names = vec!["c".to_string(); 5];
        let mut model = complex_model(&names, &edges);
        let first = model.inverse_index().clone();
        model.synthesize_inverses();
        prop_assert_eq!(model.inverse_index(), &first);
    }
}
