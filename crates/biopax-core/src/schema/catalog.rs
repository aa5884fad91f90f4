//! Static BioPAX Level 3 type table.
//!
//! One [`TypeDef`] per concrete or abstract type. Only the attributes a type
//! adds on top of its parent and capabilities are listed here; [`Schema`]
//! flattens the hierarchy.
//!
//! [`Schema`]: super::Schema

use super::{AttributeDef, AttributeKind, Capability, TypeDef};
use crate::namespace::Datatype;

use Capability::{Controller, Named, Observable, XReferrable};

const fn lit(name: &'static str) -> AttributeDef {
    AttributeDef {
        name,
        kind: AttributeKind::Literal(Datatype::String),
    }
}

const fn lit_as(name: &'static str, datatype: Datatype) -> AttributeDef {
    AttributeDef {
        name,
        kind: AttributeKind::Literal(datatype),
    }
}

const fn lits(name: &'static str) -> AttributeDef {
    AttributeDef {
        name,
        kind: AttributeKind::LiteralList(Datatype::String),
    }
}

const fn lits_as(name: &'static str, datatype: Datatype) -> AttributeDef {
    AttributeDef {
        name,
        kind: AttributeKind::LiteralList(datatype),
    }
}

const fn one(name: &'static str) -> AttributeDef {
    AttributeDef {
        name,
        kind: AttributeKind::Reference,
    }
}

const fn many(name: &'static str) -> AttributeDef {
    AttributeDef {
        name,
        kind: AttributeKind::ReferenceList,
    }
}

/// A type that adds nothing to its parent.
const fn leaf(name: &'static str, parent: &'static str) -> TypeDef {
    TypeDef {
        name,
        parent: Some(parent),
        capabilities: &[],
        attributes: &[],
        inverses: &[],
    }
}

pub(crate) const XREFERRABLE: &[AttributeDef] = &[many("xref")];

pub(crate) const NAMED: &[AttributeDef] =
    &[lit("display_name"), lit("standard_name"), lits("name")];

pub(crate) const OBSERVABLE: &[AttributeDef] = &[many("evidence")];

const PROCESS_INVERSES: &[&str] = &["controlled_of", "step_process_of", "pathway_component_of"];

const CONTROLLED_VOCABULARIES: &[&str] = &[
    "ExperimentalFormVocabulary",
    "RelationshipTypeVocabulary",
    "CellularLocationVocabulary",
    "EntityReferenceTypeVocabulary",
    "PhenotypeVocabulary",
    "TissueVocabulary",
    "EvidenceCodeVocabulary",
    "SequenceModificationVocabulary",
    "SequenceRegionVocabulary",
    "InteractionVocabulary",
    "CellVocabulary",
];

/// Every type of the schema, parents before children.
pub const TYPES: &[TypeDef] = &[
    TypeDef {
        name: "BioPaxObject",
        parent: None,
        capabilities: &[],
        attributes: &[lits("comment")],
        inverses: &[],
    },
    // Entities
    TypeDef {
        name: "Entity",
        parent: Some("BioPaxObject"),
        capabilities: &[Observable, Named],
        attributes: &[lit("availability"), many("data_source")],
        inverses: &["participant_of"],
    },
    TypeDef {
        name: "Gene",
        parent: Some("Entity"),
        capabilities: &[],
        attributes: &[one("organism")],
        inverses: &[],
    },
    TypeDef {
        name: "Pathway",
        parent: Some("Entity"),
        capabilities: &[Controller],
        attributes: &[many("pathway_component"), many("pathway_order"), one("organism")],
        inverses: PROCESS_INVERSES,
    },
    TypeDef {
        name: "Process",
        parent: Some("Entity"),
        capabilities: &[],
        attributes: &[],
        inverses: PROCESS_INVERSES,
    },
    TypeDef {
        name: "Interaction",
        parent: Some("Process"),
        capabilities: &[],
        attributes: &[many("participant"), many("interaction_type")],
        inverses: &[],
    },
    leaf("GeneticInteraction", "Interaction"),
    leaf("MolecularInteraction", "Interaction"),
    TypeDef {
        name: "TemplateReaction",
        parent: Some("Interaction"),
        capabilities: &[],
        attributes: &[one("template"), many("product"), lit("template_direction")],
        inverses: &[],
    },
    TypeDef {
        name: "Control",
        parent: Some("Interaction"),
        capabilities: &[],
        attributes: &[lit("control_type"), many("controller"), one("controlled")],
        inverses: &[],
    },
    TypeDef {
        name: "Catalysis",
        parent: Some("Control"),
        capabilities: &[],
        attributes: &[lit("catalysis_direction"), many("cofactor")],
        inverses: &[],
    },
    leaf("TemplateReactionRegulation", "Control"),
    leaf("Modulation", "Control"),
    TypeDef {
        name: "Conversion",
        parent: Some("Interaction"),
        capabilities: &[],
        attributes: &[
            many("left"),
            many("right"),
            lit("conversion_direction"),
            many("participant_stoichiometry"),
            lit("spontaneous"),
        ],
        inverses: &[],
    },
    leaf("ComplexAssembly", "Conversion"),
    TypeDef {
        name: "BiochemicalReaction",
        parent: Some("Conversion"),
        capabilities: &[],
        attributes: &[
            lits_as("delta_s", Datatype::Float),
            lits_as("delta_h", Datatype::Float),
            many("delta_g"),
            many("k_e_q"),
            lits("e_c_number"),
        ],
        inverses: &[],
    },
    leaf("Degradation", "Conversion"),
    leaf("Transport", "Conversion"),
    leaf("TransportWithBiochemicalReaction", "BiochemicalReaction"),
    // Physical entities
    TypeDef {
        name: "PhysicalEntity",
        parent: Some("Entity"),
        capabilities: &[Controller],
        attributes: &[
            many("feature"),
            many("not_feature"),
            many("member_physical_entity"),
            one("cellular_location"),
        ],
        inverses: &["component_of", "member_physical_entity_of"],
    },
    TypeDef {
        name: "SimplePhysicalEntity",
        parent: Some("PhysicalEntity"),
        capabilities: &[],
        attributes: &[one("entity_reference")],
        inverses: &[],
    },
    leaf("Protein", "SimplePhysicalEntity"),
    leaf("SmallMolecule", "SimplePhysicalEntity"),
    leaf("Rna", "SimplePhysicalEntity"),
    leaf("Dna", "SimplePhysicalEntity"),
    leaf("DnaRegion", "SimplePhysicalEntity"),
    leaf("RnaRegion", "SimplePhysicalEntity"),
    TypeDef {
        name: "Complex",
        parent: Some("PhysicalEntity"),
        capabilities: &[],
        attributes: &[many("component"), many("component_stoichiometry")],
        inverses: &[],
    },
    // Utility classes
    leaf("UtilityClass", "BioPaxObject"),
    TypeDef {
        name: "Evidence",
        parent: Some("UtilityClass"),
        capabilities: &[XReferrable],
        attributes: &[many("confidence"), many("evidence_code"), many("experimental_form")],
        inverses: &[],
    },
    TypeDef {
        name: "Provenance",
        parent: Some("UtilityClass"),
        capabilities: &[Named],
        attributes: &[],
        inverses: &[],
    },
    TypeDef {
        name: "EntityFeature",
        parent: Some("UtilityClass"),
        capabilities: &[Observable],
        attributes: &[
            one("owner_entity_reference"),
            one("feature_location"),
            many("member_feature"),
            one("feature_location_type"),
        ],
        inverses: &[
            "feature_of",
            "not_feature_of",
            "entity_feature_of",
            "member_feature_of",
        ],
    },
    TypeDef {
        name: "ModificationFeature",
        parent: Some("EntityFeature"),
        capabilities: &[],
        attributes: &[one("modification_type")],
        inverses: &[],
    },
    leaf("FragmentFeature", "EntityFeature"),
    TypeDef {
        name: "BindingFeature",
        parent: Some("EntityFeature"),
        capabilities: &[],
        attributes: &[one("binds_to"), lit("intra_molecular")],
        inverses: &[],
    },
    TypeDef {
        name: "CovalentBindingFeature",
        parent: Some("BindingFeature"),
        capabilities: &[],
        attributes: &[one("modification_type")],
        inverses: &[],
    },
    TypeDef {
        name: "ChemicalConstant",
        parent: Some("UtilityClass"),
        capabilities: &[],
        attributes: &[
            lit_as("ionic_strength", Datatype::Float),
            lit_as("ph", Datatype::Float),
            lit_as("p_mg", Datatype::Float),
            lit_as("temperature", Datatype::Float),
        ],
        inverses: &[],
    },
    TypeDef {
        name: "DeltaG",
        parent: Some("ChemicalConstant"),
        capabilities: &[],
        attributes: &[lit_as("delta_g_prime0", Datatype::Float)],
        inverses: &[],
    },
    TypeDef {
        name: "KPrime",
        parent: Some("ChemicalConstant"),
        capabilities: &[],
        attributes: &[lit_as("k_prime", Datatype::Float)],
        inverses: &[],
    },
    TypeDef {
        name: "ChemicalStructure",
        parent: Some("UtilityClass"),
        capabilities: &[],
        attributes: &[lit("structure_format"), lit("structure_data")],
        inverses: &[],
    },
    TypeDef {
        name: "BioSource",
        parent: Some("UtilityClass"),
        capabilities: &[Named],
        attributes: &[one("cell_type"), one("tissue"), one("taxon_xref")],
        inverses: &[],
    },
    TypeDef {
        name: "ExperimentalForm",
        parent: Some("UtilityClass"),
        capabilities: &[],
        attributes: &[
            one("experimental_form_entity"),
            many("experimental_form_description"),
            many("experimental_feature"),
        ],
        inverses: &[],
    },
    TypeDef {
        name: "SequenceLocation",
        parent: Some("UtilityClass"),
        capabilities: &[],
        attributes: &[many("region_type")],
        inverses: &[],
    },
    TypeDef {
        name: "SequenceInterval",
        parent: Some("SequenceLocation"),
        capabilities: &[],
        attributes: &[one("sequence_interval_begin"), one("sequence_interval_end")],
        inverses: &[],
    },
    TypeDef {
        name: "SequenceSite",
        parent: Some("SequenceLocation"),
        capabilities: &[],
        attributes: &[
            lit("position_status"),
            lit_as("sequence_position", Datatype::Int),
        ],
        inverses: &[],
    },
    TypeDef {
        name: "PathwayStep",
        parent: Some("UtilityClass"),
        capabilities: &[Observable],
        attributes: &[many("step_process"), many("next_step")],
        inverses: &["next_step_of", "pathway_order_of"],
    },
    TypeDef {
        name: "BiochemicalPathwayStep",
        parent: Some("PathwayStep"),
        capabilities: &[],
        attributes: &[one("step_conversion"), lit("step_direction")],
        inverses: &[],
    },
    TypeDef {
        name: "Xref",
        parent: Some("UtilityClass"),
        capabilities: &[],
        attributes: &[lit("db"), lit("id"), lit("db_version"), lit("id_version")],
        inverses: &["xref_of"],
    },
    TypeDef {
        name: "PublicationXref",
        parent: Some("Xref"),
        capabilities: &[],
        attributes: &[
            lit("title"),
            lits("url"),
            lits("source"),
            lits("author"),
            lit_as("year", Datatype::Int),
        ],
        inverses: &[],
    },
    leaf("UnificationXref", "Xref"),
    TypeDef {
        name: "RelationshipXref",
        parent: Some("Xref"),
        capabilities: &[],
        attributes: &[one("relationship_type")],
        inverses: &[],
    },
    TypeDef {
        name: "Score",
        parent: Some("UtilityClass"),
        capabilities: &[XReferrable],
        attributes: &[one("score_source"), lit("value")],
        inverses: &[],
    },
    TypeDef {
        name: "EntityReference",
        parent: Some("UtilityClass"),
        capabilities: &[Named, Observable],
        attributes: &[
            many("entity_feature"),
            many("entity_reference_type"),
            many("member_entity_reference"),
            many("owner_entity_reference"),
        ],
        inverses: &["entity_reference_of", "member_entity_reference_of"],
    },
    TypeDef {
        name: "SequenceEntityReference",
        parent: Some("EntityReference"),
        capabilities: &[],
        attributes: &[one("organism"), lit("sequence")],
        inverses: &[],
    },
    TypeDef {
        name: "NucleicAcidReference",
        parent: Some("SequenceEntityReference"),
        capabilities: &[],
        attributes: &[many("sub_region")],
        inverses: &[],
    },
    TypeDef {
        name: "NucleicAcidRegionReference",
        parent: Some("NucleicAcidReference"),
        capabilities: &[],
        attributes: &[],
        inverses: &["sub_region_of"],
    },
    leaf("RnaReference", "NucleicAcidReference"),
    leaf("DnaReference", "NucleicAcidReference"),
    leaf("RnaRegionReference", "NucleicAcidRegionReference"),
    leaf("DnaRegionReference", "NucleicAcidRegionReference"),
    leaf("ProteinReference", "SequenceEntityReference"),
    TypeDef {
        name: "SmallMoleculeReference",
        parent: Some("EntityReference"),
        capabilities: &[],
        attributes: &[
            one("structure"),
            lit("chemical_formula"),
            lit_as("molecular_weight", Datatype::Float),
        ],
        inverses: &[],
    },
    TypeDef {
        name: "Stoichiometry",
        parent: Some("UtilityClass"),
        capabilities: &[],
        attributes: &[
            lit_as("stoichiometric_coefficient", Datatype::Float),
            one("physical_entity"),
        ],
        inverses: &[],
    },
    TypeDef {
        name: "ControlledVocabulary",
        parent: Some("UtilityClass"),
        capabilities: &[XReferrable],
        attributes: &[lits("term")],
        inverses: &[],
    },
    leaf(CONTROLLED_VOCABULARIES[0], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[1], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[2], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[3], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[4], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[5], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[6], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[7], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[8], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[9], "ControlledVocabulary"),
    leaf(CONTROLLED_VOCABULARIES[10], "ControlledVocabulary"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_unique() {
        let mut seen = HashSet::new();
        for def in TYPES {
            assert!(seen.insert(def.name), "duplicate type {}", def.name);
        }
    }

    #[test]
    fn test_parents_declared_first() {
        let mut seen = HashSet::new();
        for def in TYPES {
            if let Some(parent) = def.parent {
                assert!(seen.contains(parent), "{} listed before {parent}", def.name);
            }
            seen.insert(def.name);
        }
    }

    #[test]
    fn test_vocabularies_present() {
        for name in CONTROLLED_VOCABULARIES {
            assert!(TYPES.iter().any(|def| def.name == *name), "{name}");
        }
    }

    #[test]
    fn test_only_one_root() {
        let roots: Vec<_> = TYPES.iter().filter(|def| def.parent.is_none()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "BioPaxObject");
    }
}
