//! Inverse-link synthesis.
//!
//! Forward references (`entity_reference`, `xref`, `left`, ...) are the only
//! links stored on nodes. Their inverses (`entity_reference_of`, `xref_of`,
//! `participant_of`, ...) live in an [`InverseIndex`] that is rebuilt from
//! scratch by [`synthesize`], so it can never drift from the forward graph.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::{
    model::{Model, NodeRef},
    schema::Schema,
    symbol::Symbol,
};

/// Derived back-references, keyed by target node and inverse attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseIndex {
    links: IndexMap<NodeRef, IndexMap<Symbol, IndexSet<NodeRef>>>,
}

impl InverseIndex {
    /// Nodes linking to `target` through the inverse attribute `name`, in
    /// discovery order.
    pub fn get(&self, target: NodeRef, name: Symbol) -> impl Iterator<Item = NodeRef> + '_ {
        self.links
            .get(&target)
            .and_then(|by_name| by_name.get(&name))
            .into_iter()
            .flat_map(|sources| sources.iter().copied())
    }

    /// Whether `source` is recorded under `target`'s inverse attribute `name`.
    pub fn contains(&self, target: NodeRef, name: Symbol, source: NodeRef) -> bool {
        self.links
            .get(&target)
            .and_then(|by_name| by_name.get(&name))
            .is_some_and(|sources| sources.contains(&source))
    }

    /// Inverse attributes populated on `target`.
    pub fn names(&self, target: NodeRef) -> impl Iterator<Item = Symbol> + '_ {
        self.links
            .get(&target)
            .into_iter()
            .flat_map(|by_name| by_name.keys().copied())
    }

    /// Total number of recorded links.
    pub fn len(&self) -> usize {
        self.links
            .values()
            .flat_map(IndexMap::values)
            .map(IndexSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, target: NodeRef, name: Symbol, source: NodeRef) {
        self.links
            .entry(target)
            .or_default()
            .entry(name)
            .or_default()
            .insert(source);
    }
}

/// Builds the inverse index of a model.
///
/// For every node `a` and every forward attribute `attr` holding a resolved
/// reference to `b`, `a` is added to `b`'s inverse set for the inverse name of
/// `attr`, provided `b`'s type declares that inverse. Cycles and self-loops
/// need no special treatment since the sets deduplicate.
pub fn synthesize(model: &Model) -> InverseIndex {
    let schema = Schema::biopax();
    let mut index = InverseIndex::default();

    for (source, node) in model.iter() {
        for (attribute, value) in node.attributes() {
            let mut targets = value.nodes().peekable();
            // Literal-only attributes have no inverse to name.
            if targets.peek().is_none() {
                continue;
            }
            let inverse = schema.inverse_name(attribute);
            for target in targets {
                let Some(target_node) = model.node(target) else {
                    continue;
                };
                if target_node.type_tag().descriptor().declares_inverse(inverse) {
                    index.insert(target, inverse, source);
                }
            }
        }
    }

    debug!(links = index.len(); "Synthesized inverse links");
    index
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::{AttributeValue, Term};

    fn reaction_model() -> (Model, NodeRef, NodeRef, NodeRef) {
        let mut model = Model::default();
        let reaction = model.add_node("R", "BiochemicalReaction").unwrap();
        let a = model.add_node("A", "Protein").unwrap();
        let b = model.add_node("B", "SmallMolecule").unwrap();
        model.push_term(reaction, "left", Term::Node(a)).unwrap();
        model.push_term(reaction, "right", Term::Node(b)).unwrap();
        (model, reaction, a, b)
    }

    #[test]
    fn test_left_and_right_invert_to_participant_of() {
        let (mut model, reaction, a, b) = reaction_model();
        model.synthesize_inverses();

        assert_eq!(model.inverse(a, "participant_of").collect::<Vec<_>>(), [reaction]);
        assert_eq!(model.inverse(b, "participant_of").collect::<Vec<_>>(), [reaction]);
        assert_eq!(model.inverse(a, "left_of").count(), 0);
    }

    #[test]
    fn test_literal_attributes_do_not_name_inverses() {
        let mut model = Model::default();
        let protein = model.add_node("P", "Protein").unwrap();
        model
            .push_term(protein, "curator_remark", Term::Literal("checked".to_string()))
            .unwrap();
        model.synthesize_inverses();

        assert!(Symbol::lookup("curator_remark").is_some());
        assert!(Symbol::lookup("curator_remark_of").is_none());
    }

    #[test]
    fn test_undeclared_inverse_is_skipped() {
        let mut model = Model::default();
        let interaction = model.add_node("I", "MolecularInteraction").unwrap();
        let vocab = model.add_node("V", "InteractionVocabulary").unwrap();
        model
            .push_term(interaction, "interaction_type", Term::Node(vocab))
            .unwrap();
        model.synthesize_inverses();

        assert!(model.inverse_index().is_empty());
    }

    #[test]
    fn test_forward_attributes_untouched() {
        let (mut model, reaction, a, _) = reaction_model();
        let before = model[reaction].attribute("left").clone();
        model.synthesize_inverses();

        assert_eq!(model[reaction].attribute("left"), &before);
        assert!(model[a].attribute("participant_of").is_absent());
    }

    #[test]
    fn test_self_loop_and_cycle() {
        let mut model = Model::default();
        let c1 = model.add_node("C1", "Complex").unwrap();
        let c2 = model.add_node("C2", "Complex").unwrap();
        model.push_term(c1, "member_physical_entity", Term::Node(c2)).unwrap();
        model.push_term(c2, "member_physical_entity", Term::Node(c1)).unwrap();
        model.push_term(c1, "component", Term::Node(c1)).unwrap();
        model.synthesize_inverses();

        assert_eq!(
            model.inverse(c1, "member_physical_entity_of").collect::<Vec<_>>(),
            [c2]
        );
        assert_eq!(model.inverse(c1, "component_of").collect::<Vec<_>>(), [c1]);
    }

    #[test]
    fn test_duplicate_references_deduplicated() {
        let mut model = Model::default();
        let protein = model.add_node("P", "Protein").unwrap();
        let xref = model.add_node("X", "UnificationXref").unwrap();
        model
            .set_attribute(
                protein,
                "xref",
                AttributeValue::List(vec![Term::Node(xref), Term::Node(xref)]),
            )
            .unwrap();
        model.synthesize_inverses();

        assert_eq!(model.inverse(xref, "xref_of").collect::<Vec<_>>(), [protein]);
    }

    #[test]
    fn test_dangling_literals_ignored() {
        let mut model = Model::default();
        let protein = model.add_node("P", "Protein").unwrap();
        model
            .push_term(protein, "xref", Term::Literal("missing".into()))
            .unwrap();
        model.synthesize_inverses();
        assert!(model.inverse_index().is_empty());
    }

    proptest! {
        #[test]
        fn synthesis_is_idempotent(edges in prop::collection::vec((0usize..6, 0usize..6), 0..24)) {
            let mut model = Model::default();
            let nodes: Vec<NodeRef> = (0..6)
                .map(|i| model.add_node(&format!("C{i}"), "Complex").unwrap())
                .collect();
            for (from, to) in edges {
                model
                    .push_term(nodes[from], "component", Term::Node(nodes[to]))
                    .unwrap();
            }

            model.synthesize_inverses();
            let first = model.inverse_index().clone();
            model.synthesize_inverses();
            prop_assert_eq!(&first, model.inverse_index());

            // Every forward edge has its inverse.
            for (source, node) in model.iter() {
                for target in node.attribute("component").nodes() {
                    prop_assert!(first.contains(target, Symbol::new("component_of"), source));
                }
            }
        }
    }
}
