//! Traversal helpers for common pathway-analysis questions.
//!
//! These answer questions that come up when mining reaction databases, such
//! as "which reactions only modify a protein" or "which catalyses need a
//! cofactor", on top of the plain attribute accessors of [`Model`].

use std::collections::BTreeSet;

use log::trace;

use biopax_core::model::{Model, Node, NodeRef};

/// `(db, id)` pairs of the xrefs on a simple physical entity's entity
/// reference.
///
/// Empty when the entity has no entity reference. Xrefs missing either their
/// `db` or their `id` are skipped.
pub fn simple_physical_entity_xrefs(model: &Model, entity: NodeRef) -> BTreeSet<(String, String)> {
    let Some(reference) = model
        .node(entity)
        .and_then(|node| node.attribute("entity_reference").nodes().next())
        .and_then(|reference| model.node(reference))
    else {
        return BTreeSet::new();
    };

    reference
        .attribute("xref")
        .nodes()
        .filter_map(|xref| model.node(xref))
        .filter_map(|xref| Some((xref.literal("db")?.to_string(), xref.literal("id")?.to_string())))
        .collect()
}

/// Whether `node` is a biochemical reaction turning one protein into a
/// modified form of itself.
///
/// Both sides must hold exactly one protein, and the two proteins must share
/// at least one `(db, id)` xref on their entity references.
pub fn is_modification_reaction(model: &Model, node: NodeRef) -> bool {
    let Some(reaction) = model.node(node) else {
        return false;
    };
    if !reaction.is_a("BiochemicalReaction") {
        return false;
    }

    let (Some(left), Some(right)) = (
        single_protein(model, reaction, "left"),
        single_protein(model, reaction, "right"),
    ) else {
        return false;
    };

    let left_xrefs = simple_physical_entity_xrefs(model, left);
    let right_xrefs = simple_physical_entity_xrefs(model, right);
    trace!(
        id = reaction.id(),
        left:? = left_xrefs,
        right:? = right_xrefs;
        "Comparing reaction sides"
    );
    !left_xrefs.is_disjoint(&right_xrefs)
}

fn single_protein(model: &Model, reaction: &Node, side: &str) -> Option<NodeRef> {
    let terms = reaction.attribute(side).terms();
    let [term] = terms else {
        return None;
    };
    term.as_node()
        .filter(|entity| model.node(*entity).is_some_and(|node| node.is_a("Protein")))
}

/// Biochemical reactions passing [`is_modification_reaction`], in model order.
pub fn modification_reactions(model: &Model) -> Vec<NodeRef> {
    model
        .iter()
        .filter(|(_, node)| node.is_a("BiochemicalReaction"))
        .map(|(node_ref, _)| node_ref)
        .filter(|node_ref| is_modification_reaction(model, *node_ref))
        .collect()
}

/// Catalyses that have a cofactor and control a biochemical reaction.
pub fn cofactored_catalyses(model: &Model) -> Vec<NodeRef> {
    model
        .iter()
        .filter(|(_, node)| node.is_a("Catalysis"))
        .filter(|(_, node)| !node.attribute("cofactor").is_absent())
        .filter(|(_, node)| {
            node.attribute("controlled")
                .nodes()
                .next()
                .and_then(|controlled| model.node(controlled))
                .is_some_and(|controlled| controlled.is_a("BiochemicalReaction"))
        })
        .map(|(node_ref, _)| node_ref)
        .collect()
}

/// Modification features of `entity` whose modification type has a term
/// containing `needle`, e.g. `"phospho"`.
pub fn modifications(model: &Model, entity: NodeRef, needle: &str) -> Vec<NodeRef> {
    let Some(entity) = model.node(entity) else {
        return Vec::new();
    };

    entity
        .attribute("feature")
        .nodes()
        .filter(|feature| {
            let Some(feature) = model.node(*feature) else {
                return false;
            };
            if !feature.is_a("ModificationFeature") {
                return false;
            }
            feature
                .attribute("modification_type")
                .nodes()
                .filter_map(|vocabulary| model.node(vocabulary))
                .any(|vocabulary| {
                    vocabulary
                        .attribute("term")
                        .literals()
                        .any(|term| term.contains(needle))
                })
        })
        .collect()
}
