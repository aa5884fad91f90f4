//! Path query evaluation.
//!
//! A path such as `participant_of/controller:Protein` is parsed into a
//! [`PathQuery`] by the parser crate, then walked here segment by segment:
//!
//! 1. Each segment fetches an attribute from every node in the working set.
//!    Forward attributes contribute their node references; inverse attribute
//!    names read the synthesized inverse index. Names that are neither yield
//!    nothing.
//! 2. A transitive segment (`attr*`) keeps fetching the same attribute
//!    breadth-first until no new node appears.
//! 3. A type filter (`attr:Type`) keeps nodes of that type or a subtype.
//!
//! Each surviving node continues with the remaining segments on its own, and
//! the per-branch results are concatenated in discovery order. Duplicates
//! reached through different branches are kept.

use std::collections::VecDeque;

use indexmap::IndexSet;
use log::trace;

use biopax_core::{
    model::{Model, NodeRef},
    schema::Schema,
    symbol::Symbol,
};
use biopax_parser::{ParseError, PathQuery, Segment, parse_path};

/// Parses `path` and evaluates it from `root`.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed paths (`E301`) and for type
/// constraints that name no schema type (`E300`). A well-formed path that
/// reaches nothing is not an error.
///
/// # Examples
///
/// ```
/// use biopax::{model::{Model, Term}, query::find_objects};
///
/// let mut model = Model::default();
/// let protein = model.add_node("P1", "Protein").unwrap();
/// let reference = model.add_node("PR1", "ProteinReference").unwrap();
/// model.push_term(protein, "entity_reference", Term::Node(reference)).unwrap();
///
/// assert_eq!(find_objects(&model, protein, "entity_reference").unwrap(), [reference]);
/// assert!(find_objects(&model, protein, "entity_reference:NoSuchType").is_err());
/// ```
pub fn find_objects(model: &Model, root: NodeRef, path: &str) -> Result<Vec<NodeRef>, ParseError> {
    let query = parse_path(path)?;
    Ok(evaluate(model, root, &query))
}

/// Evaluates an already parsed query from `root`.
pub fn evaluate(model: &Model, root: NodeRef, query: &PathQuery) -> Vec<NodeRef> {
    let mut results = Vec::new();
    walk(model, root, query.segments(), &mut results);
    trace!(query:% = query, results = results.len(); "Evaluated path query");
    results
}

fn walk(model: &Model, node: NodeRef, segments: &[Segment], results: &mut Vec<NodeRef>) {
    let Some((segment, rest)) = segments.split_first() else {
        results.push(node);
        return;
    };
    for next in step(model, node, segment) {
        walk(model, next, rest, results);
    }
}

/// Nodes reached from `node` by a single segment.
fn step(model: &Model, node: NodeRef, segment: &Segment) -> Vec<NodeRef> {
    // An attribute name nobody ever interned cannot be on any node.
    let Some(attribute) = Symbol::lookup(segment.attribute()) else {
        return Vec::new();
    };

    let mut reached = fetch(model, node, attribute);
    if segment.is_transitive() {
        reached = closure(model, reached, attribute);
    }
    if let Some(filter) = segment.type_filter() {
        reached.retain(|candidate| {
            model
                .node(*candidate)
                .is_some_and(|found| found.type_tag().is_a(filter))
        });
    }
    reached
}

fn fetch(model: &Model, node: NodeRef, attribute: Symbol) -> Vec<NodeRef> {
    if Schema::biopax().is_inverse_attribute(attribute) {
        return model.inverse_index().get(node, attribute).collect();
    }
    model
        .node(node)
        .map(|found| found.get(attribute).nodes().collect())
        .unwrap_or_default()
}

/// Breadth-first closure of `seeds` over `attribute`. Terminates on cycles.
fn closure(model: &Model, seeds: Vec<NodeRef>, attribute: Symbol) -> Vec<NodeRef> {
    let mut seen = IndexSet::new();
    let mut queue = VecDeque::from(seeds);
    while let Some(node) = queue.pop_front() {
        if seen.insert(node) {
            queue.extend(fetch(model, node, attribute));
        }
    }
    seen.into_iter().collect()
}
