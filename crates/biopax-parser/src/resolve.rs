//! Reference resolution.
//!
//! Replaces every [`Term::Unresolved`] placeholder left by the decoder with a
//! handle to the node it names. Targets missing from the document are kept
//! as literal ids and reported.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use thiserror::Error;

use biopax_core::{
    model::{Model, NodeRef, Term},
    symbol::Symbol,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// A reference whose target is not defined in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{node}.{attribute}` refers to undefined object `{target}`")]
pub struct DanglingReference {
    node: String,
    attribute: String,
    target: String,
}

impl DanglingReference {
    /// Id of the node holding the reference.
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The id that could not be found.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    dangling: Vec<DanglingReference>,
}

impl ResolveReport {
    /// Dangling references in document order.
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    pub fn is_empty(&self) -> bool {
        self.dangling.is_empty()
    }

    /// Distinct dangling target ids in order of first appearance.
    pub fn dangling_targets(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.dangling
            .iter()
            .map(DanglingReference::target)
            .filter(|target| seen.insert(*target))
            .collect()
    }
}

/// Resolves all placeholders in one pass over the node table.
///
/// Dangling targets become [`Term::Literal`]s holding the target id.
pub fn resolve(model: &mut Model) -> ResolveReport {
    let mut report = ResolveReport::default();
    let mut updates: Vec<(NodeRef, Symbol, usize, Term)> = Vec::new();

    for (node_ref, node) in model.iter() {
        for (name, value) in node.attributes() {
            for (position, term) in value.terms().iter().enumerate() {
                let Term::Unresolved(target) = term else {
                    continue;
                };
                let resolved = match model.lookup(target) {
                    Some(target) => Term::Node(target),
                    None => {
                        report.dangling.push(DanglingReference {
                            node: node.id().to_string(),
                            attribute: name.to_string(),
                            target: target.clone(),
                        });
                        Term::Literal(target.clone())
                    }
                };
                updates.push((node_ref, name, position, resolved));
            }
        }
    }

    debug!(references = updates.len(); "Resolving references");
    for (node_ref, name, position, resolved) in updates {
        if let Some(value) = model
            .node_mut(node_ref)
            .and_then(|node| node.get_mut(name))
        {
            if let Some(term) = value.terms_mut().get_mut(position) {
                *term = resolved;
            }
        }
    }

    for target in report.dangling_targets() {
        warn!(id = target; "Dangling reference kept as a literal id");
    }
    report
}

/// One `E200` diagnostic per dangling target, labelled at the first
/// `rdf:resource` that names it.
pub(crate) fn dangling_diagnostics(
    report: &ResolveReport,
    reference_spans: &HashMap<String, Span>,
) -> Vec<Diagnostic> {
    report
        .dangling_targets()
        .into_iter()
        .map(|target| {
            let span = reference_spans.get(target).copied().unwrap_or_default();
            Diagnostic::error(format!("reference to undefined object `{target}`"))
                .with_code(ErrorCode::E200)
                .with_label(span, ErrorCode::E200.description())
                .with_help("define the object in this document or use lenient resolution")
        })
        .collect()
}
