//! Views over the capability mixins of a node.
//!
//! Each function returns `None` when the node's type does not carry the
//! capability, so callers can tell "no names" apart from "cannot be named".

use crate::{model::Node, model::NodeRef, schema::Capability};

/// Names carried by a [`Capability::Named`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming<'a> {
    pub display_name: Option<&'a str>,
    pub standard_name: Option<&'a str>,
    /// Plain names, without the display and standard names.
    pub names: Vec<&'a str>,
}

impl<'a> Naming<'a> {
    /// Standard name, display name, then the plain names.
    pub fn all_names(&self) -> Vec<&'a str> {
        self.standard_name
            .into_iter()
            .chain(self.display_name)
            .chain(self.names.iter().copied())
            .collect()
    }

    /// The most readable single name: display name, else standard name,
    /// else the first plain name.
    pub fn preferred(&self) -> Option<&'a str> {
        self.display_name
            .or(self.standard_name)
            .or_else(|| self.names.first().copied())
    }
}

pub fn naming(node: &Node) -> Option<Naming<'_>> {
    has(node, Capability::Named).then(|| Naming {
        display_name: node.literal("display_name"),
        standard_name: node.literal("standard_name"),
        names: node.attribute("name").literals().collect(),
    })
}

/// Cross references of an [`Capability::XReferrable`] node.
pub fn xrefs(node: &Node) -> Option<Vec<NodeRef>> {
    has(node, Capability::XReferrable).then(|| node.attribute("xref").nodes().collect())
}

/// Evidence of an [`Capability::Observable`] node.
pub fn evidence(node: &Node) -> Option<Vec<NodeRef>> {
    has(node, Capability::Observable).then(|| node.attribute("evidence").nodes().collect())
}

/// Whether the node can be the controller of a control interaction.
pub fn is_controller(node: &Node) -> bool {
    has(node, Capability::Controller)
}

fn has(node: &Node, capability: Capability) -> bool {
    node.type_tag().descriptor().has_capability(capability)
}
