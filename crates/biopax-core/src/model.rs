//! The in-memory BioPAX object graph.
//!
//! A [`Model`] owns every [`Node`] in an insertion-ordered table keyed by id.
//! Nodes refer to each other through [`NodeRef`] indices into that table,
//! never through owning pointers, so the reference graph is free to contain
//! cycles.

use std::{fmt, ops::Index, str::FromStr};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    inverse::{self, InverseIndex},
    namespace::DEFAULT_XML_BASE,
    schema::{Schema, TypeTag, UnknownType},
    symbol::Symbol,
};

static ABSENT: AttributeValue = AttributeValue::Absent;

/// Errors raised by the [`Model`] API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error(transparent)]
    UnknownType(#[from] UnknownType),

    #[error("an object with id `{0}` already exists")]
    DuplicateId(String),

    #[error("no object with id `{0}`")]
    UnknownId(String),

    #[error("node handle {0} does not belong to this model")]
    UnknownNode(NodeRef),

    #[error("`{0}` is derived from forward references and cannot be set")]
    DerivedAttribute(String),
}

/// Index of a node within its owning [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Position of the node in the model's table.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Literal text, or the id of a reference that did not resolve.
    Literal(String),
    /// A resolved reference.
    Node(NodeRef),
    /// A reference that has not been resolved yet.
    Unresolved(String),
}

impl Term {
    pub fn as_node(&self) -> Option<NodeRef> {
        match self {
            Self::Node(node) => Some(*node),
            Self::Literal(_) | Self::Unresolved(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Node(_) | Self::Unresolved(_) => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// The value of one attribute of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeValue {
    #[default]
    Absent,
    Single(Term),
    List(Vec<Term>),
}

impl AttributeValue {
    /// All terms in stored order; empty when absent.
    pub fn terms(&self) -> &[Term] {
        match self {
            Self::Absent => &[],
            Self::Single(term) => std::slice::from_ref(term),
            Self::List(terms) => terms,
        }
    }

    pub fn terms_mut(&mut self) -> &mut [Term] {
        match self {
            Self::Absent => &mut [],
            Self::Single(term) => std::slice::from_mut(term),
            Self::List(terms) => terms,
        }
    }

    /// Resolved references, in stored order. Literals are skipped.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.terms().iter().filter_map(Term::as_node)
    }

    /// Literal entries, in stored order.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.terms().iter().filter_map(Term::as_literal)
    }

    /// The first term, if any.
    pub fn first(&self) -> Option<&Term> {
        self.terms().first()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// A typed BioPAX object.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    type_tag: TypeTag,
    attributes: IndexMap<Symbol, AttributeValue>,
}

impl Node {
    pub fn new(id: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            id: id.into(),
            type_tag,
            attributes: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn type_name(&self) -> &'static str {
        self.type_tag.name()
    }

    /// Whether the node's type is `type_name` or derives from it.
    pub fn is_a(&self, type_name: &str) -> bool {
        self.type_tag.descriptor().is_a(type_name)
    }

    /// Value of an attribute, [`AttributeValue::Absent`] if unset.
    pub fn get(&self, name: Symbol) -> &AttributeValue {
        self.attributes.get(&name).unwrap_or(&ABSENT)
    }

    /// Value of an attribute looked up by name.
    pub fn attribute(&self, name: &str) -> &AttributeValue {
        Symbol::lookup(name).map_or(&ABSENT, |name| self.get(name))
    }

    /// First literal of an attribute, if any.
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.attribute(name).literals().next()
    }

    pub fn get_mut(&mut self, name: Symbol) -> Option<&mut AttributeValue> {
        self.attributes.get_mut(&name)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (Symbol, &AttributeValue)> {
        self.attributes.iter().map(|(name, value)| (*name, value))
    }

    /// Replaces the value of an attribute.
    pub fn set(&mut self, name: Symbol, value: AttributeValue) {
        self.attributes.insert(name, value);
    }

    /// Adds a term, appending for list attributes and replacing for singular
    /// ones. Attributes the type does not declare are kept as lists.
    ///
    /// Returns the replaced term when a singular attribute was already set.
    pub fn push(&mut self, name: Symbol, term: Term) -> Option<Term> {
        let is_list = self
            .type_tag
            .descriptor()
            .attribute(name)
            .is_none_or(|spec| spec.kind().is_list());

        let slot = self.attributes.entry(name).or_default();
        if is_list {
            match slot {
                AttributeValue::List(terms) => terms.push(term),
                other => {
                    let mut terms: Vec<Term> = other.terms().to_vec();
                    terms.push(term);
                    *other = AttributeValue::List(terms);
                }
            }
            None
        } else {
            match std::mem::replace(slot, AttributeValue::Single(term)) {
                AttributeValue::Absent => None,
                AttributeValue::Single(previous) => Some(previous),
                AttributeValue::List(mut previous) => previous.pop(),
            }
        }
    }

    /// Whether the type declares `name` as a forward attribute.
    pub fn declares(&self, name: Symbol) -> bool {
        self.type_tag.descriptor().attribute(name).is_some()
    }
}

/// How the resolver treats references whose target is not in the document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Keep the target id as a literal and carry on (default).
    #[default]
    Lenient,
    /// Reject the document.
    Strict,
}

impl FromStr for ResolutionMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err("Unsupported resolution mode"),
        }
    }
}

impl From<ResolutionMode> for &'static str {
    fn from(val: ResolutionMode) -> Self {
        match val {
            ResolutionMode::Lenient => "lenient",
            ResolutionMode::Strict => "strict",
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A BioPAX document held in memory.
#[derive(Debug, Clone)]
pub struct Model {
    xml_base: String,
    nodes: IndexMap<String, Node>,
    inverses: InverseIndex,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_XML_BASE)
    }
}

impl Model {
    /// Creates an empty model with the given `xml:base` provenance string.
    pub fn new(xml_base: impl Into<String>) -> Self {
        Self {
            xml_base: xml_base.into(),
            nodes: IndexMap::new(),
            inverses: InverseIndex::default(),
        }
    }

    pub fn xml_base(&self) -> &str {
        &self.xml_base
    }

    pub fn set_xml_base(&mut self, xml_base: impl Into<String>) {
        self.xml_base = xml_base.into();
    }

    /// Creates an empty node of the given type.
    ///
    /// # Errors
    ///
    /// Fails if the type is not in the schema or the id is already taken.
    pub fn add_node(&mut self, id: &str, type_name: &str) -> Result<NodeRef, ModelError> {
        let type_tag = Schema::biopax().tag(type_name)?;
        self.insert(Node::new(id, type_tag))
    }

    /// Adds a fully built node.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::DuplicateId`] if the id is already taken.
    pub fn insert(&mut self, node: Node) -> Result<NodeRef, ModelError> {
        if self.nodes.contains_key(node.id()) {
            return Err(ModelError::DuplicateId(node.id));
        }
        let (index, _) = self.nodes.insert_full(node.id.clone(), node);
        Ok(NodeRef(index))
    }

    /// Replaces a forward attribute of a node.
    ///
    /// # Errors
    ///
    /// Fails for handles of other models and for inverse attribute names.
    pub fn set_attribute(
        &mut self,
        node: NodeRef,
        name: &str,
        value: AttributeValue,
    ) -> Result<(), ModelError> {
        let name = forward_name(name)?;
        self.node_mut(node)
            .ok_or(ModelError::UnknownNode(node))?
            .set(name, value);
        Ok(())
    }

    /// Adds one term to a forward attribute of a node.
    ///
    /// # Errors
    ///
    /// Same as [`Model::set_attribute`].
    pub fn push_term(&mut self, node: NodeRef, name: &str, term: Term) -> Result<(), ModelError> {
        let name = forward_name(name)?;
        let target = self.node_mut(node).ok_or(ModelError::UnknownNode(node))?;
        if let Some(previous) = target.push(name, term) {
            debug!(
                id = target.id(),
                attribute = name.to_string(),
                previous:?;
                "Replaced singular attribute"
            );
        }
        Ok(())
    }

    pub fn node(&self, node: NodeRef) -> Option<&Node> {
        self.nodes.get_index(node.0).map(|(_, node)| node)
    }

    pub fn node_mut(&mut self, node: NodeRef) -> Option<&mut Node> {
        self.nodes.get_index_mut(node.0).map(|(_, node)| node)
    }

    /// Node with the given id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Handle of the node with the given id.
    pub fn lookup(&self, id: &str) -> Option<NodeRef> {
        self.nodes.get_index_of(id).map(NodeRef)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        self.nodes
            .values()
            .enumerate()
            .map(|(index, node)| (NodeRef(index), node))
    }

    /// Handles of every node whose type is `type_name` or derives from it.
    ///
    /// # Errors
    ///
    /// Fails if the type is not in the schema.
    pub fn objects_by_type(&self, type_name: &str) -> Result<Vec<NodeRef>, ModelError> {
        Schema::biopax().descriptor(type_name)?;
        Ok(self
            .iter()
            .filter(|(_, node)| node.is_a(type_name))
            .map(|(node_ref, _)| node_ref)
            .collect())
    }

    /// Rebuilds every inverse link from the forward references.
    pub fn synthesize_inverses(&mut self) {
        self.inverses = inverse::synthesize(self);
    }

    /// Nodes that reach `node` through the inverse attribute `name`.
    pub fn inverse(&self, node: NodeRef, name: &str) -> impl Iterator<Item = NodeRef> + '_ {
        Symbol::lookup(name)
            .into_iter()
            .flat_map(move |name| self.inverses.get(node, name))
    }

    pub fn inverse_index(&self) -> &InverseIndex {
        &self.inverses
    }

    /// True once no [`Term::Unresolved`] remains anywhere in the model.
    pub fn is_resolved(&self) -> bool {
        self.nodes.values().all(|node| {
            node.attributes
                .values()
                .all(|value| !value.terms().iter().any(Term::is_unresolved))
        })
    }
}

impl Index<NodeRef> for Model {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if the handle does not belong to this model.
    fn index(&self, node: NodeRef) -> &Node {
        &self.nodes[node.0]
    }
}

fn forward_name(name: &str) -> Result<Symbol, ModelError> {
    let symbol = Symbol::new(name);
    if Schema::biopax().is_inverse_attribute(symbol) {
        return Err(ModelError::DerivedAttribute(name.to_string()));
    }
    Ok(symbol)
}
