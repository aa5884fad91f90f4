//! The BioPAX type schema.
//!
//! Every dynamic decision in the codec (which Rust-side shape an attribute
//! takes, which datatype a literal is written with, which inverse link a
//! reference produces, whether a node satisfies a `:Type` path filter) is
//! driven by this table instead of by reflection.
//!
//! The raw data lives in [`catalog`] as a flat list of [`TypeDef`]s that name
//! their parent type and their [`Capability`] mixins. [`Schema`] flattens that
//! list once into [`TypeDescriptor`]s holding the full, ordered attribute list
//! of each type:
//!
//! 1. attributes of the root type, then of each ancestor down to the type;
//! 2. within one type, capability attributes come before its own attributes.
//!
//! That order is the order in which the encoder writes properties.

pub mod catalog;

use std::{collections::HashMap, fmt, sync::OnceLock};

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::{namespace::Datatype, symbol::Symbol};

/// Returned when a type name has no entry in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a BioPAX type")]
pub struct UnknownType(pub String);

/// The declared shape of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// A single literal.
    Literal(Datatype),
    /// An ordered list of literals.
    LiteralList(Datatype),
    /// A single reference to another node.
    Reference,
    /// An ordered list of references.
    ReferenceList,
}

impl AttributeKind {
    /// Whether values of this attribute are stored as lists.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::LiteralList(_) | Self::ReferenceList)
    }

    /// Whether the attribute points at other nodes.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference | Self::ReferenceList)
    }

    /// Datatype used when writing literals of this attribute.
    pub fn datatype(&self) -> Datatype {
        match self {
            Self::Literal(datatype) | Self::LiteralList(datatype) => *datatype,
            Self::Reference | Self::ReferenceList => Datatype::String,
        }
    }
}

/// A capability mixin shared by unrelated branches of the type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Carries `xref`.
    XReferrable,
    /// Carries `display_name`, `standard_name` and `name`; implies
    /// [`Capability::XReferrable`].
    Named,
    /// Carries `evidence`.
    Observable,
    /// Can act as the controller of a control interaction.
    Controller,
}

impl Capability {
    /// Capabilities pulled in by this one.
    pub fn implied(&self) -> &'static [Capability] {
        match self {
            Self::Named => &[Capability::XReferrable],
            Self::XReferrable | Self::Observable | Self::Controller => &[],
        }
    }

    /// Attributes contributed by this capability.
    pub fn attributes(&self) -> &'static [AttributeDef] {
        match self {
            Self::XReferrable => catalog::XREFERRABLE,
            Self::Named => catalog::NAMED,
            Self::Observable => catalog::OBSERVABLE,
            Self::Controller => &[],
        }
    }

    /// Inverse attributes declared by this capability.
    pub fn inverses(&self) -> &'static [&'static str] {
        match self {
            Self::Controller => &["controller_of"],
            Self::XReferrable | Self::Named | Self::Observable => &[],
        }
    }
}

/// A raw attribute entry of the catalog.
#[derive(Debug, Clone, Copy)]
pub struct AttributeDef {
    pub name: &'static str,
    pub kind: AttributeKind,
}

/// A raw type entry of the catalog.
#[derive(Debug, Clone, Copy)]
pub struct TypeDef {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub capabilities: &'static [Capability],
    pub attributes: &'static [AttributeDef],
    pub inverses: &'static [&'static str],
}

/// A flattened attribute of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    name: Symbol,
    kind: AttributeKind,
}

impl AttributeSpec {
    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }
}

/// Everything the codec needs to know about one concrete type.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: &'static str,
    /// The type itself followed by its ancestors, nearest first.
    lineage: Vec<&'static str>,
    capabilities: IndexSet<Capability>,
    attributes: IndexMap<Symbol, AttributeSpec>,
    inverses: IndexSet<Symbol>,
}

impl TypeDescriptor {
    /// The type name as written on the wire.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The direct parent type, if any.
    pub fn parent(&self) -> Option<&'static str> {
        self.lineage.get(1).copied()
    }

    /// Returns true if this type is `ancestor` or derives from it.
    pub fn is_a(&self, ancestor: &str) -> bool {
        self.lineage.iter().any(|name| *name == ancestor)
    }

    /// Whether the type carries the given capability.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Declared attribute with the given name.
    pub fn attribute(&self, name: Symbol) -> Option<&AttributeSpec> {
        self.attributes.get(&name)
    }

    /// Declared forward attributes in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.values()
    }

    /// Whether the type declares the inverse attribute `name`.
    pub fn declares_inverse(&self, name: Symbol) -> bool {
        self.inverses.contains(&name)
    }

    /// Declared inverse attributes.
    pub fn inverses(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.inverses.iter().copied()
    }

    /// The inverse attribute a reference through `forward` lands in when it
    /// targets a node of this type, if this type declares one.
    pub fn inverse_for(&self, forward: Symbol) -> Option<Symbol> {
        let name = inverse_name(forward);
        self.declares_inverse(name).then_some(name)
    }
}

/// A cheap, `Copy` handle to a type of the built-in schema.
#[derive(Clone, Copy)]
pub struct TypeTag(&'static TypeDescriptor);

impl TypeTag {
    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.0
    }

    /// Returns true if this type is `other` or derives from it.
    pub fn is_a(&self, other: TypeTag) -> bool {
        self.0.is_a(other.name())
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for TypeTag {}

impl std::hash::Hash for TypeTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

/// Name of the inverse attribute produced by a forward reference attribute.
///
/// `left` and `right` both invert to `participant_of`; every other attribute
/// `x` inverts to `x_of`.
pub fn inverse_name(forward: Symbol) -> Symbol {
    static PARTICIPANT_OF: OnceLock<(Symbol, Symbol, Symbol)> = OnceLock::new();
    let (left, right, participant_of) = *PARTICIPANT_OF.get_or_init(|| {
        (
            Symbol::new("left"),
            Symbol::new("right"),
            Symbol::new("participant_of"),
        )
    });
    if forward == left || forward == right {
        participant_of
    } else {
        forward.with_suffix("_of")
    }
}

/// The flattened type table.
#[derive(Debug)]
pub struct Schema {
    types: IndexMap<&'static str, TypeDescriptor>,
    /// Names of every inverse attribute declared anywhere.
    inverse_names: IndexSet<Symbol>,
    /// Forward attribute → inverse name, for every declared reference attribute.
    inverse_of: HashMap<Symbol, Symbol>,
}

impl Schema {
    /// The BioPAX Level 3 schema, built on first use.
    pub fn biopax() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::from_catalog(catalog::TYPES).expect("built-in catalog is consistent")
        })
    }

    /// Flattens a catalog into descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownType`] naming the first parent that has no entry in
    /// the catalog, or a type that is its own ancestor.
    pub fn from_catalog(catalog: &[TypeDef]) -> Result<Self, UnknownType> {
        let defs: HashMap<&'static str, &TypeDef> =
            catalog.iter().map(|def| (def.name, def)).collect();

        let mut types = IndexMap::with_capacity(catalog.len());
        let mut inverse_names = IndexSet::new();
        let mut inverse_of = HashMap::new();

        for def in catalog {
            // Walk up to the root; lineage is nearest-first.
            let mut lineage = vec![def.name];
            let mut current = def.parent;
            while let Some(parent) = current {
                if lineage.contains(&parent) {
                    return Err(UnknownType(parent.to_string()));
                }
                let parent_def = defs
                    .get(parent)
                    .ok_or_else(|| UnknownType(parent.to_string()))?;
                lineage.push(parent);
                current = parent_def.parent;
            }

            let mut capabilities = IndexSet::new();
            let mut attributes = IndexMap::new();
            let mut inverses = IndexSet::new();

            for name in lineage.iter().rev() {
                let level = defs[name];
                for capability in level.capabilities {
                    for implied in capability.implied() {
                        add_capability(*implied, &mut capabilities, &mut attributes, &mut inverses);
                    }
                    add_capability(*capability, &mut capabilities, &mut attributes, &mut inverses);
                }
                add_attributes(level.attributes, &mut attributes);
                inverses.extend(level.inverses.iter().map(|name| Symbol::new(name)));
            }

            for spec in attributes.values() {
                if spec.kind.is_reference() {
                    inverse_of
                        .entry(spec.name)
                        .or_insert_with(|| inverse_name(spec.name));
                }
            }
            inverse_names.extend(inverses.iter().copied());

            types.insert(
                def.name,
                TypeDescriptor {
                    name: def.name,
                    lineage,
                    capabilities,
                    attributes,
                    inverses,
                },
            );
        }

        Ok(Self {
            types,
            inverse_names,
            inverse_of,
        })
    }

    /// Looks up a type by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownType`] if the name is not in the schema.
    pub fn descriptor(&self, name: &str) -> Result<&TypeDescriptor, UnknownType> {
        self.types
            .get(name)
            .ok_or_else(|| UnknownType(name.to_string()))
    }

    /// Whether `name` is a type of this schema.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns true if type `name` is `ancestor` or derives from it.
    ///
    /// Unknown names are never related to anything.
    pub fn is_a(&self, name: &str, ancestor: &str) -> bool {
        self.types
            .get(name)
            .is_some_and(|descriptor| descriptor.is_a(ancestor))
    }

    /// Whether some type declares `name` as an inverse attribute.
    pub fn is_inverse_attribute(&self, name: Symbol) -> bool {
        self.inverse_names.contains(&name)
    }

    /// The inverse name for a forward reference attribute.
    pub fn inverse_name(&self, forward: Symbol) -> Symbol {
        self.inverse_of
            .get(&forward)
            .copied()
            .unwrap_or_else(|| inverse_name(forward))
    }

    /// All descriptors in catalog order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Schema {
    /// Returns a [`TypeTag`] for a type of the built-in schema.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownType`] if the name is not in the schema.
    pub fn tag(&'static self, name: &str) -> Result<TypeTag, UnknownType> {
        self.descriptor(name).map(TypeTag)
    }
}

fn add_capability(
    capability: Capability,
    capabilities: &mut IndexSet<Capability>,
    attributes: &mut IndexMap<Symbol, AttributeSpec>,
    inverses: &mut IndexSet<Symbol>,
) {
    if capabilities.insert(capability) {
        add_attributes(capability.attributes(), attributes);
        inverses.extend(capability.inverses().iter().map(|name| Symbol::new(name)));
    }
}

fn add_attributes(defs: &[AttributeDef], attributes: &mut IndexMap<Symbol, AttributeSpec>) {
    for def in defs {
        let name = Symbol::new(def.name);
        attributes.insert(
            name,
            AttributeSpec {
                name,
                kind: def.kind,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> &'static Schema {
        Schema::biopax()
    }

    #[test]
    fn test_unknown_type() {
        let err = schema().descriptor("NoSuchType").unwrap_err();
        assert_eq!(err, UnknownType("NoSuchType".to_string()));
        assert_eq!(err.to_string(), "`NoSuchType` is not a BioPAX type");
    }

    #[test]
    fn test_subtype_relation() {
        let schema = schema();
        assert!(schema.is_a("Protein", "Protein"));
        assert!(schema.is_a("Protein", "SimplePhysicalEntity"));
        assert!(schema.is_a("Protein", "Entity"));
        assert!(schema.is_a("UnificationXref", "Xref"));
        assert!(!schema.is_a("Xref", "UnificationXref"));
        assert!(!schema.is_a("Protein", "Interaction"));
        assert!(!schema.is_a("NoSuchType", "Entity"));
    }

    #[test]
    fn test_attribute_kinds_follow_hierarchy() {
        let protein = schema().descriptor("Protein").unwrap();

        let xref = protein.attribute(Symbol::new("xref")).unwrap();
        assert_eq!(xref.kind(), AttributeKind::ReferenceList);

        let display = protein.attribute(Symbol::new("display_name")).unwrap();
        assert_eq!(display.kind(), AttributeKind::Literal(Datatype::String));

        let er = protein.attribute(Symbol::new("entity_reference")).unwrap();
        assert_eq!(er.kind(), AttributeKind::Reference);

        assert!(protein.attribute(Symbol::new("left")).is_none());
    }

    #[test]
    fn test_declared_datatypes() {
        let site = schema().descriptor("SequenceSite").unwrap();
        let position = site.attribute(Symbol::new("sequence_position")).unwrap();
        assert_eq!(position.kind().datatype(), Datatype::Int);

        let pub_xref = schema().descriptor("PublicationXref").unwrap();
        let year = pub_xref.attribute(Symbol::new("year")).unwrap();
        assert_eq!(year.kind(), AttributeKind::Literal(Datatype::Int));
        let author = pub_xref.attribute(Symbol::new("author")).unwrap();
        assert_eq!(author.kind(), AttributeKind::LiteralList(Datatype::String));
    }

    #[test]
    fn test_attribute_order_root_first() {
        let protein = schema().descriptor("Protein").unwrap();
        let names: Vec<String> = protein.attributes().map(|a| a.name().to_string()).collect();

        assert_eq!(names.first().map(String::as_str), Some("comment"));
        let pos = |n: &str| names.iter().position(|x| x == n).unwrap();
        assert!(pos("xref") < pos("display_name"));
        assert!(pos("data_source") < pos("feature"));
        assert!(pos("feature") < pos("entity_reference"));
    }

    #[test]
    fn test_capabilities() {
        let schema = schema();
        let pathway = schema.descriptor("Pathway").unwrap();
        assert!(pathway.has_capability(Capability::Named));
        assert!(pathway.has_capability(Capability::XReferrable));
        assert!(pathway.has_capability(Capability::Controller));

        let vocab = schema.descriptor("CellularLocationVocabulary").unwrap();
        assert!(vocab.has_capability(Capability::XReferrable));
        assert!(!vocab.has_capability(Capability::Named));
    }

    #[test]
    fn test_inverse_conventions() {
        let schema = schema();
        let protein = schema.descriptor("Protein").unwrap();
        assert_eq!(
            protein.inverse_for(Symbol::new("left")),
            Some(Symbol::new("participant_of"))
        );
        assert_eq!(
            protein.inverse_for(Symbol::new("right")),
            Some(Symbol::new("participant_of"))
        );
        assert_eq!(
            protein.inverse_for(Symbol::new("controller")),
            Some(Symbol::new("controller_of"))
        );
        // Vocabularies do not declare `interaction_type_of`.
        let vocab = schema.descriptor("InteractionVocabulary").unwrap();
        assert_eq!(vocab.inverse_for(Symbol::new("interaction_type")), None);

        let xref = schema.descriptor("UnificationXref").unwrap();
        assert_eq!(
            xref.inverse_for(Symbol::new("xref")),
            Some(Symbol::new("xref_of"))
        );
        assert!(schema.is_inverse_attribute(Symbol::new("xref_of")));
        assert!(!schema.is_inverse_attribute(Symbol::new("xref")));
    }

    #[test]
    fn test_inconsistent_catalog_rejected() {
        static BROKEN: &[TypeDef] = &[TypeDef {
            name: "Orphan",
            parent: Some("Missing"),
            capabilities: &[],
            attributes: &[],
            inverses: &[],
        }];
        let err = Schema::from_catalog(BROKEN).unwrap_err();
        assert_eq!(err.0, "Missing");
    }

    #[test]
    fn test_type_tag() {
        let schema = schema();
        let protein = schema.tag("Protein").unwrap();
        let entity = schema.tag("Entity").unwrap();
        assert!(protein.is_a(entity));
        assert!(!entity.is_a(protein));
        assert_eq!(protein.to_string(), "Protein");
        assert_eq!(protein, schema.tag("Protein").unwrap());
        assert!(schema.tag("Bogus").is_err());
    }
}
