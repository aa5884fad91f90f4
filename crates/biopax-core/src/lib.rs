//! BioPAX Core Types and Definitions
//!
//! This crate provides the foundational types shared by the BioPAX codec
//! crates. It includes:
//!
//! - **Symbols**: String-interned attribute names ([`symbol::Symbol`])
//! - **Namespaces**: Wire-format namespace URIs and naming helpers ([`namespace`] module)
//! - **Schema**: The static BioPAX Level 3 type table ([`schema::Schema`])
//! - **Model**: The resolved object graph ([`model::Model`])
//! - **Inverse links**: Derived back-references ([`inverse`] module)
//! - **Capabilities**: Views over the naming/xref/evidence mixins ([`capability`] module)

pub mod capability;
pub mod inverse;
pub mod model;
pub mod namespace;
pub mod schema;
pub mod symbol;
