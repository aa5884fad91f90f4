//! # BioPAX Parser
//!
//! Reader for BioPAX Level 3 RDF/XML documents and for the attribute-path
//! query language. This crate provides the pipeline from source text to a
//! resolved [`Model`].
//!
//! ## Usage
//!
//! ```
//! # use biopax_parser::{parse, DecodeConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r##"
//!         <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!                  xmlns:bp="http://www.biopax.org/release/biopax-level3.owl#">
//!           <bp:Protein rdf:ID="Protein_1">
//!             <bp:displayName>EGFR</bp:displayName>
//!             <bp:entityReference rdf:resource="#ProteinReference_1"/>
//!           </bp:Protein>
//!           <bp:ProteinReference rdf:ID="ProteinReference_1"/>
//!         </rdf:RDF>
//!     "##;
//!
//!     let model = parse(source, DecodeConfig::default())?;
//!     assert_eq!(model.len(), 2);
//!     Ok(())
//! }
//! ```

mod decode;
pub mod error;
mod path;
#[cfg(test)]
mod parser_tests;
mod resolve;
mod span;
pub mod xml;

pub use decode::DecodeConfig;
pub use error::ParseError;
pub use path::{PathQuery, Segment, parse_path};
pub use resolve::{DanglingReference, ResolveReport, resolve};
pub use span::Span;

use biopax_core::model::{Model, ResolutionMode};

use decode::{Decoded, Decoder};

/// Parse a document into a resolved model.
///
/// This is the main entry point for reading BioPAX documents. It runs the
/// complete pipeline:
///
/// 1. **Read** - Build a namespace-expanded element tree
/// 2. **Decode** - Turn object elements into nodes with placeholder references
/// 3. **Resolve** - Replace placeholders with node handles
///
/// Inverse links are not synthesized here; see
/// [`Model::synthesize_inverses`].
///
/// # Errors
///
/// Returns a [`ParseError`] carrying every diagnostic of the first phase that
/// failed.
pub fn parse(source: &str, config: DecodeConfig) -> Result<Model, ParseError> {
    parse_with_report(source, config).map(|(model, _)| model)
}

/// Like [`parse`], also returning the references that did not resolve.
///
/// # Errors
///
/// Same as [`parse`]. In [`ResolutionMode::Strict`] any dangling reference
/// is an error.
pub fn parse_with_report(
    source: &str,
    config: DecodeConfig,
) -> Result<(Model, ResolveReport), ParseError> {
    // Step 1: Read
    let root = xml::read_document(source)?;

    // Step 2: Decode
    let Decoded {
        mut model,
        reference_spans,
    } = Decoder::new().decode(&root)?;

    // Step 3: Resolve
    let report = resolve::resolve(&mut model);
    if config.resolution() == ResolutionMode::Strict && !report.is_empty() {
        return Err(resolve::dangling_diagnostics(&report, &reference_spans).into());
    }

    Ok((model, report))
}
