//! BioPAX - Reading, querying and writing BioPAX Level 3 models.
//!
//! Documents are decoded from RDF/XML into a [`model::Model`], their
//! references resolved and their inverse links synthesized. Models can be
//! walked with a small path language and written back to RDF/XML.

pub mod config;
pub mod export;
pub mod query;
pub mod tools;

mod error;

pub use biopax_core::{capability, inverse, model, namespace, schema, symbol};
pub use biopax_parser::{DanglingReference, ResolveReport};

pub use error::BiopaxError;

use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use log::{debug, info, trace, warn};

use config::AppConfig;
use export::{Exporter, owl::OwlWriter};
use model::{Model, NodeRef};

/// Codec for decoding, querying and encoding BioPAX models.
///
/// # Examples
///
/// ```rust
/// use biopax::{ModelCodec, config::AppConfig};
///
/// let source = r##"<rdf:RDF
///     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
///     xmlns:bp="http://www.biopax.org/release/biopax-level3.owl#">
///   <bp:Protein rdf:ID="Protein_1">
///     <bp:entityReference rdf:resource="#ProteinReference_1"/>
///   </bp:Protein>
///   <bp:ProteinReference rdf:ID="ProteinReference_1"/>
/// </rdf:RDF>"##;
///
/// let codec = ModelCodec::new(AppConfig::default());
/// let model = codec.parse(source).expect("Failed to parse");
///
/// let reference = model.lookup("ProteinReference_1").unwrap();
/// let proteins = codec
///     .query(&model, reference, "entity_reference_of")
///     .expect("Failed to query");
/// assert_eq!(proteins, [model.lookup("Protein_1").unwrap()]);
///
/// let owl = codec.render_owl(&model).expect("Failed to render");
/// assert!(owl.contains(r##"<bp:entityReference rdf:resource="#ProteinReference_1" />"##));
/// ```
#[derive(Default)]
pub struct ModelCodec {
    config: AppConfig,
}

impl ModelCodec {
    /// Create a new codec with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including decode and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode an RDF/XML document into a model with inverse links.
    ///
    /// # Errors
    ///
    /// Returns [`BiopaxError::Parse`] for malformed XML, unknown types,
    /// objects without identity, duplicate ids, and (in strict mode) references
    /// to objects missing from the document.
    pub fn parse(&self, source: &str) -> Result<Model, BiopaxError> {
        self.parse_with_report(source).map(|(model, _)| model)
    }

    /// Like [`ModelCodec::parse`], also returning the references that had to
    /// be kept as literal ids because their target was missing.
    ///
    /// # Errors
    ///
    /// Same as [`ModelCodec::parse`].
    pub fn parse_with_report(&self, source: &str) -> Result<(Model, ResolveReport), BiopaxError> {
        info!(bytes = source.len(); "Decoding document");

        let (mut model, report) =
            biopax_parser::parse_with_report(source, self.config.decode().to_decode_config())
                .map_err(|err| BiopaxError::new_parse_error(err, source))?;

        if !report.is_empty() {
            warn!(
                references = report.dangling().len(),
                targets = report.dangling_targets().len();
                "Kept references to missing objects as literal ids"
            );
        }

        model.synthesize_inverses();
        debug!(nodes = model.len(), inverse_links = model.inverse_index().len(); "Model ready");
        trace!(model:?; "Decoded model");

        Ok((model, report))
    }

    /// Read and decode a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`BiopaxError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`ModelCodec::parse`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Model, BiopaxError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading document");
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }

    /// Encode a model as an RDF/XML string.
    ///
    /// Inverse links are not written; they are rebuilt when the document is
    /// decoded again.
    ///
    /// # Errors
    ///
    /// Returns [`BiopaxError::Export`] if a node refers to a handle that is not
    /// part of `model`.
    pub fn render_owl(&self, model: &Model) -> Result<String, BiopaxError> {
        let mut writer = OwlWriter::new(Vec::new()).with_indent(self.config.export().indent());
        writer.export_model(model)?;
        let owl = String::from_utf8(writer.into_inner())
            .map_err(|err| BiopaxError::Export(Box::new(err)))?;

        info!(nodes = model.len(), bytes = owl.len(); "Model encoded");
        Ok(owl)
    }

    /// Encode a model as RDF/XML into the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BiopaxError::Io`] if the file cannot be created, and
    /// [`BiopaxError::Export`] for encoding or write failures.
    pub fn write_owl(&self, model: &Model, path: impl AsRef<Path>) -> Result<(), BiopaxError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer =
            OwlWriter::new(BufWriter::new(file)).with_indent(self.config.export().indent());
        writer.export_model(model)?;

        info!(nodes = model.len(), path:? = path; "Model written");
        Ok(())
    }

    /// Evaluate a path query from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`BiopaxError::Parse`] carrying the path text when the path is
    /// malformed or names an unknown type.
    pub fn query(
        &self,
        model: &Model,
        root: NodeRef,
        path: &str,
    ) -> Result<Vec<NodeRef>, BiopaxError> {
        let found = query::find_objects(model, root, path)
            .map_err(|err| BiopaxError::new_parse_error(err, path))?;
        debug!(path, matches = found.len(); "Path query evaluated");
        Ok(found)
    }
}
