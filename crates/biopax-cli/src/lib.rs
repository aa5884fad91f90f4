//! CLI logic for the BioPAX tool.
//!
//! Decodes a document and either re-encodes it or answers a path query
//! against it.

pub mod report;

mod args;
mod config;

pub use args::Args;

use std::io::{self, Write};

use log::info;

use biopax::{BiopaxError, ModelCodec, model::ModelError};

/// Run the BioPAX CLI application, printing query results to stdout.
///
/// # Errors
///
/// Returns `BiopaxError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Decoding errors
/// - Unknown query roots and invalid paths
/// - Encoding errors
pub fn run(args: &Args) -> Result<(), BiopaxError> {
    run_with_output(args, &mut io::stdout().lock())
}

/// Like [`run`], writing query results to `out`.
///
/// Each match is written as one `id<TAB>Type` line.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), BiopaxError> {
    info!(input_path = args.input; "Processing document");

    let app_config = config::load_config(args.config.as_ref())?;
    let codec = ModelCodec::new(app_config);
    let model = codec.parse_file(&args.input)?;
    info!(nodes = model.len(); "Document decoded");

    if let (Some(root_id), Some(path)) = (&args.root, &args.path) {
        let root = model
            .lookup(root_id)
            .ok_or_else(|| ModelError::UnknownId(root_id.clone()))?;
        let found = codec.query(&model, root, path)?;
        for node in found.iter().map(|node| &model[*node]) {
            writeln!(out, "{}\t{}", node.id(), node.type_name())?;
        }
        info!(root = root_id, path, matches = found.len(); "Query evaluated");
        return Ok(());
    }

    codec.write_owl(&model, &args.output)?;
    info!(output_file = args.output; "Document encoded successfully");

    Ok(())
}
