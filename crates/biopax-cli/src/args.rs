//! Command-line argument definitions for the BioPAX CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the optional path
//! query, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the BioPAX tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input BioPAX document
    #[arg(help = "Path to the input RDF/XML file")]
    pub input: String,

    /// Path to the re-encoded output document
    #[arg(short, long, default_value = "out.owl")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Id of the object a path query starts from
    #[arg(long, requires = "path")]
    pub root: Option<String>,

    /// Path query to evaluate from `--root`, e.g. `xref:UnificationXref/xref_of`
    #[arg(long, requires = "root")]
    pub path: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
