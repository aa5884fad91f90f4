//! Configuration types for reading and writing BioPAX models.
//!
//! This module provides configuration structures that control how documents
//! are decoded and exported. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining decode and export settings.
//! - [`DecodingConfig`] - Controls the [`ResolutionMode`] for references to missing objects.
//! - [`ExportConfig`] - Controls the layout of written documents.
//!
//! # Example
//!
//! ```
//! # use biopax::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.export().indent(), 1);
//! ```

use serde::Deserialize;

use biopax_core::model::ResolutionMode;
use biopax_parser::DecodeConfig;

/// Top-level application configuration combining decode and export settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decode configuration section.
    #[serde(default)]
    decode: DecodingConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified decode and export configurations.
    pub fn new(decode: DecodingConfig, export: ExportConfig) -> Self {
        Self { decode, export }
    }

    /// Returns the decode configuration.
    pub fn decode(&self) -> &DecodingConfig {
        &self.decode
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// How documents are decoded.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DecodingConfig {
    /// Handling of references to objects missing from the document.
    #[serde(default)]
    resolution: ResolutionMode,
}

impl DecodingConfig {
    pub fn new(resolution: ResolutionMode) -> Self {
        Self { resolution }
    }

    /// Returns the [`ResolutionMode`].
    pub fn resolution(&self) -> ResolutionMode {
        self.resolution
    }

    /// The parser configuration for this section.
    pub fn to_decode_config(&self) -> DecodeConfig {
        DecodeConfig::new(self.resolution)
    }
}

/// Layout of exported documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Spaces of indentation per property level.
    #[serde(default = "default_indent")]
    indent: usize,
}

fn default_indent() -> usize {
    1
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

impl ExportConfig {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Returns the indentation width.
    pub fn indent(&self) -> usize {
        self.indent
    }
}
