//! Failure reports rendered with miette.
//!
//! A [`BiopaxError::Parse`] may carry several diagnostics, for example one
//! per duplicate id in a document. Each becomes its own [`Report`] pointing
//! into the document (or path) text. Every other error variant becomes a
//! single report without source code, coded by the kind of failure.

use std::{error::Error, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use biopax::BiopaxError;
use biopax_parser::error::{Diagnostic, Label};

/// A single renderable failure.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    help: Option<&'a str>,
    labels: Vec<LabeledSpan>,
    text: Option<&'a str>,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Report<'a> {
    /// A report for one parser diagnostic, with its labels resolved against
    /// `text`.
    pub fn from_diagnostic(diagnostic: &'a Diagnostic, text: &'a str) -> Self {
        Self {
            message: diagnostic.message().to_string(),
            code: diagnostic.code().map(|code| code.to_string()),
            help: diagnostic.help(),
            labels: diagnostic.labels().iter().map(labeled_span).collect(),
            text: Some(text),
            cause: None,
        }
    }

    /// A report for an error that has no source location.
    pub fn from_error(err: &'a BiopaxError) -> Self {
        let kind = match err {
            BiopaxError::Io(_) => "io",
            BiopaxError::Parse { .. } => "parse",
            BiopaxError::Model(_) => "model",
            BiopaxError::Export(_) => "export",
            BiopaxError::Config(_) => "config",
        };
        Self {
            message: err.to_string(),
            code: Some(format!("biopax::{kind}")),
            help: None,
            labels: Vec::new(),
            text: None,
            cause: err.source(),
        }
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let span = SourceSpan::new(label.span().start().into(), label.span().len());
    let message = Some(label.message().to_string());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(message, span)
    } else {
        LabeledSpan::new_with_span(message, span)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Report<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.text.as_ref().map(|text| text as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

/// Splits an error into the reports to render, one per parser diagnostic.
pub fn reports(err: &BiopaxError) -> Vec<Report<'_>> {
    match err {
        BiopaxError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diagnostic| Report::from_diagnostic(diagnostic, src))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}
