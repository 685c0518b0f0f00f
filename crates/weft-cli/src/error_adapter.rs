//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Render
//! errors already carry the offending node's qualified type and tree path
//! in their display form; the adapter contributes an error code and, for
//! tree-conformance failures, a fixed help line.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use weft::RenderError;

use crate::CliError;

/// Adapter wrapping a [`CliError`] for rich miette formatting.
pub struct ErrorAdapter(pub CliError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "weft::io",
            CliError::Config(_) => "weft::config",
            CliError::Render(err) => match err {
                RenderError::Schema(_) => "weft::schema",
                RenderError::Tree(_) => "weft::tree",
                _ => "weft::render",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::Render(err) => match err {
                RenderError::Schema(_) | RenderError::Tree(_) => None,
                _ => Some(Box::new(
                    "the tree is not renderable by this grammar; fix the tree or the grammar",
                )),
            },
            _ => None,
        }
    }
}
