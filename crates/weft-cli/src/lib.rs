//! Weft CLI library
//!
//! This module contains the core CLI logic for the Weft rendering tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Backend};
pub use error_adapter::ErrorAdapter;

use std::{fs, io};

use log::info;
use thiserror::Error;

use weft::{RenderError, Renderer, grammar::GrammarSchema, tree::SyntaxNode};

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Run the Weft CLI application
///
/// This function loads the grammar schema and the tree document, renders
/// the tree through the selected backend, and writes the resulting text to
/// the output file or stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Grammar or tree loading errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        tree_path = args.tree,
        grammar_path = args.grammar;
        "Rendering document"
    );

    // Load configuration, applying the command-line width override
    let mut render_config = config::load_config(args.config.as_ref())?;
    if let Some(width) = args.width {
        render_config = render_config.with_print_width(width);
    }

    // Load the grammar schema and the tree document
    let schema_text = fs::read_to_string(&args.grammar)?;
    let schema = GrammarSchema::from_json(&schema_text).map_err(RenderError::from)?;
    let tree_text = fs::read_to_string(&args.tree)?;
    let tree = SyntaxNode::from_json(&tree_text).map_err(RenderError::from)?;

    // Render through the selected backend
    let renderer = Renderer::with_config(schema, render_config);
    let text = match args.backend {
        Backend::Stream => renderer.render(&tree)?,
        Backend::Document => renderer.render_pretty(&tree)?,
    };

    // Write the output
    match &args.output {
        Some(path) => {
            fs::write(path, &text)?;
            info!(output_path = path; "Rendered text written");
        }
        None => println!("{text}"),
    }

    Ok(())
}
