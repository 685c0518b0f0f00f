//! Command-line argument definitions.

use clap::{Parser, ValueEnum};

/// The rendering backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// The fragment-stream backend (separator algebra).
    Stream,
    /// The width-aware layout-document backend.
    Document,
}

/// Render a syntax tree document to text using a grammar schema.
#[derive(Debug, Parser)]
#[command(name = "weft", version, about)]
pub struct Args {
    /// Path to the syntax tree JSON document
    pub tree: String,

    /// Path to the grammar schema JSON document
    #[arg(short, long)]
    pub grammar: String,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Rendering backend
    #[arg(long, value_enum, default_value_t = Backend::Stream)]
    pub backend: Backend,

    /// Print width override for the document backend
    #[arg(long)]
    pub width: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
