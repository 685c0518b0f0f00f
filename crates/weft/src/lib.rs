//! Weft - A grammar-driven renderer for structured syntax trees.
//!
//! Per-language attribute declarations describe which literal tokens, node
//! properties, and child groups to emit for each node type; the engine walks
//! any conforming tree and produces exact text. Rendering is purely
//! tree → text: the engine never validates trees, never mutates them, and
//! never parses text.
//!
//! Two backends share one recursive attribute interpreter: the
//! fragment-stream backend resolves emissions through the
//! separator/indentation algebra in [`weft_core::fragment`], and the
//! layout-document backend lowers the same emissions into a width-aware
//! document printed by the `pretty` crate.

pub mod config;

mod emit;
mod error;
mod interpret;

pub use weft_core::{fragment, grammar, identifier, separator, tree};

pub use error::{NodePath, RenderError};

use log::{debug, info};

use config::RenderConfig;
use emit::{document::DocSink, stream::FragmentSink};
use grammar::GrammarSchema;
use interpret::Interpreter;
use tree::SyntaxNode;

/// Renderer for structured syntax trees, driven by a grammar schema.
///
/// A renderer owns the immutable schema (loaded once per language set) and a
/// [`RenderConfig`]. Each render call is one pure computation from the
/// schema and a tree snapshot to a string; renderers are freely reusable
/// across trees and shareable across threads.
///
/// # Examples
///
/// ```rust
/// use weft::{
///     Renderer,
///     grammar::{Attribute, GrammarSchema, TypeDefinition},
///     identifier::QualifiedName,
///     tree::SyntaxNode,
/// };
///
/// let mut schema = GrammarSchema::new();
/// schema.insert(
///     "demo",
///     "greeting",
///     TypeDefinition::concrete(vec![
///         Attribute::terminal("hello"),
///         Attribute::property("name").with_tag("space-before"),
///     ]),
/// );
///
/// let tree = SyntaxNode::new(QualifiedName::new("demo", "greeting"))
///     .with_property("name", "world");
///
/// let renderer = Renderer::new(schema);
/// assert_eq!(renderer.render(&tree).unwrap(), "hello world");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    schema: GrammarSchema,
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer over a schema with the default configuration.
    pub fn new(schema: GrammarSchema) -> Self {
        Self {
            schema,
            config: RenderConfig::default(),
        }
    }

    /// Create a renderer over a schema with an explicit configuration.
    pub fn with_config(schema: GrammarSchema, config: RenderConfig) -> Self {
        Self { schema, config }
    }

    /// Create a renderer from a grammar schema JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Schema`] when the document does not
    /// deserialize.
    pub fn from_json(schema_json: &str) -> Result<Self, RenderError> {
        Ok(Self::new(GrammarSchema::from_json(schema_json)?))
    }

    /// Get the grammar schema.
    pub fn schema(&self) -> &GrammarSchema {
        &self.schema
    }

    /// Get the render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a tree through the fragment-stream backend.
    ///
    /// # Arguments
    ///
    /// * `root` - The root node of the tree to render
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the tree does not conform to the
    /// grammar (unknown or union type, missing property) or a declaration
    /// is unusable (conflicting separator tags, empty fragment text). There
    /// is no partial output.
    pub fn render(&self, root: &SyntaxNode) -> Result<String, RenderError> {
        info!(kind = root.kind().to_string(); "Rendering tree");
        let mut sink = FragmentSink::new();
        Interpreter::new(&self.schema).render_root(root, &mut sink)?;
        let text = sink.finish(&self.config.indent_unit());
        debug!(bytes = text.len(); "Rendered tree");
        Ok(text)
    }

    /// Render a tree through the width-aware layout-document backend.
    ///
    /// Identical separator semantics to [`render`](Self::render); soft-wrap
    /// decisions within groups are delegated to the document printer at the
    /// configured print width.
    ///
    /// # Arguments
    ///
    /// * `root` - The root node of the tree to render
    ///
    /// # Errors
    ///
    /// Same failure modes as [`render`](Self::render).
    pub fn render_pretty(&self, root: &SyntaxNode) -> Result<String, RenderError> {
        info!(
            kind = root.kind().to_string(),
            width = self.config.print_width();
            "Rendering tree as layout document"
        );
        let mut sink = DocSink::new();
        Interpreter::new(&self.schema).render_root(root, &mut sink)?;
        Ok(sink.finish(&self.config))
    }
}
