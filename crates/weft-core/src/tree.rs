//! The read-only syntax tree snapshot consumed by the renderer.
//!
//! A [`SyntaxNode`] is supplied per render call by the tree-editing
//! subsystem. The renderer only ever reads it: a node's qualified type
//! selects its attribute declaration list in the grammar schema, its string
//! properties feed `property`/`interpolate` attributes, and its child
//! categories feed the child-group attributes. Property and child maps keep
//! insertion order so rendering is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::QualifiedName;

/// Errors produced when loading a syntax tree document.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The JSON document could not be deserialized.
    #[error("invalid syntax tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One node of the syntax tree: a qualified type, string properties, and
/// ordered child lists grouped by category name.
///
/// # Examples
///
/// ```
/// use weft_core::{identifier::QualifiedName, tree::SyntaxNode};
///
/// let attribute = SyntaxNode::new(QualifiedName::new("xml", "attribute"))
///     .with_property("name", "href")
///     .with_property("value", "index.html");
///
/// let element = SyntaxNode::new(QualifiedName::new("xml", "element"))
///     .with_property("tag", "a")
///     .with_child("attributes", attribute);
///
/// assert_eq!(element.property("tag"), Some("a"));
/// assert_eq!(element.children("attributes").len(), 1);
/// // Absent categories are empty, not an error
/// assert!(element.children("content").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// The qualified type selecting this node's grammar definition.
    #[serde(rename = "type")]
    kind: QualifiedName,

    /// String properties, in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, String>,

    /// Ordered child lists grouped by category name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    children: IndexMap<String, Vec<SyntaxNode>>,
}

impl SyntaxNode {
    /// Create a node of the given qualified type with no properties or
    /// children.
    pub fn new(kind: QualifiedName) -> Self {
        Self {
            kind,
            properties: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    /// Load a node (and its subtree) from a JSON document.
    ///
    /// The document shape is `{"type": "lang.name", "properties": {..},
    /// "children": {"category": [..]}}` with both maps optional.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Json`] when the document does not deserialize,
    /// including when a `type` field is not a dotted qualified name.
    pub fn from_json(text: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set a string property, replacing any previous value.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Append one child to a category, creating the category if absent.
    pub fn with_child(mut self, category: impl Into<String>, child: SyntaxNode) -> Self {
        self.children.entry(category.into()).or_default().push(child);
        self
    }

    /// Replace a category's child list wholesale.
    pub fn with_children(
        mut self,
        category: impl Into<String>,
        children: Vec<SyntaxNode>,
    ) -> Self {
        self.children.insert(category.into(), children);
        self
    }

    /// Get the node's qualified type.
    pub fn kind(&self) -> QualifiedName {
        self.kind
    }

    /// Look up a string property by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Iterate over all properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Get the ordered children of a category.
    ///
    /// An absent category yields an empty slice; the renderer treats the two
    /// identically.
    pub fn children(&self, category: &str) -> &[SyntaxNode] {
        self.children
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over the category names that have children.
    pub fn child_categories(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }
}
