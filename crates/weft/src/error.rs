//! Error types for Weft rendering operations.
//!
//! This module provides the main error type [`RenderError`], which covers
//! every way a render call can fail, and [`NodePath`], the tree location
//! attached to each error.
//!
//! All errors are terminal for the current render call: they propagate up
//! through the recursive interpreter unmodified and there is no partial or
//! degraded output. Callers should treat any of them as "this tree is not
//! renderable by this grammar" and fix the tree or the grammar.

use std::fmt;

use thiserror::Error;

use weft_core::{
    fragment::FragmentError, grammar::SchemaError, identifier::QualifiedName,
    separator::SeparatorError, tree::TreeError,
};

/// The location of a node in the rendered tree, as the chain of child
/// categories and indices leading from the root.
///
/// # Examples
///
/// ```
/// use weft::NodePath;
///
/// let path = NodePath::root();
/// assert_eq!(path.to_string(), "root");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<(String, usize)>,
}

impl NodePath {
    /// The path of the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Descend into a child category at an index.
    pub(crate) fn push(&mut self, category: &str, index: usize) {
        self.segments.push((category.to_string(), index));
    }

    /// Return to the parent.
    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for (category, index) in &self.segments {
            write!(f, ".{category}[{index}]")?;
        }
        Ok(())
    }
}

/// The main error type for Weft rendering operations.
///
/// Every variant raised during a render carries the offending node's
/// qualified type and its [`NodePath`] to aid debugging. None of them carry
/// recovery semantics.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A node's qualified type has no schema entry.
    #[error("no grammar definition for type `{kind}` at {path}")]
    UnknownType {
        /// The unresolvable qualified type.
        kind: QualifiedName,
        /// The offending node's location.
        path: NodePath,
    },

    /// A node's type resolves to a union definition, which cannot be
    /// rendered directly.
    #[error("type `{kind}` at {path} is a union definition and cannot be rendered directly")]
    AbstractType {
        /// The union-typed qualified type.
        kind: QualifiedName,
        /// The offending node's location.
        path: NodePath,
    },

    /// A `property`/`interpolate` attribute referenced a property absent on
    /// the node.
    #[error("node of type `{kind}` at {path} has no property `{property}`")]
    MissingProperty {
        /// The node's qualified type.
        kind: QualifiedName,
        /// The offending node's location.
        path: NodePath,
        /// The missing property name.
        property: String,
    },

    /// An attribute declared more than one separator tag.
    #[error(
        "attribute on type `{kind}` at {path} declares conflicting separator tags `{first}` and `{second}`"
    )]
    ConflictingSeparatorTags {
        /// The node's qualified type.
        kind: QualifiedName,
        /// The offending node's location.
        path: NodePath,
        /// The first separator tag found.
        first: String,
        /// The conflicting second separator tag.
        second: String,
    },

    /// A fragment construction combined space and newline flags.
    #[error("conflicting separators on a fragment of type `{kind}` at {path}")]
    ConflictingSeparators {
        /// The node's qualified type.
        kind: QualifiedName,
        /// The offending node's location.
        path: NodePath,
        /// The underlying separator error.
        #[source]
        source: SeparatorError,
    },

    /// A fragment was constructed with empty text.
    #[error("empty fragment text for type `{kind}` at {path}")]
    EmptyFragmentText {
        /// The node's qualified type.
        kind: QualifiedName,
        /// The offending node's location.
        path: NodePath,
        /// The underlying fragment error.
        #[source]
        source: FragmentError,
    },

    /// A grammar schema document failed to load.
    #[error("failed to load grammar schema: {0}")]
    Schema(#[from] SchemaError),

    /// A syntax tree document failed to load.
    #[error("failed to load syntax tree: {0}")]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_display() {
        assert_eq!(NodePath::root().to_string(), "root");
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn test_nested_path_display() {
        let mut path = NodePath::root();
        path.push("members", 0);
        path.push("value", 2);
        assert_eq!(path.to_string(), "root.members[0].value[2]");
        assert!(!path.is_root());

        path.pop();
        assert_eq!(path.to_string(), "root.members[0]");
    }

    #[test]
    fn test_error_display_carries_location() {
        let mut path = NodePath::root();
        path.push("items", 1);
        let err = RenderError::MissingProperty {
            kind: QualifiedName::new("json", "member"),
            path,
            property: "key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "node of type `json.member` at root.items[1] has no property `key`"
        );
    }
}
