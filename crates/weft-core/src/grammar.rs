//! Grammar attribute schema: per-type declarations driving the renderer.
//!
//! A grammar describes, for each qualified type, the ordered list of
//! [`Attribute`]s to emit when rendering a node of that type: literal
//! terminals, node properties, child groups, and nested containers. The
//! schema is immutable configuration, loaded once per language and shared by
//! every render call.
//!
//! # Wire format
//!
//! Schemas deserialize from JSON of the shape
//! `{ "<language>": { "<type>": <definition> } }`:
//!
//! ```text
//! {
//!   "json": {
//!     "member": {
//!       "kind": "concrete",
//!       "attributes": [
//!         { "attr": "property", "name": "key", "tags": ["double-quote"] },
//!         { "attr": "terminal", "symbol": ":", "tags": ["space-after"] },
//!         { "attr": "sequence", "category": "value" }
//!       ]
//!     }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::QualifiedName;

/// The free-form tag vocabulary understood by the renderer.
///
/// Tags are plain strings on purpose: language definitions may carry tags
/// the renderer does not interpret, and those stay inert.
pub mod tags {
    /// Emit a space before the attribute's value.
    pub const SPACE_BEFORE: &str = "space-before";
    /// Emit a space after the attribute's value.
    pub const SPACE_AFTER: &str = "space-after";
    /// Emit a space on both sides of the attribute's value.
    pub const SPACE_AROUND: &str = "space-around";
    /// Force a line break before the attribute's value.
    pub const NEWLINE_BEFORE: &str = "newline-before";
    /// Force a line break after the attribute's value.
    pub const NEWLINE_AFTER: &str = "newline-after";
    /// Wrap the attribute's value in double quotes.
    pub const DOUBLE_QUOTE: &str = "double-quote";
    /// Add one indentation level to a container's content.
    pub const INDENT: &str = "indent";

    /// The separator tags, of which an attribute may carry at most one.
    pub const SEPARATORS: [&str; 5] = [
        SPACE_BEFORE,
        SPACE_AFTER,
        SPACE_AROUND,
        NEWLINE_BEFORE,
        NEWLINE_AFTER,
    ];
}

/// Errors produced when loading a grammar schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The JSON document could not be deserialized.
    #[error("invalid grammar schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layout direction a container imposes on its content.
///
/// Horizontal content flows on the current line; vertical content expects
/// every item to occupy a line of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Content flows inline. The default.
    #[default]
    Horizontal,
    /// Items occupy their own lines.
    Vertical,
}

/// One attribute declaration: what to emit, plus free-form tags controlling
/// spacing and quoting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(flatten)]
    kind: AttributeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

/// The attribute variants a grammar may declare.
///
/// The four child-group variants (`sequence`, `allowed`, `parentheses`,
/// `each`) differ in the validation strength the external grammar checker
/// applies; the renderer treats them identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "attr", rename_all = "lowercase")]
pub enum AttributeKind {
    /// Emit a fixed literal symbol.
    Terminal {
        /// The literal text to emit.
        symbol: String,
    },
    /// Emit the node's named string property; absent is an error.
    Property {
        /// The property name on the rendered node.
        name: String,
    },
    /// Same as `Property`; declared only inside visual type definitions.
    Interpolate {
        /// The property name on the rendered node.
        name: String,
    },
    /// Emit every child of a category, in order.
    Sequence {
        /// The child category on the rendered node.
        category: String,
        /// Optional terminal emitted after every child except the last.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        between: Option<String>,
    },
    /// Like `Sequence`, with membership-only validation.
    Allowed {
        /// The child category on the rendered node.
        category: String,
        /// Optional terminal emitted after every child except the last.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        between: Option<String>,
    },
    /// Like `Sequence`, for parenthesized child groups.
    Parentheses {
        /// The child category on the rendered node.
        category: String,
        /// Optional terminal emitted after every child except the last.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        between: Option<String>,
    },
    /// Like `Sequence`, with per-child validation.
    Each {
        /// The child category on the rendered node.
        category: String,
        /// Optional terminal emitted after every child except the last.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        between: Option<String>,
    },
    /// Evaluate a nested attribute list against the same node.
    Container {
        /// The orientation the container imposes on its content.
        #[serde(default)]
        orientation: Orientation,
        /// The nested attribute list.
        attributes: Vec<Attribute>,
    },
}

impl Attribute {
    fn from_kind(kind: AttributeKind) -> Self {
        Self {
            kind,
            tags: Vec::new(),
        }
    }

    /// A literal terminal attribute.
    pub fn terminal(symbol: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Terminal {
            symbol: symbol.into(),
        })
    }

    /// A property attribute.
    pub fn property(name: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Property { name: name.into() })
    }

    /// An interpolate attribute (visual definitions only).
    pub fn interpolate(name: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Interpolate { name: name.into() })
    }

    /// A sequence child-group attribute.
    pub fn sequence(category: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Sequence {
            category: category.into(),
            between: None,
        })
    }

    /// An allowed child-group attribute.
    pub fn allowed(category: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Allowed {
            category: category.into(),
            between: None,
        })
    }

    /// A parentheses child-group attribute.
    pub fn parentheses(category: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Parentheses {
            category: category.into(),
            between: None,
        })
    }

    /// An each child-group attribute.
    pub fn each(category: impl Into<String>) -> Self {
        Self::from_kind(AttributeKind::Each {
            category: category.into(),
            between: None,
        })
    }

    /// A container attribute with the given orientation and nested list.
    pub fn container(orientation: Orientation, attributes: Vec<Attribute>) -> Self {
        Self::from_kind(AttributeKind::Container {
            orientation,
            attributes,
        })
    }

    /// Declare the between terminal of a child-group attribute.
    ///
    /// Only meaningful on the child-group variants; other kinds are left
    /// unchanged.
    pub fn with_between(mut self, symbol: impl Into<String>) -> Self {
        match &mut self.kind {
            AttributeKind::Sequence { between, .. }
            | AttributeKind::Allowed { between, .. }
            | AttributeKind::Parentheses { between, .. }
            | AttributeKind::Each { between, .. } => *between = Some(symbol.into()),
            _ => debug_assert!(false, "with_between on a non-child-group attribute"),
        }
        self
    }

    /// Append a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get the attribute variant.
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Get all tags in declaration order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether the attribute carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// One type definition in the grammar schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDefinition {
    /// A regular renderable type.
    Concrete {
        /// The ordered attribute declarations.
        attributes: Vec<Attribute>,
    },
    /// A derived/virtual type; the only place `interpolate` is legal.
    Visual {
        /// The ordered attribute declarations.
        attributes: Vec<Attribute>,
    },
    /// A oneOf union; cannot be rendered directly.
    Union {
        /// The member types of the union.
        of: Vec<QualifiedName>,
    },
}

impl TypeDefinition {
    /// A concrete definition from its attribute list.
    pub fn concrete(attributes: Vec<Attribute>) -> Self {
        Self::Concrete { attributes }
    }

    /// A visual definition from its attribute list.
    pub fn visual(attributes: Vec<Attribute>) -> Self {
        Self::Visual { attributes }
    }

    /// A union definition from its member types.
    pub fn union(of: Vec<QualifiedName>) -> Self {
        Self::Union { of }
    }

    /// The attribute list of a renderable definition; `None` for unions.
    pub fn attributes(&self) -> Option<&[Attribute]> {
        match self {
            Self::Concrete { attributes } | Self::Visual { attributes } => {
                Some(attributes.as_slice())
            }
            Self::Union { .. } => None,
        }
    }

    /// Whether this definition is a union.
    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union { .. })
    }
}

/// The full grammar schema: qualified type name to definition, across all
/// loaded languages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammarSchema {
    types: IndexMap<QualifiedName, TypeDefinition>,
}

impl GrammarSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a schema from a JSON document of the shape
    /// `{ "<language>": { "<type>": <definition> } }`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] when the document does not deserialize.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let raw: IndexMap<String, IndexMap<String, TypeDefinition>> =
            serde_json::from_str(text)?;
        let mut schema = Self::new();
        for (language, definitions) in raw {
            for (name, definition) in definitions {
                schema.insert(&language, &name, definition);
            }
        }
        debug!(types = schema.len(); "Loaded grammar schema");
        Ok(schema)
    }

    /// Insert one type definition, replacing any previous definition of the
    /// same qualified name.
    pub fn insert(&mut self, language: &str, name: &str, definition: TypeDefinition) {
        self.types
            .insert(QualifiedName::new(language, name), definition);
    }

    /// Look up a definition by qualified name.
    pub fn lookup(&self, kind: QualifiedName) -> Option<&TypeDefinition> {
        self.types.get(&kind)
    }

    /// The number of type definitions across all languages.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the schema holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (QualifiedName, &TypeDefinition)> {
        self.types.iter().map(|(kind, definition)| (*kind, definition))
    }
}
