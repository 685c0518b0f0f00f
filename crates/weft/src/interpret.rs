//! The recursive attribute interpreter.
//!
//! Given a node and its type's attribute declaration list, the interpreter
//! walks the declarations in order and emits leaves and scopes into a
//! [`Sink`]. Child-group attributes recurse into each child's *own*
//! attribute list, resolved by the child's qualified type — dispatch is a
//! schema lookup, never inheritance. The walk is a pure function of the
//! schema and the tree: identical inputs produce identical emissions.
//!
//! Vertical orientation adds the line discipline: a between terminal forces
//! a break after itself, and every sequence item's cumulative emission is
//! terminated with a forced break, synthesized through [`Sink::end_line`]
//! when no attribute produced one.

use log::{debug, trace};

use weft_core::{
    grammar::{Attribute, AttributeKind, GrammarSchema, Orientation, TypeDefinition, tags},
    identifier::QualifiedName,
    separator::SeparatorFlags,
    tree::SyntaxNode,
};

use crate::{
    emit::Sink,
    error::{NodePath, RenderError},
};

/// One tree walk: the schema plus the current location for error reporting.
pub(crate) struct Interpreter<'a> {
    schema: &'a GrammarSchema,
    path: NodePath,
}

impl<'a> Interpreter<'a> {
    pub(crate) fn new(schema: &'a GrammarSchema) -> Self {
        Self {
            schema,
            path: NodePath::root(),
        }
    }

    /// Render the root node into the sink.
    ///
    /// The root's type is resolved in the schema and its attribute list is
    /// walked with horizontal orientation.
    pub(crate) fn render_root<S: Sink>(
        &mut self,
        root: &SyntaxNode,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        debug!(kind = root.kind().to_string(); "Rendering tree");
        let attributes = self.resolve(root)?;
        self.walk(attributes, root, Orientation::Horizontal, sink)
    }

    /// Resolve a node's attribute list by its qualified type.
    fn resolve(&self, node: &SyntaxNode) -> Result<&'a [Attribute], RenderError> {
        let kind = node.kind();
        let definition = self
            .schema
            .lookup(kind)
            .ok_or_else(|| RenderError::UnknownType {
                kind,
                path: self.path.clone(),
            })?;
        match definition {
            TypeDefinition::Concrete { attributes } | TypeDefinition::Visual { attributes } => {
                Ok(attributes)
            }
            TypeDefinition::Union { .. } => Err(RenderError::AbstractType {
                kind,
                path: self.path.clone(),
            }),
        }
    }

    /// Walk one attribute list against one node.
    fn walk<S: Sink>(
        &mut self,
        attributes: &'a [Attribute],
        node: &SyntaxNode,
        orientation: Orientation,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        for attribute in attributes {
            match attribute.kind() {
                AttributeKind::Terminal { symbol } => {
                    self.emit_value(sink, attribute, symbol, node)?;
                }
                AttributeKind::Property { name } | AttributeKind::Interpolate { name } => {
                    let value =
                        node.property(name)
                            .ok_or_else(|| RenderError::MissingProperty {
                                kind: node.kind(),
                                path: self.path.clone(),
                                property: name.clone(),
                            })?;
                    self.emit_value(sink, attribute, value, node)?;
                }
                AttributeKind::Sequence { category, between }
                | AttributeKind::Allowed { category, between }
                | AttributeKind::Parentheses { category, between }
                | AttributeKind::Each { category, between } => {
                    self.walk_children(sink, node, category, between.as_deref(), orientation)?;
                }
                AttributeKind::Container {
                    orientation: nested_orientation,
                    attributes: nested,
                } => {
                    let indented = attribute.has_tag(tags::INDENT);
                    trace!(
                        orientation:? = nested_orientation,
                        indented = indented;
                        "Entering container"
                    );
                    sink.enter(*nested_orientation, indented);
                    self.walk(nested, node, *nested_orientation, sink)?;
                    sink.exit();
                }
            }
        }
        Ok(())
    }

    /// Emit every child of a category, recursing through each child's own
    /// attribute list.
    fn walk_children<S: Sink>(
        &mut self,
        sink: &mut S,
        node: &SyntaxNode,
        category: &str,
        between: Option<&str>,
        orientation: Orientation,
    ) -> Result<(), RenderError> {
        let children = node.children(category);
        // An absent or empty category emits nothing: no separators, no
        // group wrapper.
        if children.is_empty() {
            return Ok(());
        }
        trace!(category = category, count = children.len(); "Emitting child category");

        let vertical = orientation == Orientation::Vertical;
        let last = children.len() - 1;
        for (index, child) in children.iter().enumerate() {
            let emitted_before = sink.leaves();

            self.path.push(category, index);
            let attributes = self.resolve(child)?;
            self.walk(attributes, child, orientation, sink)?;
            self.path.pop();

            if index < last {
                if let Some(symbol) = between {
                    let separator = if vertical {
                        SeparatorFlags::NEWLINE_AFTER
                    } else {
                        SeparatorFlags::NONE
                    };
                    self.emit_leaf(sink, symbol, separator, node)?;
                }
            }
            // In a vertical sequence every item terminates its own line,
            // whichever attribute produced its last output.
            if vertical && sink.leaves() > emitted_before {
                sink.end_line();
            }
        }
        Ok(())
    }

    /// Emit a single value leaf, applying the attribute's tags.
    fn emit_value<S: Sink>(
        &mut self,
        sink: &mut S,
        attribute: &Attribute,
        raw: &str,
        node: &SyntaxNode,
    ) -> Result<(), RenderError> {
        let separator = self.resolve_separator(attribute, node)?;
        if attribute.has_tag(tags::DOUBLE_QUOTE) {
            let quoted = format!("\"{raw}\"");
            self.emit_leaf(sink, &quoted, separator, node)
        } else {
            self.emit_leaf(sink, raw, separator, node)
        }
    }

    fn emit_leaf<S: Sink>(
        &mut self,
        sink: &mut S,
        text: &str,
        separator: SeparatorFlags,
        node: &SyntaxNode,
    ) -> Result<(), RenderError> {
        sink.leaf(text, separator, node.kind())
            .map_err(|source| RenderError::EmptyFragmentText {
                kind: node.kind(),
                path: self.path.clone(),
                source,
            })
    }

    /// Resolve an attribute's separator intent from its tags.
    ///
    /// At most one separator tag may be present; unknown tags are inert.
    fn resolve_separator(
        &self,
        attribute: &Attribute,
        node: &SyntaxNode,
    ) -> Result<SeparatorFlags, RenderError> {
        let mut selected: Option<&str> = None;
        for tag in attribute.tags() {
            if tags::SEPARATORS.contains(&tag.as_str()) {
                if let Some(first) = selected {
                    return Err(RenderError::ConflictingSeparatorTags {
                        kind: node.kind(),
                        path: self.path.clone(),
                        first: first.to_string(),
                        second: tag.clone(),
                    });
                }
                selected = Some(tag);
            }
        }
        Ok(match selected {
            Some(tags::SPACE_BEFORE) => SeparatorFlags::SPACE_BEFORE,
            Some(tags::SPACE_AFTER) => SeparatorFlags::SPACE_AFTER,
            Some(tags::SPACE_AROUND) => SeparatorFlags::SPACE_AROUND,
            Some(tags::NEWLINE_BEFORE) => SeparatorFlags::NEWLINE_BEFORE,
            Some(tags::NEWLINE_AFTER) => SeparatorFlags::NEWLINE_AFTER,
            _ => SeparatorFlags::NONE,
        })
    }
}
