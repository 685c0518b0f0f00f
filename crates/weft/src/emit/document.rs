//! The layout-document backend.
//!
//! The same interpreter emissions, lowered into the width-aware document
//! algebra of the [`pretty`] crate: literal text, forced line breaks
//! (`hardline`), indent scopes (`nest`), and groups. Soft-wrap decisions are
//! the printer's; this backend never invents breaks beyond the forced ones.
//!
//! Separator resolution mirrors the fragment algebra: the first leaf's
//! leading separators are dropped, same-kind duplicates at a junction
//! collapse, and spaces become literal `" "` leaves since the printer has no
//! separator-merging concept. A leaf's trailing separator is materialized
//! lazily — only once the next leaf arrives — which is what places an
//! indented scope's closing break outside its `nest` while its opening break
//! stays inside.

use pretty::RcDoc;

use weft_core::{
    fragment::FragmentError, grammar::Orientation, identifier::QualifiedName,
    separator::SeparatorFlags,
};

use crate::config::RenderConfig;

use super::Sink;

/// One node of the buffered emission tree.
enum DocNode {
    Leaf {
        text: String,
        separator: SeparatorFlags,
    },
    Scope {
        indented: bool,
        children: Vec<DocNode>,
    },
}

impl DocNode {
    fn first_leaf_mut(&mut self) -> Option<&mut SeparatorFlags> {
        match self {
            DocNode::Leaf { separator, .. } => Some(separator),
            DocNode::Scope { children, .. } => first_leaf_mut(children),
        }
    }

    fn last_leaf_mut(&mut self) -> Option<&mut SeparatorFlags> {
        match self {
            DocNode::Leaf { separator, .. } => Some(separator),
            DocNode::Scope { children, .. } => last_leaf_mut(children),
        }
    }
}

fn first_leaf_mut(nodes: &mut [DocNode]) -> Option<&mut SeparatorFlags> {
    for node in nodes.iter_mut() {
        if let Some(separator) = node.first_leaf_mut() {
            return Some(separator);
        }
    }
    None
}

fn last_leaf_mut(nodes: &mut [DocNode]) -> Option<&mut SeparatorFlags> {
    for node in nodes.iter_mut().rev() {
        if let Some(separator) = node.last_leaf_mut() {
            return Some(separator);
        }
    }
    None
}

/// A scope still receiving emissions.
struct OpenScope {
    orientation: Orientation,
    indented: bool,
    children: Vec<DocNode>,
}

/// Sink building a layout document.
pub(crate) struct DocSink {
    root: Vec<DocNode>,
    open: Vec<OpenScope>,
    leaves: usize,
}

impl DocSink {
    /// Create an empty sink.
    pub(crate) fn new() -> Self {
        Self {
            root: Vec::new(),
            open: Vec::new(),
            leaves: 0,
        }
    }

    fn current(&mut self) -> &mut Vec<DocNode> {
        match self.open.last_mut() {
            Some(scope) => &mut scope.children,
            None => &mut self.root,
        }
    }

    /// Lower the buffered tree into a document, print it at the configured
    /// width, and apply the final trim.
    pub(crate) fn finish(self, config: &RenderConfig) -> String {
        debug_assert!(self.open.is_empty(), "finish with open scopes");
        let mut state = LowerState {
            emitted: false,
            pending: None,
        };
        let doc = lower(&self.root, &mut state, config.tab_width() as isize);

        let mut out = String::new();
        doc.render_fmt(config.print_width(), &mut out)
            .expect("Writing to String buffer is infallible");

        // The printer may leave trailing blank structure; drop it.
        out.truncate(out.trim_end().len());
        if config.use_tabs() {
            out = spaces_to_tabs(&out, config.tab_width());
        }
        out
    }
}

impl Sink for DocSink {
    fn leaf(
        &mut self,
        text: &str,
        separator: SeparatorFlags,
        source: QualifiedName,
    ) -> Result<(), FragmentError> {
        if text.is_empty() {
            return Err(FragmentError::EmptyText(source));
        }
        self.current().push(DocNode::Leaf {
            text: text.to_string(),
            separator,
        });
        self.leaves += 1;
        Ok(())
    }

    fn enter(&mut self, orientation: Orientation, indented: bool) {
        self.open.push(OpenScope {
            orientation,
            indented,
            children: Vec::new(),
        });
    }

    fn exit(&mut self) {
        let scope = self.open.pop().expect("Scope stack should not underflow");
        // An empty scope contributes nothing: no breaks, no indentation.
        if scope.children.is_empty() {
            return;
        }
        let mut children = scope.children;
        if scope.orientation == Orientation::Vertical {
            if let Some(first) = first_leaf_mut(&mut children) {
                first.force_newline_before();
            }
        }
        if scope.orientation == Orientation::Vertical || scope.indented {
            if let Some(last) = last_leaf_mut(&mut children) {
                last.force_newline_after();
            }
        }
        self.current().push(DocNode::Scope {
            indented: scope.indented,
            children,
        });
    }

    fn leaves(&self) -> usize {
        self.leaves
    }

    fn end_line(&mut self) {
        for scope in self.open.iter_mut().rev() {
            if let Some(last) = last_leaf_mut(&mut scope.children) {
                last.force_newline_after();
                return;
            }
        }
        if let Some(last) = last_leaf_mut(&mut self.root) {
            last.force_newline_after();
        }
    }
}

/// The kind of separator a leaf left pending after itself.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Pending {
    Space,
    Newline,
}

impl Pending {
    fn into_doc(self) -> RcDoc<'static, ()> {
        match self {
            Pending::Space => RcDoc::text(" "),
            Pending::Newline => RcDoc::hardline(),
        }
    }
}

/// Shared resolution state threaded through the lowering walk.
struct LowerState {
    emitted: bool,
    pending: Option<Pending>,
}

fn lower(nodes: &[DocNode], state: &mut LowerState, tab_width: isize) -> RcDoc<'static, ()> {
    let mut parts: Vec<RcDoc<'static, ()>> = Vec::new();
    for node in nodes {
        match node {
            DocNode::Leaf { text, separator } => {
                let pending = state.pending.take();
                if state.emitted {
                    if let Some(pending) = pending {
                        parts.push(pending.into_doc());
                    }
                    let before = if separator.newline_before() {
                        Some(Pending::Newline)
                    } else if separator.space_before() {
                        Some(Pending::Space)
                    } else {
                        None
                    };
                    if let Some(before) = before {
                        // Same-kind duplicates at a junction collapse.
                        if pending != Some(before) {
                            parts.push(before.into_doc());
                        }
                    }
                }
                parts.push(RcDoc::text(text.clone()));
                state.emitted = true;
                state.pending = if separator.newline_after() {
                    Some(Pending::Newline)
                } else if separator.space_after() {
                    Some(Pending::Space)
                } else {
                    None
                };
            }
            DocNode::Scope { indented, children } => {
                let inner = lower(children, state, tab_width);
                let inner = if *indented {
                    inner.nest(tab_width)
                } else {
                    inner
                };
                parts.push(inner.group());
            }
        }
    }
    RcDoc::concat(parts)
}

/// Convert leading indent runs of `tab_width` spaces into tabs.
fn spaces_to_tabs(text: &str, tab_width: usize) -> String {
    if tab_width == 0 {
        return text.to_string();
    }
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            let trimmed = line.trim_start_matches(' ');
            let leading = line.len() - trimmed.len();
            let mut converted = "\t".repeat(leading / tab_width);
            converted.push_str(&" ".repeat(leading % tab_width));
            converted.push_str(trimmed);
            converted
        })
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> QualifiedName {
        QualifiedName::new("test", "leaf")
    }

    fn leaf(sink: &mut DocSink, text: &str, separator: SeparatorFlags) {
        sink.leaf(text, separator, source()).expect("non-empty text");
    }

    fn finish(sink: DocSink) -> String {
        sink.finish(&RenderConfig::default())
    }

    #[test]
    fn test_plain_concatenation() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "1", SeparatorFlags::NONE);
        leaf(&mut sink, "2", SeparatorFlags::NONE);
        assert_eq!(finish(sink), "12");
    }

    #[test]
    fn test_boundary_separators_are_dropped() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NEWLINE_BEFORE);
        leaf(&mut sink, "b", SeparatorFlags::NEWLINE_AFTER);
        assert_eq!(finish(sink), "ab");
    }

    #[test]
    fn test_adjacent_newlines_collapse() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NEWLINE_AFTER);
        leaf(&mut sink, "b", SeparatorFlags::NEWLINE_BEFORE);
        assert_eq!(finish(sink), "a\nb");
    }

    #[test]
    fn test_adjacent_spaces_collapse() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::SPACE_AFTER);
        leaf(&mut sink, "b", SeparatorFlags::SPACE_BEFORE);
        assert_eq!(finish(sink), "a b");
    }

    #[test]
    fn test_empty_scope_contributes_nothing() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NONE);
        sink.enter(Orientation::Vertical, true);
        sink.exit();
        leaf(&mut sink, "b", SeparatorFlags::NONE);
        assert_eq!(finish(sink), "ab");
    }

    #[test]
    fn test_indented_scope_breaks_inside_and_after() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NONE);
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "b", SeparatorFlags::NONE);
        sink.exit();
        leaf(&mut sink, "c", SeparatorFlags::NONE);
        // The opening break is indented with the interior; the closing
        // break returns to the outer level.
        assert_eq!(finish(sink), "a\n  b\nc");
    }

    #[test]
    fn test_nested_indentation_accumulates() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NONE);
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "b", SeparatorFlags::NONE);
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "c", SeparatorFlags::NONE);
        sink.exit();
        sink.exit();
        leaf(&mut sink, "d", SeparatorFlags::NONE);
        assert_eq!(finish(sink), "a\n  b\n    c\nd");
    }

    #[test]
    fn test_trailing_blank_structure_is_trimmed() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NONE);
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "b", SeparatorFlags::NONE);
        sink.exit();
        // The scope's closing break has nothing after it.
        assert_eq!(finish(sink), "a\n  b");
    }

    #[test]
    fn test_end_line_reaches_into_closed_scope() {
        let mut sink = DocSink::new();
        sink.enter(Orientation::Horizontal, false);
        leaf(&mut sink, "a", SeparatorFlags::NONE);
        sink.exit();
        sink.end_line();
        leaf(&mut sink, "b", SeparatorFlags::NONE);
        assert_eq!(finish(sink), "a\nb");
    }

    #[test]
    fn test_spaces_to_tabs() {
        assert_eq!(spaces_to_tabs("a\n  b\n    c", 2), "a\n\tb\n\t\tc");
        assert_eq!(spaces_to_tabs("a\n   b", 2), "a\n\t b");
    }

    #[test]
    fn test_use_tabs_config() {
        let mut sink = DocSink::new();
        leaf(&mut sink, "a", SeparatorFlags::NONE);
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "b", SeparatorFlags::NONE);
        sink.exit();
        leaf(&mut sink, "c", SeparatorFlags::NONE);
        let out = sink.finish(&RenderConfig::default().with_use_tabs(true));
        assert_eq!(out, "a\n\tb\nc");
    }
}
