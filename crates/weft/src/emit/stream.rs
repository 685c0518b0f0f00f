//! The fragment-stream backend.
//!
//! Leaves become [`Fragment`]s carrying the depth current at emission time;
//! scopes are tracked as index ranges into the growing fragment list, so
//! the forced-break bookkeeping on scope exit is a pair of in-place flag
//! rewrites rather than any restructuring. The final text comes from the
//! separator/indentation algebra in [`weft_core::fragment`].

use weft_core::{
    fragment::{Fragment, FragmentError, join_with},
    grammar::Orientation,
    identifier::QualifiedName,
    separator::SeparatorFlags,
};

use super::Sink;

/// One open scope: the fragment index where it started, plus its layout
/// obligations.
struct Scope {
    start: usize,
    orientation: Orientation,
    indented: bool,
}

/// Sink accumulating a fragment stream.
pub(crate) struct FragmentSink {
    fragments: Vec<Fragment>,
    depth: usize,
    scopes: Vec<Scope>,
}

impl FragmentSink {
    /// Create an empty sink at depth zero.
    pub(crate) fn new() -> Self {
        Self {
            fragments: Vec::new(),
            depth: 0,
            scopes: Vec::new(),
        }
    }

    /// Resolve the accumulated fragments into final text.
    pub(crate) fn finish(self, indent_unit: &str) -> String {
        join_with(&self.fragments, indent_unit)
    }

    #[cfg(test)]
    fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

impl Sink for FragmentSink {
    fn leaf(
        &mut self,
        text: &str,
        separator: SeparatorFlags,
        source: QualifiedName,
    ) -> Result<(), FragmentError> {
        let fragment = Fragment::new(text, self.depth, separator, source)?;
        self.fragments.push(fragment);
        Ok(())
    }

    fn enter(&mut self, orientation: Orientation, indented: bool) {
        self.scopes.push(Scope {
            start: self.fragments.len(),
            orientation,
            indented,
        });
        if indented {
            self.depth += 1;
        }
    }

    fn exit(&mut self) {
        let scope = self.scopes.pop().expect("Scope stack should not underflow");
        if scope.indented {
            self.depth -= 1;
        }
        // An empty scope contributes nothing: no breaks, no indentation.
        if self.fragments.len() == scope.start {
            return;
        }
        if scope.orientation == Orientation::Vertical {
            self.fragments[scope.start].force_newline_before();
        }
        if scope.orientation == Orientation::Vertical || scope.indented {
            self.fragments
                .last_mut()
                .expect("Non-empty scope should have a last fragment")
                .force_newline_after();
        }
    }

    fn leaves(&self) -> usize {
        self.fragments.len()
    }

    fn end_line(&mut self) {
        if let Some(last) = self.fragments.last_mut() {
            last.force_newline_after();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> QualifiedName {
        QualifiedName::new("test", "leaf")
    }

    fn leaf(sink: &mut FragmentSink, text: &str) {
        sink.leaf(text, SeparatorFlags::NONE, source())
            .expect("non-empty text");
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut sink = FragmentSink::new();
        assert!(sink.leaf("", SeparatorFlags::NONE, source()).is_err());
    }

    #[test]
    fn test_empty_scope_contributes_nothing() {
        let mut sink = FragmentSink::new();
        leaf(&mut sink, "a");
        sink.enter(Orientation::Vertical, true);
        sink.exit();
        leaf(&mut sink, "b");
        assert_eq!(sink.finish("  "), "ab");
    }

    #[test]
    fn test_vertical_scope_opens_and_closes_lines() {
        let mut sink = FragmentSink::new();
        leaf(&mut sink, "a");
        sink.enter(Orientation::Vertical, false);
        leaf(&mut sink, "b");
        sink.exit();
        leaf(&mut sink, "c");
        assert_eq!(sink.finish("  "), "a\nb\nc");
    }

    #[test]
    fn test_indented_scope_depth_applies_to_interior() {
        let mut sink = FragmentSink::new();
        leaf(&mut sink, "a");
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "b");
        sink.exit();
        leaf(&mut sink, "c");
        // The interior is indented; the line after the scope is not.
        assert_eq!(sink.finish("  "), "a\n  b\nc");
    }

    #[test]
    fn test_horizontal_indented_scope_closes_line_only() {
        let mut sink = FragmentSink::new();
        leaf(&mut sink, "a");
        sink.enter(Orientation::Horizontal, true);
        leaf(&mut sink, "b");
        sink.exit();
        leaf(&mut sink, "c");
        // No leading break for horizontal scopes, but the indented scope
        // still closes on a fresh line.
        assert_eq!(sink.finish("  "), "ab\nc");
    }

    #[test]
    fn test_nested_scopes_restore_depth() {
        let mut sink = FragmentSink::new();
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "a");
        sink.enter(Orientation::Vertical, true);
        leaf(&mut sink, "b");
        sink.exit();
        leaf(&mut sink, "c");
        sink.exit();
        let depths: Vec<usize> = sink.fragments().iter().map(Fragment::depth).collect();
        assert_eq!(depths, vec![1, 2, 1]);
    }

    #[test]
    fn test_end_line_rewrites_last_fragment() {
        let mut sink = FragmentSink::new();
        leaf(&mut sink, "a");
        sink.end_line();
        leaf(&mut sink, "b");
        assert_eq!(sink.finish("  "), "a\nb");
    }

    #[test]
    fn test_end_line_on_empty_sink_is_noop() {
        let mut sink = FragmentSink::new();
        sink.end_line();
        assert_eq!(sink.finish("  "), "");
    }
}
