//! Emitted text fragments and the separator/indentation algebra.
//!
//! A [`Fragment`] is one unit of emitted text annotated with its nesting
//! depth and its [`SeparatorFlags`]. The renderer's fragment-stream backend
//! accumulates fragments in emission order; [`join`] then resolves the
//! separator intents against each other and injects indentation to produce
//! the final text.
//!
//! # Resolution rules
//!
//! Per fragment, in stream order:
//!
//! 1. The first fragment's before-separators and the last fragment's
//!    after-separators are dropped; nothing is adjacent to them.
//! 2. When the previous fragment requests a newline after itself and the
//!    current one requests a newline before itself, the current request is
//!    dropped (one break, not a blank line). Likewise for doubled spaces.
//! 3. Whenever a line break is immediately followed by fragment text, that
//!    text is prefixed with the indent unit repeated `depth` times. A bare
//!    trailing break stays unindented.
//! 4. A first fragment created inside an already-open indent scope
//!    (`depth > 0`) is prefixed directly, since no break precedes it.

use log::trace;
use thiserror::Error;

use crate::{identifier::QualifiedName, separator::SeparatorFlags};

/// The default indent unit: two spaces per nesting level.
pub const DEFAULT_INDENT: &str = "  ";

/// Errors produced when constructing a fragment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    /// A fragment was constructed with empty text.
    #[error("fragment for `{0}` has empty text")]
    EmptyText(QualifiedName),
}

/// One unit of emitted text plus its nesting depth and separator intent.
///
/// Fragments are immutable after creation, apart from the forced-break
/// rewrites ([`force_newline_before`](Self::force_newline_before) /
/// [`force_newline_after`](Self::force_newline_after)) that scope
/// bookkeeping applies to the first and last fragment of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    depth: usize,
    separator: SeparatorFlags,
    source: QualifiedName,
}

impl Fragment {
    /// Create a fragment.
    ///
    /// # Arguments
    ///
    /// * `text` - The emitted text; must be non-empty
    /// * `depth` - The nesting depth at emission time
    /// * `separator` - The spacing intent on both sides
    /// * `source` - The qualified type of the node that produced the text
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::EmptyText`] when `text` is empty.
    pub fn new(
        text: impl Into<String>,
        depth: usize,
        separator: SeparatorFlags,
        source: QualifiedName,
    ) -> Result<Self, FragmentError> {
        let text = text.into();
        if text.is_empty() {
            return Err(FragmentError::EmptyText(source));
        }
        Ok(Self {
            text,
            depth,
            separator,
            source,
        })
    }

    /// The emitted text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The nesting depth at emission time.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The spacing intent on both sides.
    pub fn separator(&self) -> SeparatorFlags {
        self.separator
    }

    /// The qualified type of the node that produced the text.
    pub fn source(&self) -> QualifiedName {
        self.source
    }

    /// Force a leading line break (vertical group openings).
    pub fn force_newline_before(&mut self) {
        self.separator.force_newline_before();
    }

    /// Force a trailing line break (vertical and indented group closings).
    pub fn force_newline_after(&mut self) {
        self.separator.force_newline_after();
    }
}

/// Join a fragment stream into final text with the default two-space indent.
pub fn join(fragments: &[Fragment]) -> String {
    join_with(fragments, DEFAULT_INDENT)
}

/// Join a fragment stream into final text using the given indent unit.
///
/// Applies the resolution rules in the [module documentation](self) in a
/// single pass. Deterministic: identical input yields identical output.
pub fn join_with(fragments: &[Fragment], indent_unit: &str) -> String {
    trace!(fragments = fragments.len(); "Joining fragment stream");
    let mut out = String::new();
    let last_index = fragments.len().saturating_sub(1);

    for (index, fragment) in fragments.iter().enumerate() {
        let separator = fragment.separator();
        let first = index == 0;
        let last = index == last_index;
        let previous = index.checked_sub(1).map(|i| fragments[i].separator());

        let mut newline_before = separator.newline_before() && !first;
        let mut space_before = separator.space_before() && !first;
        let newline_after = separator.newline_after() && !last;
        let space_after = separator.space_after() && !last;

        // Collapse duplicated separators at the junction with the previous
        // fragment; only same-kind duplicates collapse.
        if let Some(previous) = previous {
            if previous.newline_after() {
                newline_before = false;
            }
            if previous.space_after() {
                space_before = false;
            }
        }

        if newline_before {
            out.push('\n');
        }
        if space_before {
            out.push(' ');
        }
        if (out.is_empty() || out.ends_with('\n')) && fragment.depth() > 0 {
            for _ in 0..fragment.depth() {
                out.push_str(indent_unit);
            }
        }
        out.push_str(fragment.text());
        if newline_after {
            out.push('\n');
        }
        if space_after {
            out.push(' ');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> QualifiedName {
        QualifiedName::new("test", "leaf")
    }

    fn fragment(text: &str, depth: usize, separator: SeparatorFlags) -> Fragment {
        Fragment::new(text, depth, separator, source()).expect("non-empty text")
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert_eq!(
            Fragment::new("", 0, SeparatorFlags::NONE, source()),
            Err(FragmentError::EmptyText(source()))
        );
    }

    #[test]
    fn test_join_empty_stream() {
        assert_eq!(join(&[]), "");
    }

    #[test]
    fn test_join_plain_concatenation() {
        let fragments = vec![
            fragment("1", 0, SeparatorFlags::NONE),
            fragment("2", 0, SeparatorFlags::NONE),
        ];
        assert_eq!(join(&fragments), "12");
    }

    #[test]
    fn test_boundary_separators_are_dropped() {
        let fragments = vec![fragment("x", 0, SeparatorFlags::SPACE_AROUND)];
        assert_eq!(join(&fragments), "x");

        let fragments = vec![
            fragment("a", 0, SeparatorFlags::NEWLINE_BEFORE),
            fragment("b", 0, SeparatorFlags::NEWLINE_AFTER),
        ];
        assert_eq!(join(&fragments), "ab");
    }

    #[test]
    fn test_adjacent_newlines_collapse() {
        let fragments = vec![
            fragment("a", 0, SeparatorFlags::NEWLINE_AFTER),
            fragment("b", 0, SeparatorFlags::NEWLINE_BEFORE),
        ];
        assert_eq!(join(&fragments), "a\nb");
    }

    #[test]
    fn test_adjacent_spaces_collapse() {
        let fragments = vec![
            fragment("a", 0, SeparatorFlags::SPACE_AFTER),
            fragment("b", 0, SeparatorFlags::SPACE_BEFORE),
        ];
        assert_eq!(join(&fragments), "a b");
    }

    #[test]
    fn test_space_then_newline_are_distinct_kinds() {
        // A trailing space before another fragment's forced break is kept;
        // only same-kind duplicates collapse.
        let fragments = vec![
            fragment("a", 0, SeparatorFlags::SPACE_AFTER),
            fragment("b", 0, SeparatorFlags::NEWLINE_BEFORE),
        ];
        assert_eq!(join(&fragments), "a \nb");
    }

    #[test]
    fn test_indentation_follows_line_breaks() {
        let fragments = vec![
            fragment("a", 0, SeparatorFlags::NEWLINE_AFTER),
            fragment("b", 1, SeparatorFlags::NEWLINE_AFTER),
            fragment("c", 0, SeparatorFlags::NONE),
        ];
        assert_eq!(join(&fragments), "a\n  b\nc");
    }

    #[test]
    fn test_indentation_depth_is_per_fragment() {
        let fragments = vec![
            fragment("a", 0, SeparatorFlags::NEWLINE_AFTER),
            fragment("b", 2, SeparatorFlags::NEWLINE_AFTER),
            fragment("c", 1, SeparatorFlags::NONE),
        ];
        assert_eq!(join(&fragments), "a\n    b\n  c");
    }

    #[test]
    fn test_no_indent_mid_line() {
        // Depth only matters at a line start
        let fragments = vec![
            fragment("a", 1, SeparatorFlags::SPACE_AFTER),
            fragment("b", 1, SeparatorFlags::NONE),
        ];
        assert_eq!(join(&fragments), "  a b");
    }

    #[test]
    fn test_first_fragment_depth_correction() {
        let fragments = vec![
            fragment("a", 1, SeparatorFlags::NEWLINE_AFTER),
            fragment("b", 1, SeparatorFlags::NONE),
        ];
        assert_eq!(join(&fragments), "  a\n  b");
    }

    #[test]
    fn test_custom_indent_unit() {
        let fragments = vec![
            fragment("a", 0, SeparatorFlags::NEWLINE_AFTER),
            fragment("b", 1, SeparatorFlags::NONE),
        ];
        assert_eq!(join_with(&fragments, "\t"), "a\n\tb");
        assert_eq!(join_with(&fragments, "    "), "a\n    b");
    }

    #[test]
    fn test_forced_break_rewrites() {
        let mut last = fragment("b", 1, SeparatorFlags::SPACE_AFTER);
        last.force_newline_after();
        let fragments = vec![
            fragment("a", 1, SeparatorFlags::NONE),
            last,
            fragment("c", 0, SeparatorFlags::NONE),
        ];
        assert_eq!(join(&fragments), "  ab\nc");
    }
}
