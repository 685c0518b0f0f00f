//! Emission sinks consumed by the attribute interpreter.
//!
//! The interpreter walks attribute declarations and emits an ordered stream
//! of leaves and scopes; a [`Sink`] decides how those emissions become text.
//! Keeping the walk generic over the sink is what keeps the two backends
//! semantically identical — there is exactly one interpreter.
//!
//! # Pipeline Position
//!
//! ```text
//! Grammar Schema + Syntax Tree
//!     ↓ interpret
//! Leaves and Scopes (this module's vocabulary)
//!     ↓ sink
//! Fragment Stream (stream) or Layout Document (document)
//!     ↓ join / print
//! Final Text
//! ```
//!
//! # Available Backends
//!
//! - [`stream`] — fragments resolved by the separator/indentation algebra
//! - [`document`] — a width-aware document printed by the `pretty` crate

pub(crate) mod document;
pub(crate) mod stream;

use weft_core::{
    fragment::FragmentError, grammar::Orientation, identifier::QualifiedName,
    separator::SeparatorFlags,
};

/// Abstraction over the rendering backends.
///
/// Scopes correspond to grammar containers. A sink must drop a scope that
/// received no leaves (so empty containers contribute nothing at all), and
/// must force the opening/closing line breaks of vertical and indented
/// scopes that did receive content.
pub(crate) trait Sink {
    /// Emit one leaf of text with its separator intent.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::EmptyText`] when `text` is empty.
    fn leaf(
        &mut self,
        text: &str,
        separator: SeparatorFlags,
        source: QualifiedName,
    ) -> Result<(), FragmentError>;

    /// Open a scope with the given orientation, adding an indentation level
    /// when `indented` is set.
    fn enter(&mut self, orientation: Orientation, indented: bool);

    /// Close the innermost scope.
    fn exit(&mut self);

    /// The number of leaves emitted so far, across all scopes.
    fn leaves(&self) -> usize;

    /// Force the most recently emitted leaf to end its line.
    ///
    /// No-op when nothing has been emitted yet.
    fn end_line(&mut self);
}
