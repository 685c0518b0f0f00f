//! Weft Core Types and Definitions
//!
//! This crate provides the foundational types for the Weft rendering engine.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned qualified type names
//!   ([`identifier::QualifiedName`])
//! - **Trees**: The read-only syntax tree snapshot supplied per render call
//!   ([`tree::SyntaxNode`])
//! - **Grammar**: The attribute declaration schema loaded once per language
//!   ([`grammar`] module)
//! - **Separators**: Spacing intent attached to emitted text
//!   ([`separator::SeparatorFlags`])
//! - **Fragments**: Emitted text units plus the separator/indentation algebra
//!   that joins them into final text ([`fragment`] module)

pub mod fragment;
pub mod grammar;
pub mod identifier;
pub mod separator;
pub mod tree;
