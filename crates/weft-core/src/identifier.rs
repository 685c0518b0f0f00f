//! Qualified type names using string interning for efficient storage and comparison
//!
//! This module provides the [`QualifiedName`] type with an efficient
//! string-interner based approach. A qualified name is the
//! `language.type` pair identifying a grammar type definition.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};
use thiserror::Error;

/// Global string interner for efficient qualified name storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Errors produced when reading a qualified name from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// The input lacked a `.` between the language and the type name.
    #[error("`{0}` is not a qualified name (expected `language.type`)")]
    Unqualified(String),
}

/// Efficient qualified type name using string interning
///
/// A `QualifiedName` identifies one grammar type definition as the pair of a
/// language name and a type name, stored as the interned dotted form
/// `language.type`. Interning makes names `Copy` and comparison a symbol
/// equality check, which matters because the interpreter resolves a name per
/// visited tree node.
///
/// # Examples
///
/// ```
/// use weft_core::identifier::QualifiedName;
///
/// // Create names from their parts
/// let element = QualifiedName::new("xml", "element");
///
/// // Or parse the dotted form
/// let parsed = QualifiedName::parse("xml.element").unwrap();
/// assert_eq!(element, parsed);
///
/// assert_eq!(element.language(), "xml");
/// assert_eq!(element.local_name(), "element");
/// assert_eq!(element, "xml.element");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedName(DefaultSymbol);

impl QualifiedName {
    /// Creates a `QualifiedName` from its language and type name parts.
    ///
    /// # Arguments
    ///
    /// * `language` - The language the type definition belongs to
    /// * `name` - The type name within that language
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_core::identifier::QualifiedName;
    ///
    /// let rule = QualifiedName::new("css", "rule");
    /// let object = QualifiedName::new("json", "object");
    /// ```
    pub fn new(language: &str, name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(format!("{language}.{name}"));
        Self(symbol)
    }

    /// Parses a `QualifiedName` from its dotted `language.type` form.
    ///
    /// The language is everything before the first `.`; both parts must be
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Unqualified`] when the input has no `.` or either
    /// part is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_core::identifier::QualifiedName;
    ///
    /// assert!(QualifiedName::parse("sql.select").is_ok());
    /// assert!(QualifiedName::parse("select").is_err());
    /// assert!(QualifiedName::parse(".select").is_err());
    /// ```
    pub fn parse(qualified: &str) -> Result<Self, NameError> {
        match qualified.split_once('.') {
            Some((language, name)) if !language.is_empty() && !name.is_empty() => {
                let mut interner = interner().lock().expect("Failed to acquire interner lock");
                let symbol = interner.get_or_intern(qualified);
                Ok(Self(symbol))
            }
            _ => Err(NameError::Unqualified(qualified.to_string())),
        }
    }

    /// Get the language part of this name.
    pub fn language(&self) -> String {
        let resolved = self.resolve();
        let (language, _) = resolved
            .split_once('.')
            .expect("Qualified name should contain a dot");
        language.to_string()
    }

    /// Get the type name part of this name, without the language qualifier.
    pub fn local_name(&self) -> String {
        let resolved = self.resolve();
        let (_, name) = resolved
            .split_once('.')
            .expect("Qualified name should contain a dot");
        name.to_string()
    }

    /// Resolve the interned dotted form.
    fn resolve(&self) -> String {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        interner
            .resolve(self.0)
            .expect("Qualified name should exist in interner")
            .to_string()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let name = interner
            .resolve(self.0)
            .expect("Qualified name should exist in interner");
        write!(f, "{name}")
    }
}

impl PartialEq<&str> for QualifiedName {
    fn eq(&self, other: &&str) -> bool {
        self.resolve() == **other
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        QualifiedName::parse(&text).map_err(serde::de::Error::custom)
    }
}
