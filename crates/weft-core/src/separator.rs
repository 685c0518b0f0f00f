//! Separator intent attached to emitted text.
//!
//! A [`SeparatorFlags`] value records whether a piece of emitted text wants a
//! space or a forced line break on either side. Spaces and line breaks are
//! mutually exclusive on a single value: a break always lands on a fresh
//! line, so a space next to it would be meaningless. The constructor enforces
//! this instead of leaving it to convention.

use thiserror::Error;

/// Errors produced when constructing separator flags.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeparatorError {
    /// A space flag was combined with a newline flag.
    #[error("separator flags cannot combine a space with a newline")]
    ConflictingSeparators,
}

/// Before/after spacing intent for one emitted fragment or leaf.
///
/// # Examples
///
/// ```
/// use weft_core::separator::SeparatorFlags;
///
/// let around = SeparatorFlags::SPACE_AROUND;
/// assert!(around.space_before() && around.space_after());
///
/// // Spaces and newlines never coexist on one value
/// assert!(SeparatorFlags::new(true, false, false, true).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeparatorFlags {
    space_before: bool,
    space_after: bool,
    newline_before: bool,
    newline_after: bool,
}

impl SeparatorFlags {
    /// No separator on either side.
    pub const NONE: Self = Self {
        space_before: false,
        space_after: false,
        newline_before: false,
        newline_after: false,
    };

    /// A single space before the text.
    pub const SPACE_BEFORE: Self = Self {
        space_before: true,
        space_after: false,
        newline_before: false,
        newline_after: false,
    };

    /// A single space after the text.
    pub const SPACE_AFTER: Self = Self {
        space_before: false,
        space_after: true,
        newline_before: false,
        newline_after: false,
    };

    /// A single space on both sides.
    pub const SPACE_AROUND: Self = Self {
        space_before: true,
        space_after: true,
        newline_before: false,
        newline_after: false,
    };

    /// A forced line break before the text.
    pub const NEWLINE_BEFORE: Self = Self {
        space_before: false,
        space_after: false,
        newline_before: true,
        newline_after: false,
    };

    /// A forced line break after the text.
    pub const NEWLINE_AFTER: Self = Self {
        space_before: false,
        space_after: false,
        newline_before: false,
        newline_after: true,
    };

    /// Create flags from the four sides, rejecting space/newline mixtures.
    ///
    /// # Errors
    ///
    /// Returns [`SeparatorError::ConflictingSeparators`] when any space flag
    /// is combined with any newline flag.
    pub fn new(
        space_before: bool,
        space_after: bool,
        newline_before: bool,
        newline_after: bool,
    ) -> Result<Self, SeparatorError> {
        let spaced = space_before || space_after;
        let broken = newline_before || newline_after;
        if spaced && broken {
            return Err(SeparatorError::ConflictingSeparators);
        }
        Ok(Self {
            space_before,
            space_after,
            newline_before,
            newline_after,
        })
    }

    /// Whether a space is requested before the text.
    pub fn space_before(&self) -> bool {
        self.space_before
    }

    /// Whether a space is requested after the text.
    pub fn space_after(&self) -> bool {
        self.space_after
    }

    /// Whether a forced line break is requested before the text.
    pub fn newline_before(&self) -> bool {
        self.newline_before
    }

    /// Whether a forced line break is requested after the text.
    pub fn newline_after(&self) -> bool {
        self.newline_after
    }

    /// Whether no separator is requested on either side.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Force a leading line break, displacing any leading space.
    ///
    /// Used by scope bookkeeping when a vertical group must start on a line
    /// of its own. The break lands on a fresh line, so a leading space would
    /// be invisible anyway; dropping it preserves the space/newline
    /// exclusivity invariant.
    pub fn force_newline_before(&mut self) {
        self.newline_before = true;
        self.space_before = false;
    }

    /// Force a trailing line break, displacing any trailing space.
    ///
    /// The counterpart of [`force_newline_before`](Self::force_newline_before)
    /// for closing a scope on a fresh line.
    pub fn force_newline_after(&mut self) {
        self.newline_after = true;
        self.space_after = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(SeparatorFlags::default(), SeparatorFlags::NONE);
        assert!(SeparatorFlags::default().is_none());
    }

    #[test]
    fn test_constants() {
        assert!(SeparatorFlags::SPACE_BEFORE.space_before());
        assert!(!SeparatorFlags::SPACE_BEFORE.space_after());
        assert!(SeparatorFlags::SPACE_AROUND.space_before());
        assert!(SeparatorFlags::SPACE_AROUND.space_after());
        assert!(SeparatorFlags::NEWLINE_BEFORE.newline_before());
        assert!(SeparatorFlags::NEWLINE_AFTER.newline_after());
    }

    #[test]
    fn test_new_accepts_pure_sides() {
        assert!(SeparatorFlags::new(true, true, false, false).is_ok());
        assert!(SeparatorFlags::new(false, false, true, true).is_ok());
        assert!(SeparatorFlags::new(false, false, false, false).is_ok());
    }

    #[test]
    fn test_new_rejects_space_newline_mixture() {
        assert_eq!(
            SeparatorFlags::new(true, false, false, true),
            Err(SeparatorError::ConflictingSeparators)
        );
        assert_eq!(
            SeparatorFlags::new(false, true, true, false),
            Err(SeparatorError::ConflictingSeparators)
        );
    }

    #[test]
    fn test_force_newline_after_displaces_space() {
        let mut flags = SeparatorFlags::SPACE_AROUND;
        flags.force_newline_after();
        assert!(flags.newline_after());
        assert!(!flags.space_after());
        // The leading space is untouched
        assert!(flags.space_before());
    }

    #[test]
    fn test_force_newline_before_displaces_space() {
        let mut flags = SeparatorFlags::SPACE_BEFORE;
        flags.force_newline_before();
        assert!(flags.newline_before());
        assert!(!flags.space_before());
    }

    #[test]
    fn test_force_is_idempotent() {
        let mut flags = SeparatorFlags::NEWLINE_AFTER;
        flags.force_newline_after();
        assert_eq!(flags, SeparatorFlags::NEWLINE_AFTER);
    }
}
