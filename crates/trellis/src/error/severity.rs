//! Severity levels for diagnostics.
//!
//! Conversion never fails on a diagnostic; fatal problems are returned as
//! [`TrellisError`](crate::TrellisError) instead. Severity only ranks how much of
//! the source was lost.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Warning`] indicates that part of the source was dropped
/// - [`Severity::Note`] indicates a detail that was ignored without visible loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// An element or attribute was not converted.
    ///
    /// The target document is still valid but differs visibly from the source.
    Warning,

    /// An advisory message about an ignored detail.
    Note,
}

impl Severity {
    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` if this is a note severity.
    pub fn is_note(&self) -> bool {
        matches!(self, Severity::Note)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}
