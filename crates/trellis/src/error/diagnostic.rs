//! The diagnostic type reported by a conversion run.
//!
//! A [`Diagnostic`] records something the converter could not carry over: a
//! dropped element, a rejected port, a fill whose image could not be loaded.

use std::fmt;

use trellis_core::identifier::NodeId;

use crate::error::Severity;

/// Codes for categorizing conversion diagnostics.
///
/// Codes are organized by the stage that reports them:
/// - `W1xx` - Item creation
/// - `W2xx` - Ports and connections
/// - `W3xx` - Style translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // =========================================================================
    // Item creation (W1xx)
    // =========================================================================
    /// A node kind with no target counterpart was dropped.
    W100,

    /// A routable connector using curved routing was dropped.
    W101,

    // =========================================================================
    // Ports and connections (W2xx)
    // =========================================================================
    /// A port of a kind other than bounds or rotated bounds was ignored.
    W200,

    /// A port name was defined twice on one shape; the later one was ignored.
    W201,

    // =========================================================================
    // Style translation (W3xx)
    // =========================================================================
    /// An image fill could not be loaded.
    W300,

    /// A fill kind with no target counterpart was dropped.
    W301,
}

impl DiagnosticCode {
    /// Returns the code as a string like `"W100"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::W100 => "W100",
            DiagnosticCode::W101 => "W101",
            DiagnosticCode::W200 => "W200",
            DiagnosticCode::W201 => "W201",
            DiagnosticCode::W300 => "W300",
            DiagnosticCode::W301 => "W301",
        }
    }

    /// Returns a short description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticCode::W100 => "unsupported node kind",
            DiagnosticCode::W101 => "unsupported connector routing",
            DiagnosticCode::W200 => "unsupported port kind",
            DiagnosticCode::W201 => "duplicate port name",
            DiagnosticCode::W300 => "image fill not loaded",
            DiagnosticCode::W301 => "unsupported fill",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message about a source node that did not convert cleanly.
///
/// # Example
///
/// ```text
/// warning[W101]: connector `Dynamic connector.12` uses curved routing
///   node: 5b1e7f0c-2f6e-4c86-9f0e-6f1f0d6f2b0a
///   = help: switch the connector to right-angle or straight routing
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    node: Option<NodeId>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use trellis::error::{Diagnostic, DiagnosticCode};
    /// let diag = Diagnostic::warning("node kind `OleObject` has no counterpart")
    ///     .with_code(DiagnosticCode::W100)
    ///     .with_help("convert the object to a picture first");
    /// assert!(diag.severity().is_warning());
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the diagnostic code, if any.
    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the id of the source node the diagnostic is about, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the source node the diagnostic is about.
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            node: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Warning, "test warning");

        assert!(diag.severity().is_warning());
        assert!(!diag.severity().is_note());
        assert_eq!(diag.message(), "test warning");
        assert!(diag.code().is_none());
        assert!(diag.node().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_node() {
        let id = NodeId::random();
        let diag = Diagnostic::note("port ignored").with_node(id);

        assert_eq!(diag.node(), Some(id));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::warning("connector uses curved routing")
            .with_code(DiagnosticCode::W101);

        assert_eq!(diag.to_string(), "warning[W101]: connector uses curved routing");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::note("port `P1` ignored");

        assert_eq!(diag.to_string(), "note: port `P1` ignored");
    }

    #[test]
    fn test_code_descriptions_are_distinct() {
        let codes = [
            DiagnosticCode::W100,
            DiagnosticCode::W101,
            DiagnosticCode::W200,
            DiagnosticCode::W201,
            DiagnosticCode::W300,
            DiagnosticCode::W301,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.description(), b.description());
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
