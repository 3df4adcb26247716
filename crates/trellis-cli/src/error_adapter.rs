//! Error adapter for rendering Trellis errors and diagnostics with miette.
//!
//! This module provides the bridge between the library's error and diagnostic
//! types and miette's rich report formatting used in the CLI.
//!
//! A failed conversion yields a single [`TrellisError`]; a successful one may
//! still carry any number of [`Diagnostic`]s, each rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity as MietteSeverity};

use trellis::{Diagnostic, Severity, TrellisError};

/// Adapter for a single conversion diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())?;
        if let Some(node) = self.diag.node() {
            write!(f, " (node {node})")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Warning => MietteSeverity::Warning,
            Severity::Note => MietteSeverity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for a fatal [`TrellisError`].
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Json(_) => "trellis::json",
            TrellisError::UnsupportedFormat(_) => "trellis::format",
            TrellisError::DuplicateNode(_)
            | TrellisError::SingularTransform { .. }
            | TrellisError::MalformedPath { .. }
            | TrellisError::Arena(_) => "trellis::source",
            TrellisError::Config(_) => "trellis::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TrellisError::UnsupportedFormat(_) => Some(Box::new(
                "only JSON source documents can be read; export the drawing as JSON first",
            )),
            _ => None,
        }
    }
}

/// A report that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A conversion diagnostic.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A fatal error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`TrellisError`] into a reportable error.
pub fn to_reportable(err: &TrellisError) -> Reportable<'_> {
    Reportable::Error(ErrorAdapter(err))
}

/// Convert conversion diagnostics into reportables, one per diagnostic.
pub fn diagnostics_to_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use trellis::{DiagnosticCode, format::Encoding, identifier::NodeId};

    use super::*;

    #[test]
    fn test_diagnostic_adapter() {
        let diag = Diagnostic::warning("curved routing has no counterpart")
            .with_code(DiagnosticCode::W101)
            .with_help("reroute the connector");

        let reportables = diagnostics_to_reportables(std::slice::from_ref(&diag));
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert_eq!(reportable.to_string(), "curved routing has no counterpart");
        assert_eq!(reportable.code().unwrap().to_string(), "W101");
        assert_eq!(reportable.help().unwrap().to_string(), "reroute the connector");
        assert_eq!(reportable.severity(), Some(MietteSeverity::Warning));
    }

    #[test]
    fn test_diagnostic_mentions_node() {
        let node = NodeId::random();
        let diag = Diagnostic::note("port ignored").with_node(node);
        let adapter = DiagnosticAdapter::new(&diag);

        assert_eq!(adapter.to_string(), format!("port ignored (node {node})"));
        assert_eq!(adapter.severity(), Some(MietteSeverity::Advice));
        assert!(adapter.code().is_none());
    }

    #[test]
    fn test_error_adapter() {
        let err = TrellisError::UnsupportedFormat(Encoding::Markup);
        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "unsupported input encoding: markup");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
        assert_eq!(reportable.code().unwrap().to_string(), "trellis::format");
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_config_error_code() {
        let err = TrellisError::Config("screen_dpi must be a positive number, got 0".to_string());
        let reportable = to_reportable(&err);

        assert_eq!(reportable.code().unwrap().to_string(), "trellis::config");
        assert!(reportable.help().is_none());
    }
}
