//! Collector for accumulating diagnostics during a conversion run.

use log::{info, warn};

use crate::error::Diagnostic;

/// Accumulates diagnostics so a run can report everything it dropped instead of
/// stopping at the first unsupported element.
///
/// Every emitted diagnostic is also logged: warnings at `warn` level, notes at
/// `info` level.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let node = diagnostic.node().map(|id| id.to_string());
        if diagnostic.severity().is_warning() {
            warn!(node:? = node, code:? = diagnostic.code(); "{}", diagnostic.message());
        } else {
            info!(node:? = node, code:? = diagnostic.code(); "{}", diagnostic.message());
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity().is_warning())
            .count()
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
