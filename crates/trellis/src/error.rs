//! Error types for Trellis operations.
//!
//! [`TrellisError`] aborts a whole conversion. Problems that only lose part of the
//! source are reported as [`Diagnostic`]s alongside the converted document.

mod collector;
mod diagnostic;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use severity::Severity;

use std::io;

use thiserror::Error;

use trellis_core::{geometry::SingularMatrix, identifier::NodeId, target::ArenaError};

use crate::format::Encoding;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported input encoding: {0}")]
    UnsupportedFormat(Encoding),

    #[error("node id {0} appears more than once in the document")]
    DuplicateNode(NodeId),

    #[error("parent transform of node {node} cannot be inverted")]
    SingularTransform {
        node: NodeId,
        #[source]
        source: SingularMatrix,
    },

    #[error("path of node {node} has {points} points but {codes} command codes")]
    MalformedPath {
        node: NodeId,
        points: usize,
        codes: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("item tree error: {0}")]
    Arena(#[from] ArenaError),
}

impl TrellisError {
    /// Create a `SingularTransform` error for the node being placed.
    pub fn singular_transform(node: NodeId, source: SingularMatrix) -> Self {
        Self::SingularTransform { node, source }
    }
}
