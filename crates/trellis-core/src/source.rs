//! The source object model.
//!
//! A source document is a tree: a [`Drawing`] holds [`Layer`]s, a [`Library`] holds
//! [`Master`]s, and both hold [`SourceNode`]s. Nodes place themselves with an arbitrary
//! affine scene transform and describe their outline as an absolute path with
//! per-point command codes.
//!
//! The converter only reads this model.
//!
//! # Organization
//!
//! - [`document`] - Drawings, layers, libraries and masters
//! - [`node`] - Groups, composite shapes, model leaves, ports and links
//! - [`style`] - Style sheets and their fill, stroke, arrowhead, text and interactivity entries

pub mod document;
pub mod node;
pub mod style;

pub use document::*;
pub use node::*;
pub use style::*;
