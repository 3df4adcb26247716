//! The target object model.
//!
//! Target items place themselves with width, height, rotation and a location pin
//! instead of an arbitrary transform, and describe their outline as relative
//! unit-square paths. Items live in an [`ItemArena`] and are addressed by
//! [`ItemHandle`]; documents hold handles.
//!
//! # Organization
//!
//! - [`arena`] - Item storage, parent links and page transforms
//! - [`document`] - Drawings with a page, libraries of items
//! - [`field`] - Literal or formula-driven numeric fields
//! - [`item`] - Items, shapes, text blocks, connectors and glue
//! - [`path`] - Geometry and path commands
//! - [`port`] - Connection ports
//! - [`style`] - Fills, strokes, arrowheads, cursors and text formatting

pub mod arena;
pub mod document;
pub mod field;
pub mod item;
pub mod path;
pub mod port;
pub mod style;

pub use arena::*;
pub use document::*;
pub use field::*;
pub use item::*;
pub use path::*;
pub use port::*;
pub use style::*;
