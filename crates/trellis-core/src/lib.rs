//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis converter:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`]) and node ids ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS and ARGB support ([`color::Color`])
//! - **Geometry**: Points, sizes, rectangles and affine transforms ([`geometry`] module)
//! - **Source**: The source document model the converter reads ([`source`] module)
//! - **Target**: The target document model the converter produces ([`target`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod source;
pub mod target;
