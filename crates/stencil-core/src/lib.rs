//! Stencil Core Types and Definitions
//!
//! This crate provides the foundational types for the Stencil diagramming
//! library. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Catalog**: The fixed catalog of node icons ([`catalog`] module)
//! - **Draw**: Drawable primitives for rendering ([`draw`] module)
//! - **Model**: The immutable, finalized diagram model ([`model`] module)

pub mod catalog;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod model;
