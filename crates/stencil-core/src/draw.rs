//! Drawable primitives for diagram rendering.
//!
//! These types sit between the diagram model and the SVG exporter: strokes
//! describe how connection lines look, text blocks carry multi-line labels
//! with their measured size, and glyphs draw the catalog icons.

mod glyph;
mod stroke;
mod text;

pub use glyph::{Glyph, ICON_SIZE};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::TextBlock;
