//! Layout engine selection.
//!
//! Each containment scope is arranged independently by a [`ScopeEngine`].
//! The builder caches engine instances per [`LayoutEngine`] variant so a
//! hierarchy with many scopes configures each engine once.

mod layered;
mod sugiyama;

use std::collections::HashMap;

use stencil_core::{
    geometry::{Bounds, Size},
    model::LayoutEngine,
};

use crate::error::Error;

/// An item to be arranged within one scope: a node footprint or a sized
/// nested group.
#[derive(Debug, Clone, Copy)]
pub struct ScopeItem {
    size: Size,
}

impl ScopeItem {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// A projected edge between two scope items, by item index.
#[derive(Debug, Clone, Copy)]
pub struct ScopeEdge {
    source: usize,
    target: usize,
    label_size: Size,
}

impl ScopeEdge {
    pub fn new(source: usize, target: usize, label_size: Size) -> Self {
        Self {
            source,
            target,
            label_size,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn label_size(&self) -> Size {
        self.label_size
    }
}

/// Arranges the items of one containment scope.
///
/// Implementations return one bounds per item, in item order, normalized so
/// the arrangement's top-left corner is at the origin. The same items and
/// edges must always produce the same bounds.
pub trait ScopeEngine {
    fn arrange(&self, items: &[ScopeItem], edges: &[ScopeEdge]) -> Result<Vec<Bounds>, Error>;
}

/// Builder for creating and configuring layout engines.
pub struct EngineBuilder {
    engines: HashMap<LayoutEngine, Box<dyn ScopeEngine>>,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            horizontal_spacing: 50.0,
            vertical_spacing: 60.0,
        }
    }

    /// Set the horizontal spacing between items in a layer.
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the vertical spacing between layers.
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Get an engine of the specified type with configured options.
    pub fn engine(&mut self, engine_type: LayoutEngine) -> &dyn ScopeEngine {
        let engine = self.engines.entry(engine_type).or_insert_with(|| {
            let engine: Box<dyn ScopeEngine> = match engine_type {
                LayoutEngine::Layered => Box::new(layered::Engine::new(
                    self.horizontal_spacing,
                    self.vertical_spacing,
                )),
                LayoutEngine::Sugiyama => Box::new(sugiyama::Engine::new(
                    self.horizontal_spacing,
                    self.vertical_spacing,
                )),
            };
            engine
        });
        &**engine
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_caches_engines() {
        let mut builder = EngineBuilder::new();
        let items = [ScopeItem::new(Size::new(10.0, 10.0))];

        let first = builder.engine(LayoutEngine::Layered).arrange(&items, &[]);
        let second = builder.engine(LayoutEngine::Layered).arrange(&items, &[]);

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(builder.engines.len(), 1);
    }

    #[test]
    fn test_both_engine_types_available() {
        let mut builder = EngineBuilder::new();
        builder.engine(LayoutEngine::Layered);
        builder.engine(LayoutEngine::Sugiyama);

        assert_eq!(builder.engines.len(), 2);
    }
}
