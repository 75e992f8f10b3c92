//! The default layered engine.
//!
//! Items are assigned to horizontal layers by longest-path layering over
//! the scope's projected edges, then each layer is centered on the widest
//! one. Everything is driven by item index order, so the arrangement is
//! fully deterministic.

use std::collections::VecDeque;

use log::trace;

use stencil_core::geometry::Bounds;

use crate::{
    error::Error,
    layout::engines::{ScopeEdge, ScopeEngine, ScopeItem},
};

/// Extra clearance below a layer when an edge into the next layer carries a
/// label, so the label does not collide with the figures around it.
const LABEL_CLEARANCE: f32 = 12.0;

pub struct Engine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Engine {
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
        }
    }
}

impl ScopeEngine for Engine {
    fn arrange(&self, items: &[ScopeItem], edges: &[ScopeEdge]) -> Result<Vec<Bounds>, Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let layers = assign_layers(items.len(), edges);
        let layer_count = layers.iter().max().map_or(1, |max| max + 1);

        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
        for (idx, &layer) in layers.iter().enumerate() {
            rows[layer].push(idx);
        }
        trace!(layer_count, item_count = items.len(); "Assigned items to layers");

        let row_width = |row: &[usize]| -> f32 {
            let items_width: f32 = row.iter().map(|&idx| items[idx].size().width()).sum();
            items_width + self.horizontal_spacing * (row.len().saturating_sub(1)) as f32
        };
        let max_row_width = rows.iter().map(|row| row_width(row)).fold(0.0, f32::max);

        let mut bounds = vec![Bounds::default(); items.len()];
        let mut y = 0.0;
        for (layer, row) in rows.iter().enumerate() {
            let row_height = row
                .iter()
                .map(|&idx| items[idx].size().height())
                .fold(0.0, f32::max);

            let mut x = (max_row_width - row_width(row)) / 2.0;
            for &idx in row {
                let size = items[idx].size();
                let top = y + (row_height - size.height()) / 2.0;
                bounds[idx] = Bounds::new(x, top, x + size.width(), top + size.height());
                x += size.width() + self.horizontal_spacing;
            }

            y += row_height + self.layer_gap(layer, &layers, edges);
        }

        Ok(bounds)
    }
}

impl Engine {
    /// Vertical gap below `layer`, widened to fit labels on edges that
    /// continue into the next layer.
    fn layer_gap(&self, layer: usize, layers: &[usize], edges: &[ScopeEdge]) -> f32 {
        let label_height = edges
            .iter()
            .filter(|edge| {
                let (from, to) = (layers[edge.source()], layers[edge.target()]);
                from.min(to) == layer && from != to
            })
            .map(|edge| edge.label_size().height())
            .fold(0.0, f32::max);

        if label_height > 0.0 {
            self.vertical_spacing.max(label_height + LABEL_CLEARANCE)
        } else {
            self.vertical_spacing
        }
    }
}

/// Longest-path layering with cycles broken in item index order.
fn assign_layers(count: usize, edges: &[ScopeEdge]) -> Vec<usize> {
    let mut outgoing = vec![Vec::new(); count];
    let mut indegree = vec![0usize; count];
    for edge in edges {
        if edge.source() == edge.target() {
            continue;
        }
        outgoing[edge.source()].push(edge.target());
        indegree[edge.target()] += 1;
    }

    let mut layer = vec![0usize; count];
    let mut done = vec![false; count];
    let mut queue: VecDeque<usize> = (0..count).filter(|&idx| indegree[idx] == 0).collect();
    let mut remaining = count;

    while remaining > 0 {
        let next = match queue.pop_front() {
            Some(idx) if !done[idx] => idx,
            Some(_) => continue,
            // All remaining items sit on cycles; force the first one.
            None => (0..count)
                .find(|&idx| !done[idx])
                .expect("Unprocessed item must exist while remaining > 0"),
        };

        done[next] = true;
        remaining -= 1;

        for &target in &outgoing[next] {
            if done[target] {
                continue;
            }
            layer[target] = layer[target].max(layer[next] + 1);
            indegree[target] = indegree[target].saturating_sub(1);
            if indegree[target] == 0 {
                queue.push_back(target);
            }
        }
    }

    layer
}
