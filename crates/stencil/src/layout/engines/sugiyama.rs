//! Layered drawing via the rust-sugiyama implementation of the Sugiyama
//! algorithm.
//!
//! The crate works on unit-spaced abstract coordinates, so results are
//! scaled up by the largest item footprint before use. Items that no edge
//! touches do not appear in its output and are appended in a row below the
//! connected arrangement.

use std::collections::HashMap;

use log::debug;
use rust_sugiyama::configure::Config;

use stencil_core::geometry::{Bounds, Point, Size};

use crate::{
    error::Error,
    layout::engines::{ScopeEdge, ScopeEngine, ScopeItem},
};

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

    /// Abstract center coordinates for every item an edge touches.
    fn connected_positions(
        &self,
        edges: &[(u32, u32)],
    ) -> Result<HashMap<usize, (f32, f32)>, Error> {
        let owned_edges = edges.to_vec();
        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: 3.0,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&owned_edges, &config)
        })
        .map_err(|_| Error::Layout("Sugiyama layout engine panicked".to_string()))?;

        let mut positions = HashMap::new();
        for (coords, _, _) in &layouts {
            for &(id, (x, y)) in coords {
                positions.insert(id as usize, (x as f32, y as f32));
            }
        }

        if positions.is_empty() {
            return Err(Error::Layout(
                "Sugiyama layout produced no positions".to_string(),
            ));
        }

        Ok(positions)
    }
}

impl ScopeEngine for Engine {
    fn arrange(&self, items: &[ScopeItem], edges: &[ScopeEdge]) -> Result<Vec<Bounds>, Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let sugiyama_edges: Vec<(u32, u32)> = edges
            .iter()
            .filter(|edge| edge.source() != edge.target())
            .map(|edge| (edge.source() as u32, edge.target() as u32))
            .collect();

        // Unit cell large enough for any item, so scaled abstract
        // coordinates cannot overlap.
        let max_size = items
            .iter()
            .map(ScopeItem::size)
            .fold(Size::default(), Size::max);
        let cell_width = max_size.width() + self.horizontal_spacing;
        let cell_height = max_size.height() + self.vertical_spacing;

        let mut centers: Vec<Option<Point>> = vec![None; items.len()];
        if !sugiyama_edges.is_empty() {
            debug!(
                item_count = items.len(),
                edge_count = sugiyama_edges.len();
                "Applying Sugiyama algorithm"
            );
            let abstract_positions = self.connected_positions(&sugiyama_edges)?;
            for (&id, &(x, y)) in &abstract_positions {
                if id < items.len() {
                    centers[id] = Some(Point::new(
                        x / 3.0 * cell_width,
                        // Source layers come back with smaller y, so scaling
                        // directly keeps edges pointing down the page.
                        y / 3.0 * cell_height,
                    ));
                }
            }
        }

        // Row of disconnected items below everything that got a position.
        let connected_max_y = centers
            .iter()
            .flatten()
            .map(|center| center.y())
            .fold(f32::MIN, f32::max);
        let isolated_y = if connected_max_y == f32::MIN {
            0.0
        } else {
            connected_max_y + cell_height
        };
        let mut isolated_x = 0.0;
        for center in centers.iter_mut() {
            if center.is_none() {
                *center = Some(Point::new(isolated_x, isolated_y));
                isolated_x += cell_width;
            }
        }

        let mut bounds: Vec<Bounds> = centers
            .iter()
            .zip(items)
            .map(|(center, item)| {
                center
                    .expect("Every item was assigned a center")
                    .to_bounds(item.size())
            })
            .collect();

        // Normalize so the arrangement starts at the origin.
        let min_x = bounds.iter().map(|b| b.min_x()).fold(f32::MAX, f32::min);
        let min_y = bounds.iter().map(|b| b.min_y()).fold(f32::MAX, f32::min);
        let offset = Point::new(-min_x, -min_y);
        for item_bounds in bounds.iter_mut() {
            *item_bounds = item_bounds.translate(offset);
        }

        Ok(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: usize) -> Vec<ScopeItem> {
        (0..count)
            .map(|_| ScopeItem::new(Size::new(60.0, 80.0)))
            .collect()
    }

    fn edge(source: usize, target: usize) -> ScopeEdge {
        ScopeEdge::new(source, target, Size::default())
    }

    #[test]
    fn test_chain_flows_downward() {
        let engine = Engine::new(50.0, 60.0);
        let bounds = engine
            .arrange(&items(3), &[edge(0, 1), edge(1, 2)])
            .unwrap();

        assert!(bounds[0].center().y() < bounds[1].center().y());
        assert!(bounds[1].center().y() < bounds[2].center().y());
    }

    #[test]
    fn test_no_edges_arranged_in_row() {
        let engine = Engine::new(50.0, 60.0);
        let bounds = engine.arrange(&items(3), &[]).unwrap();

        assert_eq!(bounds[0].min_y(), bounds[1].min_y());
        assert!(bounds[0].max_x() < bounds[1].min_x());
        assert!(bounds[1].max_x() < bounds[2].min_x());
    }

    #[test]
    fn test_isolated_item_placed_below_connected() {
        let engine = Engine::new(50.0, 60.0);
        let bounds = engine.arrange(&items(3), &[edge(0, 1)]).unwrap();

        let connected_bottom = bounds[0].max_y().max(bounds[1].max_y());
        assert!(bounds[2].min_y() >= connected_bottom - 1.0);
    }

    #[test]
    fn test_normalized_to_origin() {
        let engine = Engine::new(50.0, 60.0);
        let bounds = engine
            .arrange(&items(4), &[edge(0, 1), edge(0, 2), edge(2, 3)])
            .unwrap();

        let min_x = bounds.iter().map(|b| b.min_x()).fold(f32::MAX, f32::min);
        let min_y = bounds.iter().map(|b| b.min_y()).fold(f32::MAX, f32::min);
        assert!(min_x.abs() < 0.001);
        assert!(min_y.abs() < 0.001);
    }

    #[test]
    fn test_deterministic() {
        let engine = Engine::new(50.0, 60.0);
        let edges = [edge(0, 1), edge(1, 2), edge(0, 3)];

        let first = engine.arrange(&items(4), &edges).unwrap();
        let second = engine.arrange(&items(4), &edges).unwrap();
        assert_eq!(first, second);
    }
}
