//! The positioned scene produced by layout.
//!
//! A [`Scene`] is everything the exporter needs to draw, in absolute pixel
//! coordinates: icon placements with their labels, group boxes, and the
//! trimmed connection wires between figures.

use stencil_core::{
    catalog::IconDefinition,
    draw::{StrokeDefinition, TextBlock},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    model::Direction,
};

/// A placed node: icon box plus the label block beneath it.
#[derive(Debug)]
pub struct FigurePlacement {
    id: Id,
    icon: &'static IconDefinition,
    icon_bounds: Bounds,
    label: TextBlock,
    label_origin: Point,
}

impl FigurePlacement {
    pub fn new(
        id: Id,
        icon: &'static IconDefinition,
        icon_bounds: Bounds,
        label: TextBlock,
        label_origin: Point,
    ) -> Self {
        Self {
            id,
            icon,
            icon_bounds,
            label,
            label_origin,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn icon(&self) -> &'static IconDefinition {
        self.icon
    }

    pub fn icon_bounds(&self) -> Bounds {
        self.icon_bounds
    }

    pub fn label(&self) -> &TextBlock {
        &self.label
    }

    /// Top-left corner of the label block.
    pub fn label_origin(&self) -> Point {
        self.label_origin
    }
}

/// A placed group: its border box and title.
#[derive(Debug)]
pub struct GroupBox {
    id: Id,
    name: String,
    bounds: Bounds,
}

impl GroupBox {
    pub fn new(id: Id, name: String, bounds: Bounds) -> Self {
        Self { id, name, bounds }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// A routed connection between two placed figures.
#[derive(Debug)]
pub struct Wire {
    start: Point,
    end: Point,
    direction: Direction,
    stroke: StrokeDefinition,
    label: Option<TextBlock>,
}

impl Wire {
    pub fn new(
        start: Point,
        end: Point,
        direction: Direction,
        stroke: StrokeDefinition,
        label: Option<TextBlock>,
    ) -> Self {
        Self {
            start,
            end,
            direction,
            stroke,
            label,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn label(&self) -> Option<&TextBlock> {
        self.label.as_ref()
    }

    /// Top-left corner of the label block, centered on the wire midpoint.
    ///
    /// Labels declared with leading blank lines keep them: the block center
    /// sits on the wire, so blank leading lines push the visible text below
    /// it. That offset is exactly what those declarations ask for.
    pub fn label_origin(&self) -> Option<Point> {
        let label = self.label.as_ref()?;
        let size = label.size();
        let midpoint = self.start.midpoint(self.end);

        Some(Point::new(
            midpoint.x() - size.width() / 2.0,
            midpoint.y() - size.height() / 2.0,
        ))
    }
}

/// A fully positioned diagram, ready for export.
///
/// Group boxes are ordered outermost-first so painting them in order layers
/// nested clusters correctly.
#[derive(Debug)]
pub struct Scene {
    size: Size,
    figures: Vec<FigurePlacement>,
    boxes: Vec<GroupBox>,
    wires: Vec<Wire>,
}

impl Scene {
    pub fn new(
        size: Size,
        figures: Vec<FigurePlacement>,
        boxes: Vec<GroupBox>,
        wires: Vec<Wire>,
    ) -> Self {
        Self {
            size,
            figures,
            boxes,
            wires,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn figures(&self) -> impl Iterator<Item = &FigurePlacement> {
        self.figures.iter()
    }

    pub fn boxes(&self) -> impl Iterator<Item = &GroupBox> {
        self.boxes.iter()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::color::Color;
    use stencil_core::draw::StrokeStyle;

    #[test]
    fn test_wire_label_centered_on_midpoint() {
        let wire = Wire::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Direction::Forward,
            StrokeDefinition::default(),
            Some(TextBlock::new("hop", 14)),
        );

        let origin = wire.label_origin().unwrap();
        let size = wire.label().unwrap().size();
        assert_eq!(origin.x() + size.width() / 2.0, 50.0);
    }

    #[test]
    fn test_leading_blank_lines_shift_label_down() {
        let plain = Wire::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Direction::Forward,
            StrokeDefinition::default(),
            Some(TextBlock::new("hop", 14)),
        );
        let shifted = Wire::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Direction::Forward,
            StrokeDefinition::new(Color::default(), 1.5, StrokeStyle::Dashed),
            Some(TextBlock::new("\n\nhop", 14)),
        );

        // Same midpoint, but the taller block starts higher and its text
        // lines land lower.
        assert!(shifted.label_origin().unwrap().y() < plain.label_origin().unwrap().y());
    }

    #[test]
    fn test_unlabeled_wire_has_no_label_origin() {
        let wire = Wire::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Direction::None,
            StrokeDefinition::default(),
            None,
        );
        assert!(wire.label_origin().is_none());
    }
}
