//! Arrowhead marker definitions for connection wires.

use svg::node::element::{Definitions, Marker, Path};

use stencil_core::{color::Color, model::Direction};

/// Creates marker definitions for SVG arrowheads based on the colors in use.
pub fn create_marker_definitions<'a, I>(colors: I) -> Definitions
where
    I: Iterator<Item = &'a Color>,
{
    let mut defs = Definitions::new();

    for color in colors {
        let arrow_right = Marker::new()
            .set("id", format!("arrow-right-{}", color.to_id_safe_string()))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color),
            );

        let arrow_left = Marker::new()
            .set("id", format!("arrow-left-{}", color.to_id_safe_string()))
            .set("viewBox", "0 0 10 10")
            .set("refX", 1)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 10 0 L 0 5 L 10 10 z")
                    .set("fill", color),
            );

        defs = defs.add(arrow_right).add(arrow_left);
    }

    defs
}

/// Marker references for a wire direction and color, as
/// `(marker-start, marker-end)`.
pub fn markers_for_direction(
    direction: Direction,
    color: &Color,
) -> (Option<String>, Option<String>) {
    match direction {
        Direction::Forward => (
            None,
            Some(format!("url(#arrow-right-{})", color.to_id_safe_string())),
        ),
        Direction::Backward => (
            Some(format!("url(#arrow-left-{})", color.to_id_safe_string())),
            None,
        ),
        Direction::Both => (
            Some(format!("url(#arrow-left-{})", color.to_id_safe_string())),
            Some(format!("url(#arrow-right-{})", color.to_id_safe_string())),
        ),
        Direction::None => (None, None),
    }
}
