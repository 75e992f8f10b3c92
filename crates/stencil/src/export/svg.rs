//! SVG rendering of a positioned scene.

mod markers;

use indexmap::IndexSet;
use log::debug;
use svg::{
    Document,
    node::element::{Group, Path, Rectangle, Text},
};

use stencil_core::{
    color::Color,
    draw::TextBlock,
    geometry::Point,
};

use crate::{
    config::RenderAttributes,
    error::Error,
    layout::{FigurePlacement, GroupBox, Scene, Wire},
};

/// Stroke and title color of group borders.
const GROUP_STROKE: &str = "#9aa5b1";
const GROUP_TITLE_COLOR: &str = "#5a6572";
const LABEL_COLOR: &str = "#1f2933";

/// Renders a scene to an SVG document string.
pub fn render(scene: &Scene, attributes: &RenderAttributes) -> Result<String, Error> {
    let size = scene.size();
    let mut document = Document::new()
        .set("width", size.width())
        .set("height", size.height())
        .set("viewBox", format!("0 0 {} {}", size.width(), size.height()));

    if let Some(background) = attributes.background_color()? {
        document = document.add(
            Rectangle::new()
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", &background),
        );
    }

    // One marker pair per distinct wire color, in first-use order.
    let colors: IndexSet<&Color> = scene.wires().map(|wire| wire.stroke().color()).collect();
    document = document.add(markers::create_marker_definitions(colors.into_iter()));

    for group_box in scene.boxes() {
        document = document.add(render_box(group_box, attributes));
    }
    for wire in scene.wires() {
        document = document.add(render_wire(wire));
    }
    for figure in scene.figures() {
        document = document.add(render_figure(figure));
    }

    debug!(
        width = size.width(),
        height = size.height();
        "SVG document rendered"
    );
    Ok(document.to_string())
}

fn render_box(group_box: &GroupBox, attributes: &RenderAttributes) -> Group {
    let bounds = group_box.bounds();
    let border = Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("rx", 4.0)
        .set("fill", "none")
        .set("stroke", GROUP_STROKE)
        .set("stroke-dasharray", "4,4");

    let title = TextBlock::new(group_box.name(), attributes.font_size());
    let title_block = render_text_block(
        &title,
        bounds.min_x() + 10.0 + title.size().width() / 2.0,
        bounds.min_y() + 6.0,
        GROUP_TITLE_COLOR,
    );

    Group::new().add(border).add(title_block)
}

fn render_wire(wire: &Wire) -> Group {
    let stroke = wire.stroke();
    let (start, end) = (wire.start(), wire.end());

    let mut path = Path::new()
        .set(
            "d",
            format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
        )
        .set("fill", "none")
        .set("stroke", stroke.color())
        .set("stroke-width", stroke.width());
    if let Some(dash) = stroke.style().dash_array() {
        path = path.set("stroke-dasharray", dash);
    }

    let (marker_start, marker_end) = markers::markers_for_direction(wire.direction(), stroke.color());
    if let Some(marker) = marker_start {
        path = path.set("marker-start", marker);
    }
    if let Some(marker) = marker_end {
        path = path.set("marker-end", marker);
    }

    let mut group = Group::new().add(path);
    if let (Some(label), Some(origin)) = (wire.label(), wire.label_origin()) {
        let center_x = origin.x() + label.size().width() / 2.0;
        group = group.add(render_text_block(label, center_x, origin.y(), LABEL_COLOR));
    }

    group
}

fn render_figure(figure: &FigurePlacement) -> Group {
    let glyph = figure
        .icon()
        .glyph()
        .render(figure.icon_bounds(), figure.icon().accent());

    let origin = figure.label_origin();
    let center_x = origin.x() + figure.label().size().width() / 2.0;
    let label = render_text_block(figure.label(), center_x, origin.y(), LABEL_COLOR);

    Group::new().add(glyph).add(label)
}

/// Renders a text block line by line, horizontally centered on `center_x`.
///
/// Empty lines produce no element but still advance the line cursor, which
/// is how labels declared with leading blank lines keep their offset.
fn render_text_block(block: &TextBlock, center_x: f32, top_y: f32, color: &str) -> Group {
    let mut group = Group::new();
    let baseline_offset = block.font_size_px() * 0.8;

    for (idx, line) in block.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let position = Point::new(
            center_x,
            top_y + idx as f32 * block.line_height() + baseline_offset,
        );
        group = group.add(
            Text::new(line)
                .set("x", position.x())
                .set("y", position.y())
                .set("text-anchor", "middle")
                .set("font-family", "Arial")
                .set("font-size", block.font_size_px())
                .set("fill", color),
        );
    }

    group
}
