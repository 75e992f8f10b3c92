//! Icon glyph rendering.
//!
//! Each catalog entry selects one glyph. Glyphs are drawn into a fixed
//! square icon box; the node label is rendered below the box by the
//! exporter, matching the icon-plus-caption look of architecture diagrams.

use svg::node::element::{Circle, Ellipse, Group, Path, Polygon, Rectangle};

use crate::geometry::Bounds;

/// Side length of the square icon box every glyph is drawn into.
pub const ICON_SIZE: f32 = 56.0;

/// Shape of a catalog icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Rounded rectangle card.
    Card,
    /// Database cylinder.
    Cylinder,
    /// Head-and-shoulders silhouette.
    Person,
    /// Flat-topped hexagon.
    Hexagon,
    /// Security shield.
    Shield,
    /// Cogwheel, drawn as a ring.
    Gear,
    /// Isometric cube.
    Cube,
    /// Pill shape.
    Capsule,
    /// Sheet with a folded corner.
    Document,
    /// Pointed label tag with an eyelet.
    Tag,
}

impl Glyph {
    /// Renders the glyph into `bounds` with the given accent fill color.
    pub fn render(self, bounds: Bounds, accent: &str) -> Group {
        let group = Group::new().set("class", "stencil-glyph");
        match self {
            Glyph::Card => group.add(card(bounds, accent)),
            Glyph::Cylinder => cylinder(group, bounds, accent),
            Glyph::Person => person(group, bounds, accent),
            Glyph::Hexagon => group.add(hexagon(bounds, accent)),
            Glyph::Shield => group.add(shield(bounds, accent)),
            Glyph::Gear => gear(group, bounds, accent),
            Glyph::Cube => cube(group, bounds, accent),
            Glyph::Capsule => group.add(capsule(bounds, accent)),
            Glyph::Document => document(group, bounds, accent),
            Glyph::Tag => tag(group, bounds, accent),
        }
    }
}

fn card(bounds: Bounds, accent: &str) -> Rectangle {
    Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("rx", 6.0)
        .set("fill", accent)
}

fn cylinder(group: Group, bounds: Bounds, accent: &str) -> Group {
    let cx = bounds.center().x();
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() * 0.12;

    let body = Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y() + ry)
        .set("width", bounds.width())
        .set("height", bounds.height() - 2.0 * ry)
        .set("fill", accent);
    let bottom = Ellipse::new()
        .set("cx", cx)
        .set("cy", bounds.max_y() - ry)
        .set("rx", rx)
        .set("ry", ry)
        .set("fill", accent);
    let top = Ellipse::new()
        .set("cx", cx)
        .set("cy", bounds.min_y() + ry)
        .set("rx", rx)
        .set("ry", ry)
        .set("fill", accent)
        .set("stroke", "white")
        .set("stroke-width", 1.5);

    group.add(body).add(bottom).add(top)
}

fn person(group: Group, bounds: Bounds, accent: &str) -> Group {
    let cx = bounds.center().x();
    let head_r = bounds.width() * 0.2;
    let head_cy = bounds.min_y() + head_r + bounds.height() * 0.08;

    let head = Circle::new()
        .set("cx", cx)
        .set("cy", head_cy)
        .set("r", head_r)
        .set("fill", accent);

    // Shoulders: a half-disc closed along the icon bottom.
    let shoulder_r = bounds.width() * 0.38;
    let base_y = bounds.max_y();
    let body = Path::new()
        .set(
            "d",
            format!(
                "M {} {} A {} {} 0 0 1 {} {} Z",
                cx - shoulder_r,
                base_y,
                shoulder_r,
                shoulder_r,
                cx + shoulder_r,
                base_y
            ),
        )
        .set("fill", accent);

    group.add(head).add(body)
}

fn hexagon(bounds: Bounds, accent: &str) -> Polygon {
    let quarter = bounds.width() / 4.0;
    let mid_y = bounds.center().y();
    let points = [
        (bounds.min_x() + quarter, bounds.min_y()),
        (bounds.max_x() - quarter, bounds.min_y()),
        (bounds.max_x(), mid_y),
        (bounds.max_x() - quarter, bounds.max_y()),
        (bounds.min_x() + quarter, bounds.max_y()),
        (bounds.min_x(), mid_y),
    ];

    Polygon::new()
        .set("points", points_attr(&points))
        .set("fill", accent)
}

fn shield(bounds: Bounds, accent: &str) -> Path {
    let cx = bounds.center().x();
    let waist_y = bounds.min_y() + bounds.height() * 0.6;

    Path::new()
        .set(
            "d",
            format!(
                "M {} {} L {} {} L {} {} L {} {} L {} {} L {} {} Z",
                cx,
                bounds.min_y(),
                bounds.max_x(),
                bounds.min_y() + bounds.height() * 0.15,
                bounds.max_x(),
                waist_y,
                cx,
                bounds.max_y(),
                bounds.min_x(),
                waist_y,
                bounds.min_x(),
                bounds.min_y() + bounds.height() * 0.15,
            ),
        )
        .set("fill", accent)
}

fn gear(group: Group, bounds: Bounds, accent: &str) -> Group {
    let center = bounds.center();
    let outer_r = bounds.width() * 0.42;
    let ring_width = bounds.width() * 0.18;

    let ring = Circle::new()
        .set("cx", center.x())
        .set("cy", center.y())
        .set("r", outer_r)
        .set("fill", "none")
        .set("stroke", accent)
        .set("stroke-width", ring_width)
        // Wide dashes read as gear teeth on the ring.
        .set("stroke-dasharray", format!("{},{}", outer_r * 0.7, outer_r * 0.35));
    let hub = Circle::new()
        .set("cx", center.x())
        .set("cy", center.y())
        .set("r", outer_r * 0.45)
        .set("fill", accent);

    group.add(ring).add(hub)
}

fn cube(group: Group, bounds: Bounds, accent: &str) -> Group {
    let cx = bounds.center().x();
    let depth = bounds.height() * 0.25;
    let top_y = bounds.min_y();
    let mid_y = bounds.min_y() + depth;
    let bottom_y = bounds.max_y();

    let top = Polygon::new()
        .set(
            "points",
            points_attr(&[
                (cx, top_y),
                (bounds.max_x(), mid_y),
                (cx, mid_y + depth),
                (bounds.min_x(), mid_y),
            ]),
        )
        .set("fill", accent)
        .set("fill-opacity", 0.6);
    let left = Polygon::new()
        .set(
            "points",
            points_attr(&[
                (bounds.min_x(), mid_y),
                (cx, mid_y + depth),
                (cx, bottom_y),
                (bounds.min_x(), bottom_y - depth),
            ]),
        )
        .set("fill", accent);
    let right = Polygon::new()
        .set(
            "points",
            points_attr(&[
                (cx, mid_y + depth),
                (bounds.max_x(), mid_y),
                (bounds.max_x(), bottom_y - depth),
                (cx, bottom_y),
            ]),
        )
        .set("fill", accent)
        .set("fill-opacity", 0.8);

    group.add(top).add(left).add(right)
}

fn capsule(bounds: Bounds, accent: &str) -> Rectangle {
    let height = bounds.height() * 0.6;
    Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.center().y() - height / 2.0)
        .set("width", bounds.width())
        .set("height", height)
        .set("rx", height / 2.0)
        .set("fill", accent)
}

fn document(group: Group, bounds: Bounds, accent: &str) -> Group {
    let fold = bounds.width() * 0.25;
    let inset = bounds.width() * 0.12;
    let min_x = bounds.min_x() + inset;
    let max_x = bounds.max_x() - inset;

    let sheet = Polygon::new()
        .set(
            "points",
            points_attr(&[
                (min_x, bounds.min_y()),
                (max_x - fold, bounds.min_y()),
                (max_x, bounds.min_y() + fold),
                (max_x, bounds.max_y()),
                (min_x, bounds.max_y()),
            ]),
        )
        .set("fill", accent);
    let corner = Polygon::new()
        .set(
            "points",
            points_attr(&[
                (max_x - fold, bounds.min_y()),
                (max_x - fold, bounds.min_y() + fold),
                (max_x, bounds.min_y() + fold),
            ]),
        )
        .set("fill", "white")
        .set("fill-opacity", 0.5);

    group.add(sheet).add(corner)
}

fn tag(group: Group, bounds: Bounds, accent: &str) -> Group {
    let point_x = bounds.min_x() + bounds.width() * 0.3;
    let mid_y = bounds.center().y();
    let top_y = bounds.min_y() + bounds.height() * 0.2;
    let bottom_y = bounds.max_y() - bounds.height() * 0.2;

    let body = Polygon::new()
        .set(
            "points",
            points_attr(&[
                (point_x, top_y),
                (bounds.max_x(), top_y),
                (bounds.max_x(), bottom_y),
                (point_x, bottom_y),
                (bounds.min_x(), mid_y),
            ]),
        )
        .set("fill", accent);
    let eyelet = Circle::new()
        .set("cx", point_x)
        .set("cy", mid_y)
        .set("r", bounds.width() * 0.06)
        .set("fill", "white");

    group.add(body).add(eyelet)
}

fn points_attr(points: &[(f32, f32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}
