//! Layout pipeline: measure figures, arrange each containment scope, then
//! compose absolute coordinates and route connection wires.
//!
//! Scopes are arranged innermost-first so a group's size is known before
//! its parent scope places it, then composed top-down into absolute
//! coordinates. Wires are routed last, center to center between the two
//! endpoint figures and trimmed at their borders, so connections across
//! cluster boundaries work the same as local ones.

mod engines;
mod scene;

use std::collections::HashMap;

use log::{debug, info};

use stencil_core::{
    draw::{ICON_SIZE, StrokeDefinition, TextBlock},
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
    model::{DiagramModel, Endpoint},
};

use crate::{
    config::RenderAttributes,
    error::Error,
    structure::{ContainmentScope, DiagramHierarchy, Member},
};

pub use engines::EngineBuilder;
pub use scene::{FigurePlacement, GroupBox, Scene, Wire};

use engines::{ScopeEdge, ScopeItem};

/// Stroke width of connection wires before any bold doubling.
const WIRE_WIDTH: f32 = 1.5;

/// Gap between a node's icon box and its label.
const LABEL_GAP: f32 = 6.0;

/// Padding inside a group border.
const GROUP_PADDING: f32 = 20.0;

/// Gap between a group's title and its content.
const GROUP_TITLE_GAP: f32 = 8.0;

/// Computes a positioned [`Scene`] for a finalized diagram.
pub fn layout(model: &DiagramModel, attributes: &RenderAttributes) -> Result<Scene, Error> {
    info!(
        node_count = model.node_count(),
        edge_count = model.edge_count(),
        engine:? = attributes.engine();
        "Calculating layout"
    );

    let hierarchy = DiagramHierarchy::from_model(model)?;
    let mut engine_builder = EngineBuilder::new();

    let mut plans: HashMap<Option<Id>, ScopePlan> = HashMap::new();
    let mut group_sizes: HashMap<Id, Size> = HashMap::new();

    for scope in hierarchy.scopes() {
        let plan = arrange_scope(
            model,
            attributes,
            &mut engine_builder,
            scope,
            &group_sizes,
        )?;

        if let Some(container) = scope.container() {
            let group = model
                .group(container)
                .expect("Scope container should exist in the model");
            let title = TextBlock::new(group.name(), attributes.font_size());
            let content = plan.content_size.max(Size::new(title.size().width(), 0.0));
            group_sizes.insert(container, content.add_padding(group_insets(&title)));
        }

        plans.insert(scope.container(), plan);
    }

    let padding = attributes.padding();
    let root_content = plans
        .get(&None)
        .map(|plan| plan.content_size)
        .unwrap_or_default();
    let canvas = root_content.add_padding(Insets::uniform(padding));
    debug!(
        width = canvas.width(),
        height = canvas.height();
        "Canvas size calculated"
    );

    // Top-down composition into absolute coordinates. Visiting parents
    // before children also gives the outermost-first box paint order.
    let mut node_bounds: HashMap<Id, Bounds> = HashMap::new();
    let mut group_bounds: HashMap<Id, Bounds> = HashMap::new();
    let mut boxes = Vec::new();

    let mut pending = vec![(None, Point::new(padding, padding))];
    while let Some((scope_id, origin)) = pending.pop() {
        let Some(plan) = plans.get(&scope_id) else {
            continue;
        };

        for &(member, relative) in &plan.placements {
            let absolute = relative.translate(origin);
            match member {
                Member::Node(id) => {
                    node_bounds.insert(id, absolute);
                }
                Member::Group(id) => {
                    group_bounds.insert(id, absolute);

                    let group = model.group(id).expect("Placed group should exist");
                    let title = TextBlock::new(group.name(), attributes.font_size());
                    boxes.push(GroupBox::new(id, group.name().to_string(), absolute));

                    let content_size = plans
                        .get(&Some(id))
                        .map(|plan| plan.content_size)
                        .unwrap_or_default();
                    let content_origin = Point::new(
                        absolute.min_x() + (absolute.width() - content_size.width()) / 2.0,
                        absolute.min_y() + group_insets(&title).top(),
                    );
                    pending.push((Some(id), content_origin));
                }
            }
        }
    }

    // Figures in declaration order.
    let mut figures = Vec::new();
    for node in model.nodes() {
        let footprint = *node_bounds
            .get(&node.id())
            .ok_or_else(|| Error::Layout(format!("Node {} was never placed", node.id())))?;

        let icon_min_x = footprint.center().x() - ICON_SIZE / 2.0;
        let icon_bounds = Bounds::new(
            icon_min_x,
            footprint.min_y(),
            icon_min_x + ICON_SIZE,
            footprint.min_y() + ICON_SIZE,
        );

        let label = TextBlock::new(node.label(), attributes.font_size());
        let label_origin = Point::new(
            footprint.center().x() - label.size().width() / 2.0,
            footprint.min_y() + ICON_SIZE + LABEL_GAP,
        );

        figures.push(FigurePlacement::new(
            node.id(),
            node.icon(),
            icon_bounds,
            label,
            label_origin,
        ));
    }

    // Wires in declaration order.
    let mut wires = Vec::new();
    for edge in model.edges() {
        let source = endpoint_bounds(edge.source(), &node_bounds, &group_bounds)?;
        let target = endpoint_bounds(edge.target(), &node_bounds, &group_bounds)?;

        let start = source.boundary_toward(target.center());
        let end = target.boundary_toward(source.center());
        let stroke = StrokeDefinition::new(edge.color().clone(), WIRE_WIDTH, edge.style());
        let label = edge
            .label()
            .map(|text| TextBlock::new(text, attributes.font_size()));

        wires.push(Wire::new(start, end, edge.direction(), stroke, label));
    }

    Ok(Scene::new(canvas, figures, boxes, wires))
}

struct ScopePlan {
    placements: Vec<(Member, Bounds)>,
    content_size: Size,
}

fn arrange_scope(
    model: &DiagramModel,
    attributes: &RenderAttributes,
    engine_builder: &mut EngineBuilder,
    scope: &ContainmentScope,
    group_sizes: &HashMap<Id, Size>,
) -> Result<ScopePlan, Error> {
    let members: Vec<Member> = scope.members().collect();

    let items: Vec<ScopeItem> = members
        .iter()
        .map(|member| {
            let size = match member {
                Member::Node(id) => {
                    let node = model.node(*id).expect("Scope node should exist");
                    figure_footprint(node.label(), attributes.font_size())
                }
                Member::Group(id) => *group_sizes
                    .get(id)
                    .expect("Nested group should be sized before its parent scope"),
            };
            ScopeItem::new(size)
        })
        .collect();

    let edges: Vec<ScopeEdge> = scope
        .member_edges()
        .map(|(source, target, edge_idx)| {
            let label_size = model
                .edges()
                .nth(edge_idx)
                .and_then(|edge| edge.label())
                .map(|text| TextBlock::new(text, attributes.font_size()).size())
                .unwrap_or_default();
            ScopeEdge::new(source, target, label_size)
        })
        .collect();

    let bounds = engine_builder
        .engine(attributes.engine())
        .arrange(&items, &edges)?;

    let content_size = bounds
        .iter()
        .copied()
        .reduce(|merged, next| merged.merge(&next))
        .map(Bounds::to_size)
        .unwrap_or_default();

    Ok(ScopePlan {
        placements: members.into_iter().zip(bounds).collect(),
        content_size,
    })
}

/// Overall footprint of a node: icon box with the label underneath.
fn figure_footprint(label: &str, font_size: u32) -> Size {
    let label = TextBlock::new(label, font_size);
    if label.is_empty() {
        return Size::new(ICON_SIZE, ICON_SIZE);
    }

    let label_size = label.size();
    Size::new(
        ICON_SIZE.max(label_size.width()),
        ICON_SIZE + LABEL_GAP + label_size.height(),
    )
}

/// Padding inside a group border, widened at the top for its title.
fn group_insets(title: &TextBlock) -> Insets {
    Insets::uniform(GROUP_PADDING)
        .with_top(GROUP_PADDING + title.size().height() + GROUP_TITLE_GAP)
}

fn endpoint_bounds(
    endpoint: Endpoint,
    node_bounds: &HashMap<Id, Bounds>,
    group_bounds: &HashMap<Id, Bounds>,
) -> Result<Bounds, Error> {
    let bounds = match endpoint {
        Endpoint::Node(id) => node_bounds.get(&id),
        Endpoint::Group(id) => group_bounds.get(&id),
    };

    bounds.copied().ok_or_else(|| {
        Error::Layout(format!(
            "Connection endpoint {} was never placed",
            endpoint.id()
        ))
    })
}
