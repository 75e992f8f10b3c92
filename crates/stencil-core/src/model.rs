//! The immutable, finalized diagram model.
//!
//! A [`DiagramModel`] is what a builder hands to layout once declaration is
//! complete: nodes, edges and groups in declaration order, with containment
//! expressed through parent links. Nothing here is validated; builders
//! reject invalid declarations before they ever reach the model.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{catalog::IconDefinition, color::Color, draw::StrokeStyle, identifier::Id};

/// Direction of an edge's arrowheads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Arrowhead at the target.
    #[default]
    Forward,
    /// Arrowhead at the source.
    Backward,
    /// Arrowheads at both ends.
    Both,
    /// Plain line, no arrowheads.
    None,
}

/// Which layout engine positions the diagram.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Deterministic BFS layering, the default.
    #[default]
    Layered,
    /// Layered drawing via the Sugiyama algorithm.
    Sugiyama,
}

/// One end of an edge: a node or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Node(Id),
    Group(Id),
}

impl Endpoint {
    pub fn id(self) -> Id {
        match self {
            Endpoint::Node(id) | Endpoint::Group(id) => id,
        }
    }
}

/// A labeled, icon-carrying vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: String,
    icon: &'static IconDefinition,
    /// Immediate containing group, or `None` for the diagram root.
    parent: Option<Id>,
}

impl Node {
    pub fn new(id: Id, label: String, icon: &'static IconDefinition, parent: Option<Id>) -> Self {
        Self {
            id,
            label,
            icon,
            parent,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &'static IconDefinition {
        self.icon
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }
}

/// A styled connection between two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Endpoint,
    target: Endpoint,
    direction: Direction,
    label: Option<String>,
    style: StrokeStyle,
    color: Color,
}

impl Edge {
    pub fn new(
        source: Endpoint,
        target: Endpoint,
        direction: Direction,
        label: Option<String>,
        style: StrokeStyle,
        color: Color,
    ) -> Self {
        Self {
            source,
            target,
            direction,
            label,
            style,
            color,
        }
    }

    pub fn source(&self) -> Endpoint {
        self.source
    }

    pub fn target(&self) -> Endpoint {
        self.target
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn color(&self) -> &Color {
        &self.color
    }
}

/// A named, nestable cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: Id,
    name: String,
    parent: Option<Id>,
}

impl Group {
    pub fn new(id: Id, name: String, parent: Option<Id>) -> Self {
        Self { id, name, parent }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }
}

/// The complete finalized diagram.
///
/// Element order is declaration order throughout; layout and export never
/// iterate anything unordered, which is what makes rendering deterministic.
#[derive(Debug, Clone)]
pub struct DiagramModel {
    name: String,
    nodes: Vec<Node>,
    groups: Vec<Group>,
    edges: Vec<Edge>,
    node_index: HashMap<Id, usize>,
    group_index: HashMap<Id, usize>,
}

impl DiagramModel {
    pub fn new(name: String, nodes: Vec<Node>, groups: Vec<Group>, edges: Vec<Edge>) -> Self {
        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id(), idx))
            .collect();
        let group_index = groups
            .iter()
            .enumerate()
            .map(|(idx, group)| (group.id(), idx))
            .collect();

        Self {
            name,
            nodes,
            groups,
            edges,
            node_index,
            group_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn group(&self, id: Id) -> Option<&Group> {
        self.group_index.get(&id).map(|&idx| &self.groups[idx])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes whose immediate parent is `parent` (`None` = diagram root).
    pub fn nodes_in(&self, parent: Option<Id>) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.parent() == parent)
    }

    /// Groups whose immediate parent is `parent` (`None` = diagram root).
    pub fn groups_in(&self, parent: Option<Id>) -> impl Iterator<Item = &Group> {
        self.groups
            .iter()
            .filter(move |group| group.parent() == parent)
    }

    /// Immediate parent scope of an endpoint.
    pub fn parent_of(&self, endpoint: Endpoint) -> Option<Id> {
        match endpoint {
            Endpoint::Node(id) => self.node(id).and_then(Node::parent),
            Endpoint::Group(id) => self.group(id).and_then(Group::parent),
        }
    }
}
