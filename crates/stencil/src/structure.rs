//! Graph structure built from a finalized diagram model.
//!
//! Layout works one containment scope at a time: the diagram root and every
//! group each form a scope whose direct members (nodes and nested groups)
//! are arranged together. Edges that cross scope boundaries are projected
//! onto the deepest scope that contains both endpoints, so a connection
//! into a nested cluster still influences how that cluster's ancestors are
//! layered.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::graph::{DiGraph, NodeIndex};

use stencil_core::{
    identifier::Id,
    model::{DiagramModel, Endpoint},
};

use crate::error::Error;

/// A direct member of a containment scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Node(Id),
    Group(Id),
}

impl Member {
    pub fn id(self) -> Id {
        match self {
            Member::Node(id) | Member::Group(id) => id,
        }
    }
}

/// A single containment scope: the diagram root or one group.
///
/// Members appear in declaration order (nodes first, then nested groups),
/// which keeps every downstream arrangement deterministic.
#[derive(Debug)]
pub struct ContainmentScope {
    container: Option<Id>,
    graph: DiGraph<Member, usize>,
    member_index: HashMap<Member, NodeIndex>,
}

impl ContainmentScope {
    fn new(container: Option<Id>) -> Self {
        Self {
            container,
            graph: DiGraph::new(),
            member_index: HashMap::new(),
        }
    }

    /// The group this scope belongs to, or `None` for the diagram root.
    pub fn container(&self) -> Option<Id> {
        self.container
    }

    pub fn members(&self) -> impl Iterator<Item = Member> {
        self.graph.node_indices().map(|idx| self.graph[idx])
    }

    pub fn member_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Projected edges among this scope's members, as member index pairs
    /// paired with the originating model edge index.
    pub fn member_edges(&self) -> impl Iterator<Item = (usize, usize, usize)> {
        self.graph.edge_indices().map(|edge_idx| {
            let (source, target) = self
                .graph
                .edge_endpoints(edge_idx)
                .expect("Edge index should exist");
            (source.index(), target.index(), self.graph[edge_idx])
        })
    }

    fn add_member(&mut self, member: Member) {
        let idx = self.graph.add_node(member);
        self.member_index.insert(member, idx);
    }

    fn add_edge(&mut self, source: Member, target: Member, model_edge: usize) {
        let (Some(&source_idx), Some(&target_idx)) = (
            self.member_index.get(&source),
            self.member_index.get(&target),
        ) else {
            return;
        };
        self.graph.add_edge(source_idx, target_idx, model_edge);
    }
}

/// The full scope hierarchy of a diagram, ordered innermost-first.
///
/// Iterating [`DiagramHierarchy::scopes`] yields every nested scope before
/// its parent, so each group's size is known by the time the enclosing
/// scope is arranged.
#[derive(Debug)]
pub struct DiagramHierarchy {
    scopes: Vec<ContainmentScope>,
}

impl DiagramHierarchy {
    /// Builds the scope hierarchy and projects every edge onto the deepest
    /// scope containing both of its endpoints.
    pub fn from_model(model: &DiagramModel) -> Result<Self, Error> {
        let mut hierarchy = Self { scopes: Vec::new() };
        hierarchy.collect_scopes(model, None);
        debug!(scope_count = hierarchy.scopes.len(); "Structure built");

        let mut scope_positions: HashMap<Option<Id>, usize> = HashMap::new();
        for (idx, scope) in hierarchy.scopes.iter().enumerate() {
            scope_positions.insert(scope.container(), idx);
        }

        for (edge_idx, edge) in model.edges().enumerate() {
            let source_path = member_path(model, edge.source());
            let target_path = member_path(model, edge.target());

            // Deepest scope present in both paths; index 0 is always the
            // diagram root, so a common prefix exists.
            let mut common = 0;
            while common + 1 < source_path.len()
                && common + 1 < target_path.len()
                && source_path[common + 1].0 == target_path[common + 1].0
            {
                common += 1;
            }

            let scope_id = source_path[common].0;
            let source_member = source_path[common].1;
            let target_member = target_path[common].1;
            trace!(
                edge_idx,
                scope:? = scope_id.map(|id| id.to_string());
                "Projected edge onto scope"
            );

            // Both endpoints inside the same member: no layering constraint.
            if source_member == target_member {
                continue;
            }

            let scope_pos = scope_positions
                .get(&scope_id)
                .copied()
                .ok_or_else(|| Error::Layout("Edge scope missing from hierarchy".to_string()))?;
            hierarchy.scopes[scope_pos].add_edge(source_member, target_member, edge_idx);
        }

        Ok(hierarchy)
    }

    /// Scopes in innermost-first order.
    pub fn scopes(&self) -> impl Iterator<Item = &ContainmentScope> {
        self.scopes.iter()
    }

    fn collect_scopes(&mut self, model: &DiagramModel, container: Option<Id>) {
        for group in model.groups_in(container) {
            self.collect_scopes(model, Some(group.id()));
        }

        let mut scope = ContainmentScope::new(container);
        for node in model.nodes_in(container) {
            scope.add_member(Member::Node(node.id()));
        }
        for group in model.groups_in(container) {
            scope.add_member(Member::Group(group.id()));
        }
        self.scopes.push(scope);
    }
}

/// Path of an endpoint from the diagram root down to itself.
///
/// Each entry is a scope paired with the member of that scope on the way to
/// the endpoint; the final entry is the endpoint itself inside its immediate
/// scope.
fn member_path(model: &DiagramModel, endpoint: Endpoint) -> Vec<(Option<Id>, Member)> {
    let own_member = match endpoint {
        Endpoint::Node(id) => Member::Node(id),
        Endpoint::Group(id) => Member::Group(id),
    };

    let mut ancestors = Vec::new();
    let mut scope = model.parent_of(endpoint);
    while let Some(group_id) = scope {
        ancestors.push(group_id);
        scope = model.group(group_id).and_then(|group| group.parent());
    }
    ancestors.reverse();

    let mut path = Vec::with_capacity(ancestors.len() + 1);
    let mut current_scope = None;
    for group_id in ancestors {
        path.push((current_scope, Member::Group(group_id)));
        current_scope = Some(group_id);
    }
    path.push((current_scope, own_member));

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{
        color::Color,
        draw::StrokeStyle,
        model::{Direction, Edge, Group, Node},
    };

    fn node(id: &str, parent: Option<Id>) -> Node {
        Node::new(
            Id::new(id),
            id.to_string(),
            stencil_core::catalog::resolve("server").unwrap(),
            parent,
        )
    }

    fn edge(source: Endpoint, target: Endpoint) -> Edge {
        Edge::new(
            source,
            target,
            Direction::Forward,
            None,
            StrokeStyle::Solid,
            Color::default(),
        )
    }

    /// root { a, outer { b, inner { c } } }, edges a->c and b->c.
    fn nested_model() -> DiagramModel {
        let outer = Id::new("structure_outer");
        let inner = outer.create_nested(Id::new("structure_inner"));

        DiagramModel::new(
            "structure_test".into(),
            vec![
                node("structure_a", None),
                node("structure_b", Some(outer)),
                node("structure_c", Some(inner)),
            ],
            vec![
                Group::new(outer, "Outer".into(), None),
                Group::new(inner, "Inner".into(), Some(outer)),
            ],
            vec![
                edge(
                    Endpoint::Node(Id::new("structure_a")),
                    Endpoint::Node(Id::new("structure_c")),
                ),
                edge(
                    Endpoint::Node(Id::new("structure_b")),
                    Endpoint::Node(Id::new("structure_c")),
                ),
            ],
        )
    }

    fn scope_of<'a>(
        hierarchy: &'a DiagramHierarchy,
        container: Option<Id>,
    ) -> &'a ContainmentScope {
        hierarchy
            .scopes()
            .find(|scope| scope.container() == container)
            .expect("Scope should exist")
    }

    #[test]
    fn test_scopes_are_innermost_first() {
        let hierarchy = DiagramHierarchy::from_model(&nested_model()).unwrap();
        let containers: Vec<Option<Id>> =
            hierarchy.scopes().map(ContainmentScope::container).collect();

        let outer = Id::new("structure_outer");
        let inner = outer.create_nested(Id::new("structure_inner"));
        assert_eq!(containers, vec![Some(inner), Some(outer), None]);
    }

    #[test]
    fn test_members_per_scope() {
        let hierarchy = DiagramHierarchy::from_model(&nested_model()).unwrap();
        let outer = Id::new("structure_outer");
        let inner = outer.create_nested(Id::new("structure_inner"));

        let root: Vec<Member> = scope_of(&hierarchy, None).members().collect();
        assert_eq!(
            root,
            vec![
                Member::Node(Id::new("structure_a")),
                Member::Group(outer),
            ]
        );

        let outer_members: Vec<Member> = scope_of(&hierarchy, Some(outer)).members().collect();
        assert_eq!(
            outer_members,
            vec![Member::Node(Id::new("structure_b")), Member::Group(inner)]
        );
    }

    #[test]
    fn test_cross_scope_edge_projected_to_common_scope() {
        let hierarchy = DiagramHierarchy::from_model(&nested_model()).unwrap();
        let outer = Id::new("structure_outer");
        let inner = outer.create_nested(Id::new("structure_inner"));

        // a -> c crosses from root into inner; at the root it reads a -> outer.
        let root = scope_of(&hierarchy, None);
        let root_edges: Vec<_> = root.member_edges().collect();
        assert_eq!(root_edges, vec![(0, 1, 0)]);

        // b -> c stays inside outer, projected as b -> inner.
        let outer_scope = scope_of(&hierarchy, Some(outer));
        let outer_edges: Vec<_> = outer_scope.member_edges().collect();
        assert_eq!(outer_edges, vec![(0, 1, 1)]);

        // Inner only contains c; neither projected edge lands there.
        let inner_scope = scope_of(&hierarchy, Some(inner));
        assert_eq!(inner_scope.member_edges().count(), 0);
    }

    #[test]
    fn test_edge_to_enclosing_group_adds_no_constraint() {
        let outer = Id::new("structure_enc");
        let model = DiagramModel::new(
            "enc_test".into(),
            vec![node("structure_enc_n", Some(outer))],
            vec![Group::new(outer, "Outer".into(), None)],
            vec![edge(
                Endpoint::Group(outer),
                Endpoint::Node(Id::new("structure_enc_n")),
            )],
        );

        let hierarchy = DiagramHierarchy::from_model(&model).unwrap();
        // Both endpoints project to the group itself at the root.
        for scope in hierarchy.scopes() {
            assert_eq!(scope.member_edges().count(), 0);
        }
    }
}
