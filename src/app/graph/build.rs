use std::collections::HashMap;

use eframe::egui::Vec2;
use log::debug;

use crate::corps::{Member, MemberId, Relationship};

use super::super::{ConnectionGraph, GraphEdge, GraphNode, NodeControl, ViewModel, ViewerOptions};

fn make_node(member: &Member) -> GraphNode {
    GraphNode {
        member: member.clone(),
        position: Vec2::ZERO,
        velocity: Vec2::ZERO,
        level: 0,
        column: 0,
        control: NodeControl::SimulationControlled,
    }
}

/// Node order follows the first appearance of each member id while scanning
/// `relationships`; every relationship becomes exactly one edge.
pub(in crate::app) fn build_graph(relationships: &[Relationship]) -> ConnectionGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::with_capacity(relationships.len());
    let mut index_by_id: HashMap<MemberId, usize> = HashMap::new();

    let mut intern = |member: &Member, nodes: &mut Vec<GraphNode>| -> usize {
        *index_by_id.entry(member.id).or_insert_with(|| {
            nodes.push(make_node(member));
            nodes.len() - 1
        })
    };

    for relationship in relationships {
        let source = intern(&relationship.from, &mut nodes);
        let target = intern(&relationship.to, &mut nodes);
        edges.push(GraphEdge {
            source,
            target,
            relationship: relationship.clone(),
        });
    }

    ConnectionGraph {
        nodes,
        edges,
        index_by_id,
    }
}

impl ConnectionGraph {
    pub(in crate::app) fn node_index(&self, member_id: MemberId) -> Option<usize> {
        self.index_by_id.get(&member_id).copied()
    }

    pub(in crate::app) fn incident_edges(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, edge)| edge.source == index || edge.target == index)
            .map(|(edge_index, _)| edge_index)
    }
}

impl ViewModel {
    pub(in crate::app) fn rebuild_graph(&mut self) {
        self.graph_revision = self.graph_revision.wrapping_add(1);
        self.search_match_cache = None;

        let visible = self.filter.apply(&self.relationships);
        let mut graph = build_graph(&visible);
        self.strategy.compute_layout(&mut graph, &self.config);
        debug!(
            "rebuilt graph revision {}: {} nodes / {} edges ({} layout)",
            self.graph_revision,
            graph.nodes.len(),
            graph.edges.len(),
            self.strategy.label()
        );

        self.graph = graph;
        self.interaction.retain_valid(&self.graph);
        self.restart_ticker();
        self.graph_dirty = false;
    }

    pub(in crate::app) fn current_options(&self, source: &std::path::Path) -> ViewerOptions {
        ViewerOptions {
            source: source.to_path_buf(),
            config: self.config.clone(),
            strategy: self.strategy,
            filter: self.filter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::corps::RelationKind;
    use crate::corps::fixtures::relationship;

    fn member_ids(graph: &ConnectionGraph) -> Vec<MemberId> {
        graph.nodes.iter().map(|node| node.member.id).collect()
    }

    #[test]
    fn nodes_follow_first_occurrence_order() {
        let relationships = vec![
            relationship(1, 3, 1, RelationKind::Leibbursch),
            relationship(2, 1, 2, RelationKind::Freundschaft),
            relationship(3, 2, 3, RelationKind::Mentor),
        ];

        let graph = build_graph(&relationships);
        assert_eq!(member_ids(&graph), vec![3, 1, 2]);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!((graph.edges[0].source, graph.edges[0].target), (0, 1));
        assert_eq!((graph.edges[2].source, graph.edges[2].target), (2, 0));
        assert_eq!(graph.node_index(2), Some(2));
        assert_eq!(graph.node_index(99), None);
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let graph = build_graph(&[]);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn self_reference_and_duplicates_are_permitted() {
        let relationships = vec![
            relationship(1, 5, 5, RelationKind::Bruderschaft),
            relationship(2, 5, 6, RelationKind::Mentor),
            relationship(3, 5, 6, RelationKind::Mentor),
        ];

        let graph = build_graph(&relationships);
        assert_eq!(member_ids(&graph), vec![5, 6]);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!((graph.edges[0].source, graph.edges[0].target), (0, 0));
        assert_eq!(graph.incident_edges(1).collect::<Vec<_>>(), vec![1, 2]);
    }

    fn relationship_lists() -> impl Strategy<Value = Vec<Relationship>> {
        prop::collection::vec((0u64..12, 0u64..12, any::<bool>()), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(id, (from, to, hierarchical))| {
                    let kind = if hierarchical {
                        RelationKind::Leibbursch
                    } else {
                        RelationKind::Freundschaft
                    };
                    relationship(id as u64, from, to, kind)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn node_and_edge_counts_match_input(relationships in relationship_lists()) {
            let graph = build_graph(&relationships);
            let mut distinct = relationships
                .iter()
                .flat_map(|relationship| [relationship.from.id, relationship.to.id])
                .collect::<Vec<_>>();
            distinct.sort_unstable();
            distinct.dedup();

            prop_assert_eq!(graph.nodes.len(), distinct.len());
            prop_assert_eq!(graph.edges.len(), relationships.len());
            for edge in &graph.edges {
                prop_assert!(edge.source < graph.nodes.len());
                prop_assert!(edge.target < graph.nodes.len());
                prop_assert_eq!(graph.nodes[edge.source].member.id, edge.relationship.from.id);
                prop_assert_eq!(graph.nodes[edge.target].member.id, edge.relationship.to.id);
            }
        }

        #[test]
        fn rebuilding_is_deterministic(relationships in relationship_lists()) {
            let first = build_graph(&relationships);
            let second = build_graph(&relationships);
            prop_assert_eq!(member_ids(&first), member_ids(&second));
        }
    }
}
