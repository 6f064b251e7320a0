use eframe::egui::Vec2;

use crate::corps::{Member, MemberId, RelationKind};

use super::super::{ConnectionGraph, HighlightState};

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct NodeView {
    pub(in crate::app) node_id: MemberId,
    pub(in crate::app) position: Vec2,
    pub(in crate::app) member: Member,
    pub(in crate::app) highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct EdgeView {
    /// Id of the originating relationship.
    pub(in crate::app) edge_id: u64,
    pub(in crate::app) source_id: MemberId,
    pub(in crate::app) target_id: MemberId,
    pub(in crate::app) from: Vec2,
    pub(in crate::app) to: Vec2,
    pub(in crate::app) kind: RelationKind,
    pub(in crate::app) highlighted: bool,
}

/// Snapshot handed to the painter each frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub(in crate::app) struct RenderState {
    pub(in crate::app) nodes: Vec<NodeView>,
    pub(in crate::app) edges: Vec<EdgeView>,
}

impl ConnectionGraph {
    pub(in crate::app) fn render_state(&self, highlight: Option<&HighlightState>) -> RenderState {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeView {
                node_id: node.member.id,
                position: node.position,
                member: node.member.clone(),
                highlighted: highlight.is_some_and(|state| state.is_node_highlighted(index)),
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(index, edge)| EdgeView {
                edge_id: edge.relationship.id,
                source_id: self.nodes[edge.source].member.id,
                target_id: self.nodes[edge.target].member.id,
                from: self.nodes[edge.source].position,
                to: self.nodes[edge.target].position,
                kind: edge.relationship.kind.clone(),
                highlighted: highlight.is_some_and(|state| state.is_edge_highlighted(index)),
            })
            .collect();

        RenderState { nodes, edges }
    }
}
