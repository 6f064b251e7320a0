use std::collections::HashSet;

use crate::corps::MemberId;

use super::{ConnectionGraph, HighlightState};

mod search;

/// Highlight set for `selected`: every incident edge, the selected node and
/// each node on the far end of those edges.
///
/// Returns `None` when the member is not part of the graph.
pub(super) fn build_highlight_state(
    graph: &ConnectionGraph,
    selected: MemberId,
) -> Option<HighlightState> {
    let selected_index = graph.node_index(selected)?;

    let mut nodes = HashSet::new();
    let mut edges = HashSet::new();
    nodes.insert(selected_index);

    for edge_index in graph.incident_edges(selected_index) {
        let edge = &graph.edges[edge_index];
        edges.insert(edge_index);
        nodes.insert(edge.source);
        nodes.insert(edge.target);
    }

    Some(HighlightState { nodes, edges })
}

impl HighlightState {
    pub(super) fn is_node_highlighted(&self, index: usize) -> bool {
        self.nodes.contains(&index)
    }

    pub(super) fn is_edge_highlighted(&self, index: usize) -> bool {
        self.edges.contains(&index)
    }
}
