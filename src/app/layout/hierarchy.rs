use std::collections::{BTreeMap, VecDeque};

use eframe::egui::{Vec2, vec2};
use log::debug;

use crate::config::{HierarchyConfig, SceneConfig};
use crate::corps::RelationKind;

use super::super::{ConnectionGraph, NodeControl};

/// Assigns breadth-first levels along edges of `kind` and returns the level
/// given to nodes that no root reaches.
///
/// Roots are nodes that start at least one edge of `kind` and receive none;
/// members without any edge of `kind` are treated as unreached. Unknown kinds
/// never contribute edges, so every member is unreached for them. All roots
/// start the traversal together, so a shared child takes its level from
/// whichever parent is dequeued first.
fn assign_levels(graph: &mut ConnectionGraph, kind: &RelationKind) -> usize {
    let node_count = graph.nodes.len();
    let mut outgoing = vec![Vec::new(); node_count];
    let mut incoming = vec![Vec::new(); node_count];
    for edge in &graph.edges {
        if !kind.is_known() || &edge.relationship.kind != kind {
            continue;
        }
        if !outgoing[edge.source].contains(&edge.target) {
            outgoing[edge.source].push(edge.target);
        }
        if !incoming[edge.target].contains(&edge.source) {
            incoming[edge.target].push(edge.source);
        }
    }

    let mut visited = vec![false; node_count];
    let mut queue = VecDeque::new();
    for (index, node) in graph.nodes.iter_mut().enumerate() {
        node.level = 0;
        if incoming[index].is_empty() && !outgoing[index].is_empty() {
            visited[index] = true;
            queue.push_back((index, 0usize));
        }
    }

    let mut max_level = 0usize;
    while let Some((index, level)) = queue.pop_front() {
        max_level = max_level.max(level);
        graph.nodes[index].level = level;

        for &child in &outgoing[index] {
            if !visited[child] {
                visited[child] = true;
                queue.push_back((child, level + 1));
            }
        }
    }

    // Cycles of `kind` with no root above them end up here as well.
    let unreached_level = max_level + 1;
    for (index, node) in graph.nodes.iter_mut().enumerate() {
        if !visited[index] {
            node.level = unreached_level;
        }
    }

    unreached_level
}

pub(super) fn apply_hierarchy_layout(
    graph: &mut ConnectionGraph,
    config: &HierarchyConfig,
    scene: &SceneConfig,
) {
    if graph.nodes.is_empty() {
        return;
    }

    let trailing_level = assign_levels(graph, &config.kind);
    debug!(
        "hierarchy layout over {}: unreached members on level {trailing_level}",
        config.kind
    );

    let mut bands: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, node) in graph.nodes.iter().enumerate() {
        bands.entry(node.level).or_default().push(index);
    }

    for (level, members) in bands {
        let total_width = (members.len() - 1) as f32 * config.horizontal_spacing;
        let start_x = (scene.width - total_width) / 2.0;
        let y = config.padding + level as f32 * config.vertical_spacing;

        for (column, index) in members.into_iter().enumerate() {
            let node = &mut graph.nodes[index];
            node.column = column;
            node.position = vec2(start_x + column as f32 * config.horizontal_spacing, y);
            node.velocity = Vec2::ZERO;
            node.control = NodeControl::SimulationControlled;
        }
    }
}
