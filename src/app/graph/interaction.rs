use std::collections::VecDeque;

use eframe::egui::{self, Rect, Ui, Vec2};

use crate::config::ReleaseVelocity;
use crate::corps::MemberId;

use super::super::render_utils::screen_to_scene;
use super::super::{ConnectionGraph, NodeControl, ViewModel};

/// Outbound notifications for the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) enum GraphEvent {
    NodeSelected(Option<MemberId>),
    NodeHovered(Option<MemberId>),
    EditRequested(u64),
    DeleteRequested(u64),
}

#[derive(Debug, Default)]
pub(in crate::app) struct Interaction {
    selected: Option<MemberId>,
    hovered: Option<MemberId>,
    dragging: Option<usize>,
    events: VecDeque<GraphEvent>,
}

impl Interaction {
    pub(in crate::app) fn selected(&self) -> Option<MemberId> {
        self.selected
    }

    pub(in crate::app) fn hovered(&self) -> Option<MemberId> {
        self.hovered
    }

    pub(in crate::app) fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Selecting the already selected member clears the selection.
    pub(in crate::app) fn toggle_selection(&mut self, member_id: MemberId) {
        self.selected = if self.selected == Some(member_id) {
            None
        } else {
            Some(member_id)
        };
        self.events.push_back(GraphEvent::NodeSelected(self.selected));
    }

    pub(in crate::app) fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.events.push_back(GraphEvent::NodeSelected(None));
        }
    }

    pub(in crate::app) fn hover(&mut self, member_id: Option<MemberId>) {
        if self.hovered != member_id {
            self.hovered = member_id;
            self.events.push_back(GraphEvent::NodeHovered(member_id));
        }
    }

    pub(in crate::app) fn begin_drag(&mut self, graph: &mut ConnectionGraph, index: usize) {
        let Some(node) = graph.nodes.get_mut(index) else {
            return;
        };
        node.control = NodeControl::UserControlled;
        self.dragging = Some(index);
    }

    /// Places the dragged node exactly at `position`; the simulation never
    /// clamps or moves a user-controlled node.
    pub(in crate::app) fn drag_to(&mut self, graph: &mut ConnectionGraph, position: Vec2) {
        if let Some(node) = self.dragging.and_then(|index| graph.nodes.get_mut(index)) {
            node.position = position;
        }
    }

    pub(in crate::app) fn end_drag(&mut self, graph: &mut ConnectionGraph, release: ReleaseVelocity) {
        let Some(index) = self.dragging.take() else {
            return;
        };
        if let Some(node) = graph.nodes.get_mut(index) {
            node.control = NodeControl::SimulationControlled;
            if release == ReleaseVelocity::Reset {
                node.velocity = Vec2::ZERO;
            }
        }
    }

    pub(in crate::app) fn request_edit(&mut self, relationship_id: u64) {
        self.events
            .push_back(GraphEvent::EditRequested(relationship_id));
    }

    pub(in crate::app) fn request_delete(&mut self, relationship_id: u64) {
        self.events
            .push_back(GraphEvent::DeleteRequested(relationship_id));
    }

    pub(in crate::app) fn drain_events(&mut self) -> impl Iterator<Item = GraphEvent> + '_ {
        self.events.drain(..)
    }

    /// Drops references to members that left the graph after a rebuild.
    pub(in crate::app) fn retain_valid(&mut self, graph: &ConnectionGraph) {
        if self
            .selected
            .is_some_and(|id| graph.node_index(id).is_none())
        {
            self.clear_selection();
        }
        if self.hovered.is_some_and(|id| graph.node_index(id).is_none()) {
            self.hover(None);
        }
        self.dragging = None;
    }
}

/// Closest node whose centre lies within `radius` of `point`.
pub(in crate::app) fn node_at(graph: &ConnectionGraph, point: Vec2, radius: f32) -> Option<usize> {
    graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (index, (node.position - point).length()))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let center = self.scene_center();
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let scene_before = screen_to_scene(rect, center, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 4.0);
        self.pan = pointer - rect.center() - ((scene_before - center) * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::app::graph::build_graph;
    use crate::corps::RelationKind;
    use crate::corps::fixtures::relationship;

    fn graph() -> ConnectionGraph {
        let mut graph = build_graph(&[
            relationship(1, 1, 2, RelationKind::Leibbursch),
            relationship(2, 2, 3, RelationKind::Freundschaft),
        ]);
        for (index, node) in graph.nodes.iter_mut().enumerate() {
            node.position = vec2(100.0 + index as f32 * 100.0, 100.0);
        }
        graph
    }

    #[test]
    fn selecting_twice_deselects() {
        let mut interaction = Interaction::default();
        interaction.toggle_selection(2);
        assert_eq!(interaction.selected(), Some(2));
        interaction.toggle_selection(2);
        assert_eq!(interaction.selected(), None);

        let events = interaction.drain_events().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                GraphEvent::NodeSelected(Some(2)),
                GraphEvent::NodeSelected(None)
            ]
        );
    }

    #[test]
    fn selecting_another_member_switches_selection() {
        let mut interaction = Interaction::default();
        interaction.toggle_selection(1);
        interaction.toggle_selection(3);
        assert_eq!(interaction.selected(), Some(3));
    }

    #[test]
    fn hover_only_reports_changes() {
        let mut interaction = Interaction::default();
        interaction.hover(Some(1));
        interaction.hover(Some(1));
        interaction.hover(None);
        interaction.hover(None);

        let events = interaction.drain_events().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![GraphEvent::NodeHovered(Some(1)), GraphEvent::NodeHovered(None)]
        );
        assert_eq!(interaction.drain_events().count(), 0);
    }

    #[test]
    fn edit_and_delete_are_only_reported() {
        let mut interaction = Interaction::default();
        interaction.request_edit(7);
        interaction.request_delete(8);
        let events = interaction.drain_events().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![GraphEvent::EditRequested(7), GraphEvent::DeleteRequested(8)]
        );
    }

    #[test]
    fn drag_pins_and_release_hands_back_control() {
        let mut graph = graph();
        let mut interaction = Interaction::default();
        graph.nodes[1].velocity = vec2(3.0, -2.0);

        interaction.begin_drag(&mut graph, 1);
        assert_eq!(interaction.dragging(), Some(1));
        assert_eq!(graph.nodes[1].control, NodeControl::UserControlled);

        interaction.drag_to(&mut graph, vec2(-50.0, 900.0));
        assert_eq!(graph.nodes[1].position, vec2(-50.0, 900.0));

        interaction.end_drag(&mut graph, ReleaseVelocity::Reset);
        assert_eq!(interaction.dragging(), None);
        assert_eq!(graph.nodes[1].control, NodeControl::SimulationControlled);
        assert_eq!(graph.nodes[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn release_can_keep_velocity() {
        let mut graph = graph();
        let mut interaction = Interaction::default();
        graph.nodes[0].velocity = vec2(3.0, -2.0);

        interaction.begin_drag(&mut graph, 0);
        interaction.end_drag(&mut graph, ReleaseVelocity::Keep);
        assert_eq!(graph.nodes[0].velocity, vec2(3.0, -2.0));
    }

    #[test]
    fn dragging_out_of_range_index_is_ignored() {
        let mut graph = graph();
        let mut interaction = Interaction::default();
        interaction.begin_drag(&mut graph, 42);
        assert_eq!(interaction.dragging(), None);
        interaction.end_drag(&mut graph, ReleaseVelocity::Reset);
    }

    #[test]
    fn hit_test_picks_closest_node_in_radius() {
        let graph = graph();
        assert_eq!(node_at(&graph, vec2(190.0, 100.0), 20.0), Some(1));
        assert_eq!(node_at(&graph, vec2(150.0, 100.0), 60.0), Some(0));
        assert_eq!(node_at(&graph, vec2(150.0, 300.0), 20.0), None);
        assert_eq!(node_at(&ConnectionGraph::default(), Vec2::ZERO, 100.0), None);
    }

    #[test]
    fn rebuild_drops_stale_selection() {
        let mut interaction = Interaction::default();
        interaction.toggle_selection(42);
        interaction.hover(Some(2));
        let _ = interaction.drain_events().count();

        interaction.retain_valid(&graph());
        assert_eq!(interaction.selected(), None);
        assert_eq!(interaction.hovered(), Some(2));
        assert_eq!(
            interaction.drain_events().collect::<Vec<_>>(),
            vec![GraphEvent::NodeSelected(None)]
        );
    }
}
