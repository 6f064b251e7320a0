use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2, vec2};
use log::{debug, info};

use super::super::highlight::build_highlight_state;
use super::super::layout::step_force;
use super::super::render_utils::{
    blend_color, dim_color, draw_background, kind_color, scene_to_screen, screen_to_scene,
};
use super::super::ViewModel;
use super::{GraphEvent, node_at};

const NODE_RADIUS: f32 = 18.0;
const MAX_RECENT_EVENTS: usize = 12;

fn node_screen_radius(zoom: f32) -> f32 {
    (NODE_RADIUS * zoom.sqrt()).clamp(6.0, 40.0)
}

impl ViewModel {
    pub(in crate::app) fn scene_center(&self) -> Vec2 {
        let (x, y) = self.config.scene.center();
        vec2(x, y)
    }

    fn advance_simulation(&mut self, ui: &Ui) {
        let now = ui.input(|input| input.time);
        let ticks = self.ticker.due_ticks(now);
        for _ in 0..ticks {
            step_force(&mut self.graph, &self.config.force, &self.config.scene);
            self.simulated_ticks += 1;
        }

        if self.ticker.is_running() {
            ui.ctx().request_repaint_after(self.ticker.repaint_interval());
        }
    }

    /// Moves queued interaction events into the recent list and the log.
    pub(in crate::app) fn flush_events(&mut self) {
        let events = self.interaction.drain_events().collect::<Vec<_>>();
        for event in events {
            match &event {
                GraphEvent::EditRequested(id) => info!("edit requested for relationship {id}"),
                GraphEvent::DeleteRequested(id) => info!("delete requested for relationship {id}"),
                GraphEvent::NodeSelected(member) => debug!("node selected: {member:?}"),
                GraphEvent::NodeHovered(member) => debug!("node hovered: {member:?}"),
            }

            if !matches!(event, GraphEvent::NodeHovered(_)) {
                self.recent_events.push_front(event);
                self.recent_events.truncate(MAX_RECENT_EVENTS);
            }
        }
    }

    fn handle_node_pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        let center = self.scene_center();
        let pointer_scene = response
            .hover_pos()
            .or_else(|| ui.input(|input| input.pointer.interact_pos()))
            .map(|pointer| screen_to_scene(rect, center, self.pan, self.zoom, pointer));
        let hit_radius = node_screen_radius(self.zoom) / self.zoom;

        if self.interaction.dragging().is_none() {
            let hovered = pointer_scene
                .filter(|_| response.hovered())
                .and_then(|point| node_at(&self.graph, point, hit_radius))
                .map(|index| self.graph.nodes[index].member.id);
            self.interaction.hover(hovered);
        }

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = ui
                .input(|input| input.pointer.press_origin())
                .map(|origin| screen_to_scene(rect, center, self.pan, self.zoom, origin))
                .and_then(|point| node_at(&self.graph, point, hit_radius))
        {
            self.interaction.begin_drag(&mut self.graph, index);
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(point) = pointer_scene
        {
            self.interaction.drag_to(&mut self.graph, point);
        }

        if response.drag_stopped() {
            self.interaction
                .end_drag(&mut self.graph, self.config.force.release);
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            match pointer_scene.and_then(|point| node_at(&self.graph, point, hit_radius)) {
                Some(index) => {
                    let member_id = self.graph.nodes[index].member.id;
                    self.interaction.toggle_selection(member_id);
                }
                None => self.interaction.clear_selection(),
            }
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let center = self.scene_center();

        let scene_rect = Rect::from_min_max(
            scene_to_screen(rect, center, self.pan, self.zoom, Vec2::ZERO),
            scene_to_screen(
                rect,
                center,
                self.pan,
                self.zoom,
                vec2(self.config.scene.width, self.config.scene.height),
            ),
        );
        draw_background(&painter, rect, scene_rect);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        if self.graph.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No relationships match the current filters.",
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        self.handle_node_pointer(ui, rect, &response);
        self.advance_simulation(ui);
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        let search_matches = self.cached_search_matches();
        let highlight = self
            .interaction
            .selected()
            .and_then(|selected| build_highlight_state(&self.graph, selected));
        let render = self.graph.render_state(highlight.as_ref());
        let selection_active = highlight.is_some();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());
        let zoom_sqrt = self.zoom.sqrt();
        let (pan, zoom) = (self.pan, self.zoom);

        for edge in &render.edges {
            let start = scene_to_screen(rect, center, pan, zoom, edge.from);
            let end = scene_to_screen(rect, center, pan, zoom, edge.to);
            let base = kind_color(&edge.kind);

            let (width, color) = if edge.highlighted {
                ((3.0 * zoom_sqrt).clamp(1.5, 6.0), base)
            } else if selection_active {
                ((1.0 * zoom_sqrt).clamp(0.5, 2.0), dim_color(base, 0.35))
            } else {
                ((1.8 * zoom_sqrt).clamp(0.8, 3.5), base)
            };

            if edge.source_id == edge.target_id {
                painter.circle_stroke(
                    start + vec2(0.0, -NODE_RADIUS * zoom_sqrt),
                    NODE_RADIUS * 0.6 * zoom_sqrt,
                    Stroke::new(width, color),
                );
            } else {
                painter.line_segment([start, end], Stroke::new(width, color));
            }
        }

        let hovered = self.interaction.hovered();
        let selected = self.interaction.selected();
        let selected_color = Color32::from_rgb(245, 206, 93);
        let base_color = Color32::from_rgb(64, 112, 168);
        let radius = node_screen_radius(zoom);

        for (index, node) in render.nodes.iter().enumerate() {
            let position = scene_to_screen(rect, center, pan, zoom, node.position);
            let is_selected = selected == Some(node.node_id);
            let is_hovered = hovered == Some(node.node_id);
            let is_search_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            let color = if is_selected {
                selected_color
            } else if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else if node.highlighted {
                blend_color(base_color, selected_color, 0.45)
            } else if is_search_match {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.68)
            } else if selection_active {
                dim_color(base_color, 0.45)
            } else if search_active {
                dim_color(base_color, 0.38)
            } else {
                base_color
            };

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    if is_selected || is_search_match { 2.2 } else { 1.0 },
                    Color32::from_rgba_unmultiplied(15, 15, 15, 190),
                ),
            );
            painter.text(
                position,
                Align2::CENTER_CENTER,
                node.member.initials(),
                FontId::proportional((radius * 0.8).clamp(8.0, 18.0)),
                Color32::from_gray(245),
            );

            if is_selected || is_hovered || node.highlighted || zoom > 0.7 {
                painter.text(
                    position + vec2(0.0, radius + 4.0),
                    Align2::CENTER_TOP,
                    node.member.full_name(),
                    FontId::proportional(12.0),
                    Color32::from_gray(225),
                );
            }
        }

        if let Some(index) = hovered.and_then(|id| self.graph.node_index(id)) {
            let node = &self.graph.nodes[index];
            let degree = self.graph.incident_edges(index).count();
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{}  |  level {}  |  relationships {degree}",
                    node.member.full_name(),
                    node.level
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        self.flush_events();
    }
}
