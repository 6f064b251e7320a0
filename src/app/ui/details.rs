use eframe::egui::{self, RichText, Ui};

use crate::corps::{Member, Relationship};

use super::super::graph::GraphEvent;
use super::super::render_utils::kind_color;
use super::super::{LayoutStrategy, ViewModel};

pub(super) fn date_range(relationship: &Relationship) -> Option<String> {
    match (
        relationship.start_date.as_deref(),
        relationship.end_date.as_deref(),
    ) {
        (None, None) => None,
        (Some(start), None) => Some(format!("since {start}")),
        (None, Some(end)) => Some(format!("until {end}")),
        (Some(start), Some(end)) => Some(format!("{start} to {end}")),
    }
}

fn member_heading(ui: &mut Ui, member: &Member) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(member.initials()).monospace().strong());
        ui.label(RichText::new(member.full_name()).heading());
    });
    if let Some(number) = member.number {
        ui.label(format!("Number: {number}"));
    }
    if let Some(status) = &member.status {
        ui.label(format!("Status: {status}"));
    }
    ui.small(format!("Member id {}", member.id));
}

impl ViewModel {
    /// Edit/Delete buttons for one relationship; clicks are only reported.
    pub(in crate::app) fn draw_relationship_actions(&mut self, ui: &mut Ui, relationship_id: u64) {
        if ui
            .small_button("Edit")
            .on_hover_text("Ask the host to open the edit dialog.")
            .clicked()
        {
            self.interaction.request_edit(relationship_id);
        }
        if ui
            .small_button("Delete")
            .on_hover_text("Ask the host to delete this relationship.")
            .clicked()
        {
            self.interaction.request_delete(relationship_id);
        }
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let selected = self
            .interaction
            .selected()
            .and_then(|id| self.graph.node_index(id));

        match selected {
            None => {
                ui.label("Click a member in the graph to see their relationships.");
            }
            Some(index) => {
                let member = self.graph.nodes[index].member.clone();
                let level = self.graph.nodes[index].level;
                let column = self.graph.nodes[index].column;
                let relationships = self
                    .graph
                    .incident_edges(index)
                    .map(|edge| self.graph.edges[edge].relationship.clone())
                    .collect::<Vec<_>>();

                member_heading(ui, &member);
                if self.strategy == LayoutStrategy::Hierarchy {
                    ui.label(format!("Level {level}, position {}", column + 1));
                }

                ui.separator();
                ui.label(RichText::new(format!("Relationships ({})", relationships.len())).strong());
                for relationship in &relationships {
                    ui.group(|ui| {
                        let direction = if relationship.from.id == member.id {
                            "to"
                        } else {
                            "from"
                        };
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(relationship.kind.label())
                                    .color(kind_color(&relationship.kind))
                                    .strong(),
                            );
                            ui.label(format!(
                                "{direction} {}",
                                relationship.counterpart(member.id).full_name()
                            ));
                        });
                        if let Some(range) = date_range(relationship) {
                            ui.small(range);
                        }
                        if let Some(description) = &relationship.description {
                            ui.label(description.as_str());
                        }
                        if !relationship.active {
                            ui.small("inactive");
                        }
                        ui.horizontal(|ui| self.draw_relationship_actions(ui, relationship.id));
                    });
                }

                ui.add_space(4.0);
                if ui.button("Clear selection").clicked() {
                    self.interaction.clear_selection();
                }
            }
        }

        ui.separator();
        egui::CollapsingHeader::new("Recent events")
            .default_open(true)
            .show(ui, |ui| {
                if self.recent_events.is_empty() {
                    ui.small("Nothing yet.");
                }
                for event in &self.recent_events {
                    let text = match event {
                        GraphEvent::NodeSelected(Some(id)) => format!("selected member {id}"),
                        GraphEvent::NodeSelected(None) => "selection cleared".to_owned(),
                        GraphEvent::NodeHovered(Some(id)) => format!("hovered member {id}"),
                        GraphEvent::NodeHovered(None) => "hover cleared".to_owned(),
                        GraphEvent::EditRequested(id) => format!("edit requested: relationship {id}"),
                        GraphEvent::DeleteRequested(id) => {
                            format!("delete requested: relationship {id}")
                        }
                    };
                    ui.small(text);
                }
            });
    }
}
