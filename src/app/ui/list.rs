use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::render_utils::kind_color;
use super::details::date_range;

impl ViewModel {
    pub(in crate::app) fn draw_relationship_list(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_graph();
        }

        let rows = self
            .graph
            .edges
            .iter()
            .map(|edge| edge.relationship.clone())
            .collect::<Vec<_>>();

        if rows.is_empty() {
            ui.label("No relationships match the current filters.");
            return;
        }

        let selected = self.interaction.selected();
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("relationship_list")
                .striped(true)
                .num_columns(6)
                .show(ui, |ui| {
                    for header in ["From", "Kind", "To", "Dates", "Description", ""] {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();

                    for relationship in &rows {
                        let involved = selected.is_some_and(|id| relationship.involves(id));
                        let from_selected = selected == Some(relationship.from.id);
                        if ui
                            .selectable_label(from_selected, relationship.from.full_name())
                            .clicked()
                        {
                            self.interaction.toggle_selection(relationship.from.id);
                        }
                        let kind = RichText::new(relationship.kind.label())
                            .color(kind_color(&relationship.kind));
                        ui.label(if involved { kind.strong() } else { kind });
                        let to_selected = selected == Some(relationship.to.id);
                        if ui
                            .selectable_label(to_selected, relationship.to.full_name())
                            .clicked()
                        {
                            self.interaction.toggle_selection(relationship.to.id);
                        }

                        ui.label(date_range(relationship).unwrap_or_default());
                        ui.label(relationship.description.as_deref().unwrap_or(""));
                        ui.horizontal(|ui| self.draw_relationship_actions(ui, relationship.id));
                        ui.end_row();
                    }
                });
        });
    }
}
