use eframe::egui::{self, RichText, Ui};

use crate::config::ReleaseVelocity;
use crate::corps::RelationKind;

use super::super::render_utils::kind_color;
use super::super::{LayoutStrategy, ViewModel};

impl ViewModel {
    /// Kinds worth offering as filters: the known set plus any unknown tag
    /// present in the loaded data.
    fn filter_kinds(&self) -> Vec<RelationKind> {
        let mut kinds = RelationKind::KNOWN.to_vec();
        for relationship in &self.relationships {
            if !relationship.kind.is_known() && !kinds.contains(&relationship.kind) {
                kinds.push(relationship.kind.clone());
            }
        }
        kinds
    }

    fn draw_kind_filter(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;

        ui.label(RichText::new("Relationship kinds").strong());
        ui.small("Nothing selected shows every kind.");
        ui.horizontal_wrapped(|ui| {
            for kind in self.filter_kinds() {
                let selected = self.filter.is_kind_selected(&kind);
                let text = RichText::new(kind.label()).color(kind_color(&kind));
                if ui.selectable_label(selected, text).clicked() {
                    self.filter.toggle_kind(&kind);
                    changed = true;
                }
            }
        });

        if !self.filter.kinds.is_empty() && ui.small_button("Show all kinds").clicked() {
            self.filter.kinds.clear();
            changed = true;
        }

        changed |= ui
            .checkbox(&mut self.filter.active_only, "Active relationships only")
            .on_hover_text("Hide relationships that have ended.")
            .changed();

        changed
    }

    fn draw_hierarchy_tuning(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;

        ui.horizontal_wrapped(|ui| {
            ui.label("Levels follow");
            for kind in RelationKind::KNOWN {
                let text = RichText::new(kind.label()).color(kind_color(&kind));
                if ui
                    .selectable_label(self.config.hierarchy.kind == kind, text)
                    .clicked()
                    && self.config.hierarchy.kind != kind
                {
                    self.config.hierarchy.kind = kind;
                    changed = true;
                }
            }
        });

        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.hierarchy.vertical_spacing, 60.0..=300.0)
                    .text("Level spacing"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.hierarchy.horizontal_spacing, 60.0..=400.0)
                    .text("Member spacing"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.hierarchy.padding, 0.0..=300.0)
                    .text("Top padding"),
            )
            .changed();

        changed
    }

    fn draw_force_tuning(&mut self, ui: &mut Ui) {
        let force = &mut self.config.force;

        ui.add(
            egui::Slider::new(&mut force.charge, -20_000.0..=0.0)
                .text("Charge")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Negative values push members apart.");
        ui.add(
            egui::Slider::new(&mut force.spring, 0.0..=0.1)
                .text("Spring")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("How strongly related members pull toward the rest length.");
        ui.add(
            egui::Slider::new(&mut force.rest_length, 20.0..=400.0)
                .text("Rest length")
                .clamping(egui::SliderClamping::Always),
        );
        ui.add(
            egui::Slider::new(&mut force.center, 0.0..=0.02)
                .text("Centering")
                .clamping(egui::SliderClamping::Always),
        );
        ui.add(
            egui::Slider::new(&mut force.damping, 0.5..=0.99)
                .text("Damping")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Fraction of velocity kept from one tick to the next.");
        ui.add(
            egui::Slider::new(&mut force.step_scale, 0.1..=2.0)
                .text("Step scale")
                .clamping(egui::SliderClamping::Always),
        );

        ui.horizontal(|ui| {
            ui.label("On release");
            ui.selectable_value(&mut force.release, ReleaseVelocity::Reset, "Stop")
                .on_hover_text("A released member starts from rest.");
            ui.selectable_value(&mut force.release, ReleaseVelocity::Keep, "Keep momentum")
                .on_hover_text("A released member keeps the velocity it had before the drag.");
        });
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.add_space(4.0);

        let mut changed = self.draw_kind_filter(ui);

        ui.add_space(6.0);
        ui.label("Search members");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy match on member names. Matches light up while nothing is selected.");

        ui.separator();
        ui.heading("Layout");
        ui.add_space(4.0);

        let mut strategy = self.strategy;
        ui.horizontal(|ui| {
            for candidate in LayoutStrategy::ALL {
                ui.selectable_value(&mut strategy, candidate, candidate.label());
            }
        });
        self.set_strategy(strategy);

        match self.strategy {
            LayoutStrategy::Hierarchy => {
                changed |= self.draw_hierarchy_tuning(ui);
            }
            LayoutStrategy::Force => {
                if ui
                    .checkbox(&mut self.live_simulation, "Live simulation")
                    .on_hover_text("Keep relaxing the layout every frame.")
                    .changed()
                {
                    self.restart_ticker();
                }
                self.draw_force_tuning(ui);
                if ui.button("Scatter again").clicked() {
                    changed = true;
                }
            }
        }

        if changed {
            self.graph_dirty = true;
        }
    }
}
