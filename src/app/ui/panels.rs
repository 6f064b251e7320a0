use std::collections::VecDeque;
use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, Vec2};
use log::info;

use crate::corps::Relationship;

use super::super::graph::Interaction;
use super::super::scheduler::FrameTicker;
use super::super::{LayoutStrategy, ViewMode, ViewModel, ViewerOptions};

impl ViewModel {
    pub(in crate::app) fn new(relationships: Vec<Relationship>, options: ViewerOptions) -> Self {
        info!(
            "viewer ready with {} relationships ({} layout)",
            relationships.len(),
            options.strategy.label()
        );

        Self {
            ticker: FrameTicker::new(options.config.force.tick_rate_hz),
            relationships,
            filter: options.filter,
            config: options.config,
            strategy: options.strategy,
            view_mode: ViewMode::Graph,
            graph: Default::default(),
            graph_dirty: true,
            graph_revision: 0,
            interaction: Interaction::default(),
            live_simulation: true,
            simulated_ticks: 0,
            pan: Vec2::ZERO,
            zoom: 1.0,
            search: String::new(),
            search_match_cache: None,
            recent_events: VecDeque::new(),
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn set_strategy(&mut self, strategy: LayoutStrategy) {
        if self.strategy == strategy {
            return;
        }

        info!(
            "switching layout from {} to {}",
            self.strategy.label(),
            strategy.label()
        );
        self.strategy = strategy;
        self.graph_dirty = true;
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);
        if self.graph_dirty {
            self.rebuild_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Corps connections");
                    ui.separator();
                    ui.label(format!("source: {}", source.display()));
                    ui.label(format!("members: {}", self.graph.nodes.len()));
                    ui.label(format!(
                        "relationships: {} of {}",
                        self.graph.edges.len(),
                        self.relationships.len()
                    ));
                    ui.separator();

                    let mut strategy = self.strategy;
                    for candidate in LayoutStrategy::ALL {
                        ui.selectable_value(&mut strategy, candidate, candidate.label());
                    }
                    self.set_strategy(strategy);

                    ui.separator();
                    ui.selectable_value(&mut self.view_mode, ViewMode::Graph, "Graph");
                    ui.selectable_value(&mut self.view_mode, ViewMode::List, "List");
                    ui.separator();

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Re-run layout").clicked() {
                        self.graph_dirty = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_controls(ui));
            });

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_details(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.view_mode {
            ViewMode::Graph => self.draw_graph(ui),
            ViewMode::List => self.draw_relationship_list(ui),
        });

        self.flush_events();
    }
}
