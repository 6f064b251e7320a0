use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use log::{error, info};

use crate::config::LayoutConfig;
use crate::corps::{Member, MemberId, Relationship, RelationshipFilter, load_relationships};

mod graph;
mod highlight;
mod layout;
mod render_utils;
mod scheduler;
mod ui;

pub use layout::LayoutStrategy;

use graph::{GraphEvent, Interaction};
use scheduler::FrameTicker;

type LoadResult = Result<Vec<Relationship>, String>;

/// Everything the viewer needs to (re)load and lay out the relationship set.
#[derive(Clone, Debug)]
pub struct ViewerOptions {
    pub source: PathBuf,
    pub config: LayoutConfig,
    pub strategy: LayoutStrategy,
    pub filter: RelationshipFilter,
}

pub struct ConnectionsApp {
    options: ViewerOptions,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ViewMode {
    #[default]
    Graph,
    List,
}

/// Who owns a node's position right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum NodeControl {
    #[default]
    SimulationControlled,
    UserControlled,
}

struct GraphNode {
    member: Member,
    position: Vec2,
    velocity: Vec2,
    level: usize,
    column: usize,
    control: NodeControl,
}

struct GraphEdge {
    source: usize,
    target: usize,
    relationship: Relationship,
}

#[derive(Default)]
struct ConnectionGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index_by_id: HashMap<MemberId, usize>,
}

struct HighlightState {
    nodes: HashSet<usize>,
    edges: HashSet<usize>,
}

struct SearchMatchCache {
    query: String,
    graph_revision: u64,
    matches: Arc<HashSet<usize>>,
}

struct ViewModel {
    relationships: Vec<Relationship>,
    filter: RelationshipFilter,
    config: LayoutConfig,
    strategy: LayoutStrategy,
    view_mode: ViewMode,
    graph: ConnectionGraph,
    graph_dirty: bool,
    graph_revision: u64,
    interaction: Interaction,
    ticker: FrameTicker,
    live_simulation: bool,
    simulated_ticks: u64,
    pan: Vec2,
    zoom: f32,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    recent_events: VecDeque<GraphEvent>,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl ConnectionsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: ViewerOptions) -> Self {
        let state = Self::start_load(&options);
        Self {
            options,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(options: &ViewerOptions) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();
        let source = options.source.clone();
        let load_filter = RelationshipFilter {
            active_only: options.filter.active_only,
            kinds: Vec::new(),
        };

        info!("loading relationships from {}", source.display());
        thread::spawn(move || {
            let result = load_relationships(&source, &load_filter).map_err(|error| {
                error!("{error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(options: &ViewerOptions) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(options),
        }
    }
}

impl eframe::App for ConnectionsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(relationships) => AppState::Ready(Box::new(ViewModel::new(
                            relationships,
                            self.options.clone(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading member relationships...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load member relationships");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.options));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.options.source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(&self.options));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            // Keep the user's current layout choices across the reload.
                            self.options = model.current_options(&self.options.source);
                            model.shutdown();
                            transition = Some(match result {
                                Ok(relationships) => AppState::Ready(Box::new(ViewModel::new(
                                    relationships,
                                    self.options.clone(),
                                ))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            model.shutdown();
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
