mod app;
mod config;
mod corps;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;

use crate::app::{LayoutStrategy, ViewerOptions};
use crate::config::{LayoutConfig, load_layout_config};
use crate::corps::{RelationKind, RelationshipFilter};

/// Interactive viewer for member relationships of a Corps.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Relationship records as JSON.
    relationships: PathBuf,

    /// JSON file overriding scene, hierarchy and force settings.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LayoutStrategy::Hierarchy)]
    layout: LayoutStrategy,

    /// Keep relationships that are no longer active.
    #[arg(long)]
    include_inactive: bool,

    /// Only show these relationship kinds (repeatable).
    #[arg(long = "kind", value_name = "TAG")]
    kinds: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            info!("using layout config {}", path.display());
            load_layout_config(path)?
        }
        None => LayoutConfig::default(),
    };

    let options = ViewerOptions {
        source: args.relationships,
        config,
        strategy: args.layout,
        filter: RelationshipFilter {
            active_only: !args.include_inactive,
            kinds: args.kinds.iter().map(|tag| RelationKind::parse(tag)).collect(),
        },
    };

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Corps connections",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::ConnectionsApp::new(cc, options)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
