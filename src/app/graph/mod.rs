mod build;
mod interaction;
mod render_state;
mod view;

pub(in crate::app) use build::build_graph;
pub(in crate::app) use interaction::{GraphEvent, Interaction, node_at};
