mod force;
mod hierarchy;

use eframe::egui::Vec2;

use crate::config::LayoutConfig;

use super::ConnectionGraph;

pub(in crate::app) use force::step_force;

/// The two interchangeable ways of placing nodes in the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutStrategy {
    /// Breadth-first levels over the designated hierarchy kind, laid out in bands.
    #[default]
    Hierarchy,
    /// Continuous spring/charge simulation with draggable nodes.
    Force,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 2] = [LayoutStrategy::Hierarchy, LayoutStrategy::Force];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hierarchy => "Hierarchy",
            Self::Force => "Force",
        }
    }

    /// Whether positions keep changing after the initial layout.
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Force)
    }

    /// Places every node and returns the resulting positions in node order.
    ///
    /// For [`LayoutStrategy::Force`] this only seeds the starting positions;
    /// the simulation advances through [`step_force`].
    pub(in crate::app) fn compute_layout(
        self,
        graph: &mut ConnectionGraph,
        config: &LayoutConfig,
    ) -> Vec<Vec2> {
        match self {
            Self::Hierarchy => hierarchy::apply_hierarchy_layout(graph, &config.hierarchy, &config.scene),
            Self::Force => force::seed_positions(graph, &config.force, &config.scene),
        }

        graph.nodes.iter().map(|node| node.position).collect()
    }
}
