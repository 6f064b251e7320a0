use eframe::egui::{Vec2, vec2};

use crate::config::{ForceConfig, SceneConfig};
use crate::util::stable_pair;

use super::super::{ConnectionGraph, NodeControl};

const MIN_DISTANCE: f32 = 1.0;

fn fallback_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Unit direction from `b` towards `a` and their distance, floored at
/// [`MIN_DISTANCE`] so coincident nodes never divide by zero.
fn separation(delta: Vec2, a: usize, b: usize) -> (Vec2, f32) {
    let distance = delta.length();
    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        fallback_direction(a, b)
    };
    (direction, distance.max(MIN_DISTANCE))
}

fn clamp_to_scene(position: Vec2, padding: f32, scene: &SceneConfig) -> Vec2 {
    let max_x = (scene.width - padding).max(padding);
    let max_y = (scene.height - padding).max(padding);
    vec2(
        position.x.clamp(padding, max_x),
        position.y.clamp(padding, max_y),
    )
}

pub(super) fn seed_positions(graph: &mut ConnectionGraph, config: &ForceConfig, scene: &SceneConfig) {
    let (center_x, center_y) = scene.center();
    let center = vec2(center_x, center_y);

    for node in &mut graph.nodes {
        let (jx, jy) = stable_pair(&node.member.id);
        node.position = clamp_to_scene(
            center + vec2(jx, jy) * config.initial_spread,
            config.padding,
            scene,
        );
        node.velocity = Vec2::ZERO;
        node.control = NodeControl::SimulationControlled;
    }
}

/// Advances the simulation by one tick and reports whether anything moved.
///
/// User-controlled nodes still push and pull on their neighbours but are
/// never moved here.
pub(in crate::app) fn step_force(
    graph: &mut ConnectionGraph,
    config: &ForceConfig,
    scene: &SceneConfig,
) -> bool {
    let node_count = graph.nodes.len();
    if node_count == 0 {
        return false;
    }

    let (center_x, center_y) = scene.center();
    let center = vec2(center_x, center_y);
    let simulated = graph
        .nodes
        .iter()
        .map(|node| node.control == NodeControl::SimulationControlled)
        .collect::<Vec<_>>();

    for (index, node) in graph.nodes.iter_mut().enumerate() {
        if !simulated[index] {
            continue;
        }
        node.velocity *= config.damping;
        node.velocity += (center - node.position) * config.center;
    }

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if !simulated[i] && !simulated[j] {
                continue;
            }

            let delta = graph.nodes[i].position - graph.nodes[j].position;
            let (direction, distance) = separation(delta, i, j);
            let push = direction * (-config.charge / (distance * distance));

            if simulated[i] {
                graph.nodes[i].velocity += push;
            }
            if simulated[j] {
                graph.nodes[j].velocity -= push;
            }
        }
    }

    for edge in &graph.edges {
        let (from, to) = (edge.source, edge.target);
        if from == to || from >= node_count || to >= node_count {
            continue;
        }

        let delta = graph.nodes[to].position - graph.nodes[from].position;
        let (direction, distance) = separation(delta, to, from);
        let pull = direction * ((distance - config.rest_length) * config.spring);

        if simulated[from] {
            graph.nodes[from].velocity += pull;
        }
        if simulated[to] {
            graph.nodes[to].velocity -= pull;
        }
    }

    let mut any_motion = false;
    for (index, node) in graph.nodes.iter_mut().enumerate() {
        if !simulated[index] {
            continue;
        }
        let previous = node.position;
        node.position = clamp_to_scene(
            node.position + node.velocity * config.step_scale,
            config.padding,
            scene,
        );
        if (node.position - previous).length_sq() > 0.000_001 {
            any_motion = true;
        }
    }

    any_motion
}
