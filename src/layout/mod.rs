//! Deterministic force-directed layout for citation graphs.
//!
//! Nodes start on a ring around the canvas center, nudged by a jitter derived
//! from their ids, and are relaxed for a fixed number of passes. Every force
//! is scaled by a quadratic ease-out so early passes move nodes far and the
//! final pass moves nothing. Positions are updated directly each pass; there
//! is no velocity state. The result only depends on the graph, the canvas and
//! the config.

mod forces;

use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use log::debug;

use crate::graph::KnowledgeGraph;
use crate::util::stable_pair;

use forces::{Spring, accumulate_center_gravity, accumulate_repulsion, accumulate_springs};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_ready(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub iterations: usize,
    /// Initial ring radius as a fraction of the shorter canvas side.
    pub ring_fraction: f32,
    /// Maximum initial offset per axis.
    pub jitter: f32,
    /// Extra clearance beyond the two radii before repulsion stops.
    pub margin: f32,
    /// Distance kept between a node's rim and the canvas edge.
    pub padding: f32,
    pub local_rest_length: f32,
    pub cross_rest_length: f32,
    pub spring_constant: f32,
    pub repulsion_strength: f32,
    pub center_gravity: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            ring_fraction: 0.28,
            jitter: 10.0,
            margin: 40.0,
            padding: 40.0,
            local_rest_length: 100.0,
            cross_rest_length: 140.0,
            spring_constant: 0.03,
            repulsion_strength: 0.5,
            center_gravity: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutStatus {
    Positioned,
    /// The canvas has no usable size yet; nodes were left unpositioned.
    NotReady,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutReport {
    pub status: LayoutStatus,
    pub nodes: usize,
    pub springs: usize,
    pub skipped_edges: usize,
    pub iterations: usize,
}

/// Quadratic ease-out for pass `iteration` of `iterations`; zero on the last
/// pass.
pub fn decay(iteration: usize, iterations: usize) -> f32 {
    if iterations == 0 {
        return 0.0;
    }
    let progress = (iteration + 1) as f32 / iterations as f32;
    let remaining = (1.0 - progress).max(0.0);
    remaining * remaining
}

/// Canonical starting positions: a ring of radius
/// `ring_fraction * min(width, height)` plus per-id jitter. A single node
/// starts at the center.
pub fn initial_positions(graph: &KnowledgeGraph, canvas: Canvas, config: &LayoutConfig) -> Vec<Vec2> {
    let n = graph.nodes().len();
    let center = canvas.center();
    let ring_radius = if n > 1 {
        canvas.width.min(canvas.height) * config.ring_fraction
    } else {
        0.0
    };

    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let angle = TAU * index as f32 / n as f32;
            let (jx, jy) = stable_pair(&node.id);
            let radial = vec2(angle.cos(), angle.sin()) * ring_radius;
            center + radial + vec2(jx * config.jitter, jy * config.jitter)
        })
        .collect()
}

fn clamp_axis(value: f32, radius: f32, padding: f32, extent: f32) -> f32 {
    let low = radius + padding;
    let high = extent - radius - padding;
    if low <= high {
        value.clamp(low, high)
    } else {
        extent / 2.0
    }
}

/// Keeps a node of `radius` fully inside the canvas, `padding` away from the
/// edges. Axes too small for that are collapsed to their center line.
pub fn clamp_to_canvas(position: Vec2, radius: f32, canvas: Canvas, padding: f32) -> Vec2 {
    vec2(
        clamp_axis(position.x, radius, padding, canvas.width),
        clamp_axis(position.y, radius, padding, canvas.height),
    )
}

/// Positions every node of `graph` on `canvas`.
///
/// Incoming positions are ignored; each run restarts from
/// [`initial_positions`]. An unusable canvas clears all positions.
pub fn force_layout(graph: &mut KnowledgeGraph, canvas: Canvas, config: &LayoutConfig) -> LayoutReport {
    let n = graph.nodes().len();
    let mut report = LayoutReport {
        status: LayoutStatus::Positioned,
        nodes: n,
        springs: 0,
        skipped_edges: 0,
        iterations: 0,
    };

    if n == 0 {
        report.status = LayoutStatus::Empty;
        return report;
    }

    if !canvas.is_ready() {
        for node in graph.nodes_mut() {
            node.position = None;
        }
        report.status = LayoutStatus::NotReady;
        return report;
    }

    let mut positions = initial_positions(graph, canvas, config);
    let radii = graph.nodes().iter().map(|node| node.radius).collect::<Vec<_>>();
    let springs = graph
        .resolved_edges()
        .filter(|(from, to, _)| from != to)
        .map(|(from, to, edge)| Spring {
            from,
            to,
            rest_length: if edge.is_local {
                config.local_rest_length
            } else {
                config.cross_rest_length
            },
        })
        .collect::<Vec<_>>();
    report.springs = springs.len();
    report.skipped_edges = graph.edges().len() - springs.len();

    let center = canvas.center();
    if n > 1 {
        let mut disp = vec![Vec2::ZERO; n];
        for iteration in 0..config.iterations {
            let decay = decay(iteration, config.iterations);
            disp.fill(Vec2::ZERO);

            accumulate_repulsion(
                &positions,
                &radii,
                config.margin,
                config.repulsion_strength * decay,
                &mut disp,
            );
            accumulate_springs(
                &positions,
                &springs,
                config.spring_constant * decay,
                &mut disp,
            );
            accumulate_center_gravity(
                &positions,
                center,
                config.center_gravity * decay,
                &mut disp,
            );

            for (position, displacement) in positions.iter_mut().zip(&disp) {
                *position += *displacement;
            }
        }
        report.iterations = config.iterations;
    }

    for (node, position) in graph.nodes_mut().iter_mut().zip(positions) {
        node.position = Some(clamp_to_canvas(position, node.radius, canvas, config.padding));
    }

    debug!(
        "laid out {} nodes / {} springs for {} on {}x{} ({} edges skipped)",
        report.nodes,
        report.springs,
        graph.focal_entity(),
        canvas.width,
        canvas.height,
        report.skipped_edges
    );
    report
}
