//! Deterministic, seedless layouts: circle, concentric shells, spiral.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use super::{LayoutStrategy, Point, Positions, positions_from, rescale};
use crate::build::AgreementGraph;

/// Parties evenly spaced on a circle in node order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularLayout;

impl LayoutStrategy for CircularLayout {
    fn name(&self) -> &str {
        "circular"
    }

    fn supports_seed(&self) -> bool {
        false
    }

    fn embed(&self, graph: &AgreementGraph, _seed: Option<u64>) -> anyhow::Result<Positions> {
        let mut points = ring(graph.node_count(), 1.0);
        rescale(&mut points);
        Ok(positions_from(graph, points))
    }
}

/// Concentric rings grouped by number of distinct partners.
///
/// The best-connected parties sit on the innermost ring; a lone party with
/// the top degree is placed at the center.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLayout;

impl LayoutStrategy for ShellLayout {
    fn name(&self) -> &str {
        "shell"
    }

    fn supports_seed(&self) -> bool {
        false
    }

    fn embed(&self, graph: &AgreementGraph, _seed: Option<u64>) -> anyhow::Result<Positions> {
        let mut shells: BTreeMap<std::cmp::Reverse<usize>, Vec<usize>> = BTreeMap::new();
        for idx in graph.graph.node_indices() {
            let degree = graph.distinct_neighbors(idx).len();
            shells
                .entry(std::cmp::Reverse(degree))
                .or_default()
                .push(idx.index());
        }

        let mut points = vec![Point::default(); graph.node_count()];
        let center_single = shells.values().next().is_some_and(|s| s.len() == 1);

        for (ring_no, members) in shells.values().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let radius = if center_single {
                ring_no as f64
            } else {
                (ring_no + 1) as f64
            };
            for (&node, point) in members.iter().zip(ring(members.len(), radius)) {
                points[node] = point;
            }
        }

        rescale(&mut points);
        Ok(positions_from(graph, points))
    }
}

/// Parties placed along an Archimedean spiral in node order.
#[derive(Debug, Clone, Copy)]
pub struct SpiralLayout {
    /// Radians turned per node; smaller values give a tighter spiral.
    pub resolution: f64,
}

impl Default for SpiralLayout {
    fn default() -> Self {
        Self { resolution: 0.35 }
    }
}

impl LayoutStrategy for SpiralLayout {
    fn name(&self) -> &str {
        "spiral"
    }

    fn supports_seed(&self) -> bool {
        false
    }

    fn embed(&self, graph: &AgreementGraph, _seed: Option<u64>) -> anyhow::Result<Positions> {
        #[allow(clippy::cast_precision_loss)]
        let mut points: Vec<Point> = (0..graph.node_count())
            .map(|i| {
                let dist = i as f64;
                let angle = self.resolution * dist;
                Point::new(angle.cos() * dist, angle.sin() * dist)
            })
            .collect();
        rescale(&mut points);
        Ok(positions_from(graph, points))
    }
}

#[allow(clippy::cast_precision_loss)]
fn ring(count: usize, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
