//! Force-directed layout (Fruchterman-Reingold).
//!
//! Every pair of parties repels with force `k² / d`; partners attract with
//! force `d² / k`, where `k = sqrt(1 / n)` is the ideal edge length. Each
//! iteration moves a node along its net force by at most the current
//! temperature, which cools linearly to zero. Partners are counted once no
//! matter how many agreements they share.
//!
//! Initial positions come from the seeded RNG, so a fixed seed reproduces
//! the same embedding.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::random::scatter;
use super::{LayoutStrategy, Point, Positions, positions_from, rescale};
use crate::build::AgreementGraph;
use crate::metrics::simple_adjacency;

const MIN_DISTANCE: f64 = 0.01;
const INITIAL_TEMPERATURE: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct SpringLayout {
    pub iterations: usize,
}

impl SpringLayout {
    #[must_use]
    pub const fn new(iterations: usize) -> Self {
        Self { iterations }
    }
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::new(50)
    }
}

impl LayoutStrategy for SpringLayout {
    fn name(&self) -> &str {
        "spring"
    }

    fn supports_seed(&self) -> bool {
        true
    }

    fn embed(&self, graph: &AgreementGraph, seed: Option<u64>) -> anyhow::Result<Positions> {
        let n = graph.node_count();
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut pos = scatter(&mut rng, n);

        if n > 1 {
            let adjacency = simple_adjacency(graph);
            self.relax(&mut pos, &adjacency);
        }

        rescale(&mut pos);
        Ok(positions_from(graph, pos))
    }
}

impl SpringLayout {
    #[allow(clippy::cast_precision_loss)]
    fn relax(&self, pos: &mut [Point], adjacency: &[Vec<usize>]) {
        let n = pos.len();
        let k = (1.0 / n as f64).sqrt();
        let mut temperature = INITIAL_TEMPERATURE;
        let cooling = INITIAL_TEMPERATURE / (self.iterations as f64 + 1.0);
        let mut displacement = vec![Point::default(); n];

        for _ in 0..self.iterations {
            displacement.fill(Point::default());

            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = pos[i].x - pos[j].x;
                    let dy = pos[i].y - pos[j].y;
                    let d = dx.hypot(dy).max(MIN_DISTANCE);
                    let adjacent = adjacency[i].binary_search(&j).is_ok();
                    // Positive pushes i and j apart.
                    let mut force = k * k / (d * d);
                    if adjacent {
                        force -= d / k;
                    }
                    let (fx, fy) = (dx * force, dy * force);
                    displacement[i].x += fx;
                    displacement[i].y += fy;
                    displacement[j].x -= fx;
                    displacement[j].y -= fy;
                }
            }

            for (p, disp) in pos.iter_mut().zip(&displacement) {
                let length = disp.x.hypot(disp.y);
                if length > 0.0 {
                    let step = length.min(temperature) / length;
                    p.x += disp.x * step;
                    p.y += disp.y * step;
                }
            }

            temperature -= cooling;
        }
    }
}
