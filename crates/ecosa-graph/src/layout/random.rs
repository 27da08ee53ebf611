use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{LayoutStrategy, Point, Positions, positions_from, rescale};
use crate::build::AgreementGraph;

/// Uniformly scattered positions. Reproducible when seeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomLayout;

impl LayoutStrategy for RandomLayout {
    fn name(&self) -> &str {
        "random"
    }

    fn supports_seed(&self) -> bool {
        true
    }

    fn embed(&self, graph: &AgreementGraph, seed: Option<u64>) -> anyhow::Result<Positions> {
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut points = scatter(&mut rng, graph.node_count());
        rescale(&mut points);
        Ok(positions_from(graph, points))
    }
}

/// `count` points drawn uniformly from the unit square.
pub(crate) fn scatter(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::graph;

    #[test]
    fn same_seed_same_positions() {
        let g = graph(&[&["A", "B", "C"], &["C", "D"]]);
        let first = RandomLayout.embed(&g, Some(1997)).expect("embed");
        let second = RandomLayout.embed(&g, Some(1997)).expect("embed");
        assert_eq!(first, second);
    }

    #[test]
    fn different_seed_moves_nodes() {
        let g = graph(&[&["A", "B", "C"], &["C", "D"]]);
        let first = RandomLayout.embed(&g, Some(1)).expect("embed");
        let second = RandomLayout.embed(&g, Some(2)).expect("embed");
        assert_ne!(first, second);
    }
}
