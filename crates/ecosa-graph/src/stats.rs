//! Summary statistics for the cooperation graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: parties in the graph.
//! - **edge_count**: agreement edges, parallel agreements counted separately.
//! - **distinct_pair_count**: pairs of parties with at least one agreement.
//! - **density**: `distinct_pair_count / (n * (n - 1) / 2)`. Measured on
//!   distinct pairs so it stays in `[0, 1]` however many agreements a pair
//!   shares. Zero for graphs with 0 or 1 node.
//! - **component_count**: connected components. More than one means some
//!   groups of parties never cooperate with each other.
//! - **isolated_node_count**: parties with no partner (only single-party
//!   agreements).
//! - **max_connections**: highest agreement-edge count on one party.
//! - **max_distinct_degree**: highest number of distinct partners.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::build::AgreementGraph;
use crate::metrics::simple_adjacency;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for an [`AgreementGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub distinct_pair_count: usize,
    /// Share of possible party pairs that cooperate. Zero for `n < 2`.
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_connections: usize,
    pub max_distinct_degree: usize,
}

impl GraphStats {
    /// Compute statistics from an [`AgreementGraph`].
    #[must_use]
    pub fn from_graph(graph: &AgreementGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let adjacency = simple_adjacency(graph);
        let degree_sum: usize = adjacency.iter().map(Vec::len).sum();
        let distinct_pair_count = degree_sum / 2;

        let max_connections = graph
            .graph
            .node_indices()
            .map(|idx| graph.graph.edges(idx).count())
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            distinct_pair_count,
            density: compute_density(node_count, distinct_pair_count),
            component_count: connected_components(&graph.graph),
            isolated_node_count: adjacency.iter().filter(|n| n.is_empty()).count(),
            max_connections,
            max_distinct_degree: adjacency.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Return `true` if no two parties share an agreement.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.distinct_pair_count == 0
    }

    /// Average number of agreements per cooperating pair.
    ///
    /// Returns 0.0 when no pair cooperates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn agreements_per_pair(&self) -> f64 {
        if self.distinct_pair_count == 0 {
            return 0.0_f64;
        }
        self.edge_count as f64 / self.distinct_pair_count as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, pairs: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_pairs = (node_count * (node_count - 1) / 2) as f64;
    pairs as f64 / max_pairs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
