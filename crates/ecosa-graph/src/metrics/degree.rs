//! Degree-based metrics: connection counts and degree centrality.

use std::collections::HashMap;

use crate::build::AgreementGraph;

// ---------------------------------------------------------------------------
// Connection Count
// ---------------------------------------------------------------------------

/// Number of agreement edges incident to each party.
///
/// Two agreements with the same partner count twice: this is the degree of
/// the multigraph.
#[must_use]
pub fn connection_counts(graph: &AgreementGraph) -> HashMap<String, usize> {
    graph
        .graph
        .node_indices()
        .map(|idx| (graph.graph[idx].clone(), graph.graph.edges(idx).count()))
        .collect()
}

// ---------------------------------------------------------------------------
// Degree Centrality
// ---------------------------------------------------------------------------

/// Distinct partners of each party divided by `N - 1`.
///
/// Values lie in `[0, 1]`; a party that has signed with every other party
/// scores exactly 1.0. With a single node there is nobody to connect to and
/// the score is 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &AgreementGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

    graph
        .graph
        .node_indices()
        .map(|idx| {
            let partners = graph.distinct_neighbors(idx).len();
            (graph.graph[idx].clone(), partners as f64 * scale)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
