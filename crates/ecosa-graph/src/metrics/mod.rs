//! Per-party metrics for the cooperation graph.
//!
//! # Overview
//!
//! - **Connection count** (`degree::connection_counts`): how many agreement
//!   edges touch a party. Parallel agreements with the same partner each
//!   count.
//! - **Degree centrality** (`degree::degree_centrality`): distinct partners
//!   divided by `N - 1`, always in `[0, 1]`.
//! - **Betweenness centrality** (`betweenness`): share of shortest paths
//!   between other parties that pass through a party.
//!
//! Every function computes the whole map in one pass. Callers look values up
//! per node; nothing here is meant to be called once per node.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ecosa_core::MetricKind;
//! use ecosa_graph::metrics::metric_values;
//!
//! let graph = ecosa_graph::build_graph(&records);
//! let values = metric_values(&graph, MetricKind::BetweennessCentrality);
//! println!("{}", values["France"]);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use ecosa_core::MetricKind;
use serde::Serialize;

use crate::build::AgreementGraph;

pub mod betweenness;
pub mod degree;

/// A metric value: an integer count or a fractional score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    Score(f64),
}

impl MetricValue {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Count(n) => n as f64,
            Self::Score(v) => v,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Score(v) => write!(f, "{v:.4}"),
        }
    }
}

/// Compute `kind` for every party, keyed by display name.
#[must_use]
pub fn metric_values(graph: &AgreementGraph, kind: MetricKind) -> HashMap<String, MetricValue> {
    match kind {
        MetricKind::ConnectionCount => degree::connection_counts(graph)
            .into_iter()
            .map(|(name, n)| (name, MetricValue::Count(n)))
            .collect(),
        MetricKind::DegreeCentrality => degree::degree_centrality(graph)
            .into_iter()
            .map(|(name, v)| (name, MetricValue::Score(v)))
            .collect(),
        MetricKind::BetweennessCentrality => betweenness::betweenness_centrality(graph)
            .into_iter()
            .map(|(name, v)| (name, MetricValue::Score(v)))
            .collect(),
    }
}

/// Distinct-neighbour adjacency lists indexed by node position.
///
/// Parallel agreement edges collapse to a single neighbour entry. Lists are
/// sorted so traversal order is deterministic.
pub(crate) fn simple_adjacency(graph: &AgreementGraph) -> Vec<Vec<usize>> {
    graph
        .graph
        .node_indices()
        .map(|idx| {
            graph
                .graph
                .neighbors(idx)
                .map(|n| n.index())
                .filter(|&n| n != idx.index())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_counts_and_scores() {
        assert_eq!(MetricValue::Count(4).to_string(), "4");
        assert_eq!(MetricValue::Score(1.0 / 3.0).to_string(), "0.3333");
        assert!((MetricValue::Count(2).as_f64() - 2.0).abs() < f64::EPSILON);
    }
}
