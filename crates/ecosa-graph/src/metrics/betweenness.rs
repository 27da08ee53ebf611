//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a party lies on shortest paths
//! between two other parties. High-betweenness parties are brokers: removing
//! them would lengthen or cut the paths between otherwise separate blocs.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E) for unweighted graphs.
//!
//! The graph is undirected, so every unordered pair `{s, t}` is visited from
//! both ends; the raw sums are halved. BFS runs over distinct neighbours, so
//! two agreements between the same parties do not double the path count.
//!
//! # Output
//!
//! [`betweenness_centrality`] normalizes by the number of pairs that could
//! route through a node, `(n-1)(n-2)/2`, giving values in `[0, 1]`.
//! [`betweenness_centrality_raw`] returns the pair counts themselves.

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::build::AgreementGraph;
use crate::metrics::simple_adjacency;

/// Unnormalized betweenness: the number of `{s, t}` pairs routed through each
/// node, with ties split evenly between equal-length paths.
///
/// Disconnected nodes and nodes with no shortest paths through them receive
/// a score of 0.0.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn betweenness_centrality_raw(graph: &AgreementGraph) -> HashMap<String, f64> {
    let adjacency = simple_adjacency(graph);
    let n = adjacency.len();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    // Buffers reused across sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        queue.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.fill(0.0);
        dist.fill(-1);
        delta.fill(0.0);
        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in &adjacency[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    graph
        .graph
        .node_indices()
        .map(|idx| (graph.graph[idx].clone(), cb[idx.index()] / 2.0))
        .collect()
}

/// Betweenness normalized to `[0, 1]` by `(n-1)(n-2)/2`.
///
/// Graphs with two or fewer nodes have no intermediaries; every node scores
/// 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(graph: &AgreementGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let raw = betweenness_centrality_raw(graph);

    if n <= 2 {
        return raw.into_keys().map(|name| (name, 0.0)).collect();
    }

    let pairs = ((n - 1) * (n - 2)) as f64 / 2.0;
    raw.into_iter()
        .map(|(name, score)| (name, score / pairs))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
