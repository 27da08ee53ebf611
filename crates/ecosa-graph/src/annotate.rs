//! Positioned, metric-annotated graphs ready for a node-link renderer.
//!
//! # Overview
//!
//! [`annotate`] runs one layout and one metric over an [`AgreementGraph`]
//! and returns an [`AnnotatedGraph`]: every node with its position, metric
//! value and hover label, plus every agreement edge with its attributes.
//!
//! The layout is called exactly once. It receives the configured seed only
//! when it declares [`LayoutStrategy::supports_seed`]; a layout that leaves
//! a node unplaced, or places it at a non-finite coordinate, fails the whole
//! call with [`Error::LayoutFailure`]. There is no fallback layout.
//!
//! The metric map is computed once for the whole graph and looked up per
//! node. Nothing is cached between calls.

use ecosa_core::config::DEFAULT_LAYOUT_SEED;
use ecosa_core::{Error, MetricKind, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::build::{AgreementEdge, AgreementGraph};
use crate::label::node_label;
use crate::layout::{LayoutStrategy, Point};
use crate::metrics::{MetricValue, metric_values};

/// Knobs for a single [`annotate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Seed handed to seed-aware layouts.
    pub seed: u64,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_LAYOUT_SEED,
        }
    }
}

/// A party with its position, metric value and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedNode {
    pub name: String,
    pub position: Point,
    pub value: MetricValue,
    pub label: String,
}

/// An agreement edge as emitted with the annotated graph.
pub type AnnotatedEdge = AgreementEdge;

/// A straight edge between two positioned parties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub from: Point,
    pub to: Point,
}

/// Output of [`annotate`].
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedGraph {
    pub metric: MetricKind,
    pub layout: String,
    /// Seed actually passed to the layout; `None` for seedless layouts.
    pub seed: Option<u64>,
    pub content_hash: String,
    /// Nodes in graph order.
    pub nodes: Vec<AnnotatedNode>,
    pub edges: Vec<AnnotatedEdge>,
}

impl AnnotatedGraph {
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&AnnotatedNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// One line segment per agreement edge, in edge order.
    #[must_use]
    pub fn edge_segments(&self) -> Vec<EdgeSegment> {
        self.edges
            .iter()
            .filter_map(|edge| {
                Some(EdgeSegment {
                    from: self.node(&edge.source)?.position,
                    to: self.node(&edge.target)?.position,
                })
            })
            .collect()
    }
}

/// Lay out `graph`, compute `metric` for every party and label each node.
///
/// # Errors
///
/// - [`Error::MetricUndefined`] when the graph has no parties at all, or a
///   centrality metric is requested on a graph with fewer than two.
/// - [`Error::LayoutFailure`] when the layout errors, misses a node, or
///   returns a non-finite coordinate.
#[instrument(skip(graph, layout), fields(layout = layout.name(), nodes = graph.node_count()))]
pub fn annotate(
    graph: &AgreementGraph,
    metric: MetricKind,
    layout: &dyn LayoutStrategy,
    options: &AnnotateOptions,
) -> Result<AnnotatedGraph> {
    let required = if metric.is_centrality() { 2 } else { 1 };
    if graph.node_count() < required {
        return Err(Error::MetricUndefined {
            metric,
            node_count: graph.node_count(),
        });
    }

    let seed = layout.supports_seed().then_some(options.seed);
    let layout_failure = |reason: String| Error::LayoutFailure {
        layout: layout.name().to_string(),
        reason,
    };

    let positions = layout
        .embed(graph, seed)
        .map_err(|err| layout_failure(format!("{err:#}")))?;

    let values = metric_values(graph, metric);

    let mut nodes = Vec::with_capacity(graph.node_count());
    for name in graph.parties() {
        let position = *positions
            .get(name)
            .ok_or_else(|| layout_failure(format!("no position for {name:?}")))?;
        if !position.is_finite() {
            return Err(layout_failure(format!(
                "non-finite position ({}, {}) for {name:?}",
                position.x, position.y
            )));
        }
        let value = values
            .get(name)
            .copied()
            .unwrap_or(MetricValue::Count(0));
        nodes.push(AnnotatedNode {
            name: name.to_string(),
            position,
            value,
            label: node_label(name, metric, value),
        });
    }

    debug!(nodes = nodes.len(), ?seed, "graph annotated");

    Ok(AnnotatedGraph {
        metric,
        layout: layout.name().to_string(),
        seed,
        content_hash: graph.content_hash.clone(),
        nodes,
        edges: graph.agreement_edges(),
    })
}
