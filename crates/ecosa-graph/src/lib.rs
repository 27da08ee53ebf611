#![forbid(unsafe_code)]
//! ecosa-graph library.
//!
//! Builds the cooperation graph from agreement records, lays it out, and
//! annotates every party with a connection count or centrality score.
//!
//! # Conventions
//!
//! - **Errors**: [`ecosa_core::Result`] at the public surface; layout
//!   routines return `anyhow::Result` and are wrapped into
//!   [`ecosa_core::Error::LayoutFailure`] by [`annotate()`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod annotate;
pub mod build;
pub mod label;
pub mod layout;
pub mod metrics;
pub mod stats;

pub use annotate::{
    AnnotateOptions, AnnotatedEdge, AnnotatedGraph, AnnotatedNode, EdgeSegment, annotate,
};
pub use build::{
    AgreementEdge, AgreementGraph, BuildSummary, EdgeAttributes, GraphBuilder, build_graph,
};
pub use label::{node_label, parse_node_label};
pub use layout::{LayoutStrategy, Point, Positions};
pub use metrics::{MetricValue, metric_values};
pub use stats::GraphStats;
