//! `ecosa stats`: graph summary for the current selection.

use std::io::Write;

use clap::Args;
use ecosa_core::config::EcosaConfig;
use ecosa_graph::{BuildSummary, GraphBuilder, GraphStats};
use serde::Serialize;
use tracing::warn;

use super::{FilterArgs, InputArgs, load_records};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `ecosa stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Report payload for `ecosa stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub records: usize,
    pub skipped_partyless: usize,
    pub content_hash: String,
    /// Mean agreements behind each cooperating pair.
    pub agreements_per_pair: f64,
    #[serde(flatten)]
    pub graph: GraphStats,
}

impl StatsReport {
    fn new(summary: &BuildSummary, graph: GraphStats, content_hash: String) -> Self {
        Self {
            records: summary.records,
            skipped_partyless: summary.skipped_partyless,
            content_hash,
            agreements_per_pair: graph.agreements_per_pair(),
            graph,
        }
    }
}

/// Execute `ecosa stats`.
pub fn run_stats(args: &StatsArgs, config: &EcosaConfig, output: OutputMode) -> anyhow::Result<()> {
    let records = load_records(&args.input, &args.filter, config)?;
    let (graph, summary) = GraphBuilder::new(&records).build_with_summary();
    let report = StatsReport::new(
        &summary,
        GraphStats::from_graph(&graph),
        graph.content_hash.clone(),
    );
    if report.graph.is_empty() {
        warn!(
            parties = report.graph.node_count,
            "no two parties in the selection share an agreement"
        );
    }

    render_mode(output, &report, render_text, render_pretty)
}

fn rows(report: &StatsReport) -> [(&'static str, String); 11] {
    let g = &report.graph;
    [
        ("records", report.records.to_string()),
        ("skipped (no parties)", report.skipped_partyless.to_string()),
        ("parties", g.node_count.to_string()),
        ("agreement edges", g.edge_count.to_string()),
        ("cooperating pairs", g.distinct_pair_count.to_string()),
        ("agreements per pair", format!("{:.2}", report.agreements_per_pair)),
        ("density", format!("{:.4}", g.density)),
        ("components", g.component_count.to_string()),
        ("isolated parties", g.isolated_node_count.to_string()),
        ("max connections", g.max_connections.to_string()),
        ("max partners", g.max_distinct_degree.to_string()),
    ]
}

fn render_text(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    for (key, value) in rows(report) {
        writeln!(w, "{key}\t{value}")?;
    }
    Ok(())
}

fn render_pretty(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph statistics")?;
    for (key, value) in rows(report) {
        pretty_kv(w, key, value)?;
    }
    pretty_kv(w, "content hash", &report.content_hash)
}
