//! `ecosa graph`: build, lay out and annotate the cooperation graph.

use std::io::Write;

use anyhow::Context as _;
use clap::Args;
use ecosa_core::config::EcosaConfig;
use ecosa_core::{LayoutKind, MetricKind};
use ecosa_graph::layout::strategy;
use ecosa_graph::{AnnotateOptions, AnnotatedGraph, GraphBuilder, annotate};

use super::{FilterArgs, InputArgs, load_records};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `ecosa graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Node metric: connections, degree or betweenness.
    #[arg(long)]
    pub metric: Option<MetricKind>,

    /// Layout: spring, circular, shell, spiral or random.
    #[arg(long)]
    pub layout: Option<LayoutKind>,

    /// Seed for seedable layouts (spring, random).
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GraphArgs {
    fn options(&self, config: &EcosaConfig) -> (MetricKind, LayoutKind, AnnotateOptions) {
        (
            self.metric.unwrap_or(config.metric.default),
            self.layout.unwrap_or(config.layout.kind),
            AnnotateOptions {
                seed: self.seed.unwrap_or(config.layout.seed),
            },
        )
    }
}

/// Execute `ecosa graph`.
pub fn run_graph(args: &GraphArgs, config: &EcosaConfig, output: OutputMode) -> anyhow::Result<()> {
    let records = load_records(&args.input, &args.filter, config)?;
    let (metric, layout_kind, options) = args.options(config);

    let graph = GraphBuilder::new(&records).build();
    let layout = strategy(layout_kind, &config.layout);
    let annotated = annotate(&graph, metric, layout.as_ref(), &options)
        .with_context(|| format!("annotating graph with {metric}"))?;

    render_mode(output, &annotated, render_text, render_pretty)
}

fn render_text(graph: &AnnotatedGraph, w: &mut dyn Write) -> std::io::Result<()> {
    for node in &graph.nodes {
        writeln!(
            w,
            "{}\t{}\t{:.4}\t{:.4}",
            node.name, node.value, node.position.x, node.position.y
        )?;
    }
    Ok(())
}

fn render_pretty(graph: &AnnotatedGraph, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Cooperation graph")?;
    pretty_kv(w, "metric", graph.metric.to_string())?;
    pretty_kv(w, "layout", &graph.layout)?;
    pretty_kv(
        w,
        "seed",
        graph
            .seed
            .map_or_else(|| "n/a".to_string(), |seed| seed.to_string()),
    )?;
    pretty_kv(w, "parties", graph.nodes.len().to_string())?;
    pretty_kv(w, "agreement edges", graph.edges.len().to_string())?;
    writeln!(w)?;

    let mut nodes: Vec<_> = graph.nodes.iter().collect();
    nodes.sort_by(|a, b| {
        b.value
            .as_f64()
            .total_cmp(&a.value.as_f64())
            .then_with(|| a.name.cmp(&b.name))
    });
    for node in nodes {
        writeln!(
            w,
            "  {:<48} ({:>7.3}, {:>7.3})",
            node.label, node.position.x, node.position.y
        )?;
    }
    Ok(())
}
