//! Graph construction from agreement records.
//!
//! # Overview
//!
//! Every party becomes a node and every agreement becomes one undirected
//! edge per pair of its co-signing parties. The result is a petgraph
//! [`UnGraph`] whose edges carry the agreement's [`EdgeAttributes`].
//!
//! ## Parallel Edges
//!
//! Two agreements between the same pair of parties produce **two** edges.
//! The graph keeps one edge per agreement, not one per pair, so no
//! agreement's metadata is dropped. Metrics that should not be inflated by
//! repeated agreements (degree centrality, betweenness) work on distinct
//! neighbours instead; see [`crate::metrics`].
//!
//! ## Node Identity
//!
//! Party names are compared by their normalized key (trimmed, whitespace
//! collapsed, case-folded). The node label is the first spelling seen.
//!
//! ## Cache Invalidation
//!
//! [`AgreementGraph::content_hash`] is a BLAKE3 hash of the sorted node keys
//! and edge bundles. It does not depend on record order, so callers can use
//! it to skip re-rendering an unchanged graph.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use ecosa_core::party;
use ecosa_core::record::{AgreementRecord, Membership};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use tracing::{debug, instrument, warn};

// ---------------------------------------------------------------------------
// Edge payload
// ---------------------------------------------------------------------------

/// Agreement metadata attached to every edge the agreement produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeAttributes {
    pub title: String,
    /// ISO 8601 date, `YYYY-MM-DD`.
    pub date: String,
    pub sector: Vec<String>,
    pub policy_domain: Vec<String>,
    pub form_of_cooperation: String,
    pub quotes: Option<String>,
    pub military_alliance: Membership,
    pub free_trade_agreement: Membership,
}

impl From<&AgreementRecord> for EdgeAttributes {
    fn from(record: &AgreementRecord) -> Self {
        Self {
            title: record.title.clone(),
            date: record.iso_date(),
            sector: record.sector.clone(),
            policy_domain: record.policy_domain.clone(),
            form_of_cooperation: record.form_of_cooperation.clone(),
            quotes: record.quotes.clone(),
            military_alliance: record.military_alliance.clone(),
            free_trade_agreement: record.free_trade_agreement.clone(),
        }
    }
}

/// One `(party, other party, attributes)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementEdge {
    pub source: String,
    pub target: String,
    pub attributes: EdgeAttributes,
}

// ---------------------------------------------------------------------------
// AgreementGraph
// ---------------------------------------------------------------------------

/// An undirected cooperation graph.
///
/// Nodes are party display names; edges are agreements. Built once per
/// filtered record set and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AgreementGraph {
    /// Undirected multigraph: nodes = party names, edges = agreements.
    pub graph: UnGraph<String, EdgeAttributes>,
    /// Mapping from normalized party key to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of nodes and edges, independent of input order.
    pub content_hash: String,
}

impl AgreementGraph {
    /// Return the number of nodes (parties) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (agreement pairs) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a party, ignoring case and spacing.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(&party::key(name)).copied()
    }

    /// Return the display name for a node.
    #[must_use]
    pub fn party(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Party names in node-index order (the stable rendering order).
    pub fn parties(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All edges as owned triples, in insertion order.
    #[must_use]
    pub fn agreement_edges(&self) -> Vec<AgreementEdge> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                Some(AgreementEdge {
                    source: self.graph[a].clone(),
                    target: self.graph[b].clone(),
                    attributes: self.graph[e].clone(),
                })
            })
            .collect()
    }

    /// The distinct parties adjacent to `idx`, ignoring edge multiplicity.
    #[must_use]
    pub fn distinct_neighbors(&self, idx: NodeIndex) -> HashSet<NodeIndex> {
        self.graph.neighbors(idx).collect()
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Counts reported by [`GraphBuilder::build_with_summary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub records: usize,
    /// Records skipped because their party list was empty.
    pub skipped_partyless: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Turns a filtered record table into an [`AgreementGraph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    records: &'a [AgreementRecord],
}

impl<'a> GraphBuilder<'a> {
    #[must_use]
    pub const fn new(records: &'a [AgreementRecord]) -> Self {
        Self { records }
    }

    /// Unique party names in first-seen order.
    #[must_use]
    pub fn nodes(&self) -> Vec<String> {
        self.canonical_names().0
    }

    /// One edge per pair of distinct parties per agreement.
    ///
    /// For a record with `k` distinct parties this yields `k * (k - 1) / 2`
    /// edges: pairs are taken as `(p[i], p[j])` with `i < j`, so neither
    /// self-pairs nor reversed duplicates are produced.
    #[must_use]
    pub fn edges(&self) -> Vec<AgreementEdge> {
        let (_, canonical) = self.canonical_names();
        let mut edges = Vec::new();

        for record in self.with_parties() {
            let attributes = EdgeAttributes::from(record);
            let names = record_parties(record, &canonical);

            for (i, party) in names.iter().enumerate() {
                for other in &names[i + 1..] {
                    edges.push(AgreementEdge {
                        source: (*party).to_string(),
                        target: (*other).to_string(),
                        attributes: attributes.clone(),
                    });
                }
            }
        }

        edges
    }

    /// Build the graph.
    #[must_use]
    pub fn build(&self) -> AgreementGraph {
        self.build_with_summary().0
    }

    /// Build the graph and report what went into it.
    ///
    /// Records with no parties are skipped and logged at `warn`; they are
    /// an anomaly in the data, not an error.
    #[must_use]
    #[instrument(skip(self), fields(records = self.records.len()))]
    pub fn build_with_summary(&self) -> (AgreementGraph, BuildSummary) {
        let skipped_partyless = self
            .records
            .iter()
            .filter(|record| !record.has_parties())
            .inspect(|record| {
                warn!(row = record.row, title = %record.title, "agreement has no parties; skipped");
            })
            .count();

        let nodes = self.nodes();
        let edges = self.edges();

        let mut graph = UnGraph::<String, EdgeAttributes>::with_capacity(nodes.len(), edges.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for name in nodes {
            let key = party::key(&name);
            let idx = graph.add_node(name);
            node_map.insert(key, idx);
        }

        let content_hash = compute_content_hash(&node_map, &edges);

        for edge in edges {
            // Both endpoints were registered from the same canonical names.
            let (Some(&a), Some(&b)) = (
                node_map.get(&party::key(&edge.source)),
                node_map.get(&party::key(&edge.target)),
            ) else {
                continue;
            };
            graph.add_edge(a, b, edge.attributes);
        }

        let summary = BuildSummary {
            records: self.records.len(),
            skipped_partyless,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        };
        debug!(
            nodes = summary.nodes,
            edges = summary.edges,
            skipped = summary.skipped_partyless,
            "agreement graph built"
        );

        (
            AgreementGraph {
                graph,
                node_map,
                content_hash,
            },
            summary,
        )
    }

    fn with_parties(&self) -> impl Iterator<Item = &'a AgreementRecord> {
        self.records.iter().filter(|record| record.has_parties())
    }

    /// Display names in first-seen order plus a key → display name map.
    fn canonical_names(&self) -> (Vec<String>, HashMap<String, String>) {
        let mut order = Vec::new();
        let mut canonical: HashMap<String, String> = HashMap::new();

        for record in self.with_parties() {
            for name in &record.parties {
                let cleaned = party::clean(name);
                if cleaned.is_empty() {
                    continue;
                }
                canonical
                    .entry(cleaned.to_lowercase())
                    .or_insert_with(|| {
                        order.push(cleaned.clone());
                        cleaned
                    });
            }
        }

        (order, canonical)
    }
}

/// Build a fresh graph from `records`.
#[must_use]
pub fn build_graph(records: &[AgreementRecord]) -> AgreementGraph {
    GraphBuilder::new(records).build()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// A record's distinct parties mapped to their canonical display names.
fn record_parties<'c>(
    record: &AgreementRecord,
    canonical: &'c HashMap<String, String>,
) -> Vec<&'c str> {
    let mut seen = HashSet::new();
    record
        .parties
        .iter()
        .filter_map(|name| canonical.get(&party::key(name)))
        .filter(|name| seen.insert(name.as_str()))
        .map(String::as_str)
        .collect()
}

/// BLAKE3 over sorted node keys and sorted edge lines.
fn compute_content_hash(node_map: &HashMap<String, NodeIndex>, edges: &[AgreementEdge]) -> String {
    let mut keys: Vec<&str> = node_map.keys().map(String::as_str).collect();
    keys.sort_unstable();

    let mut lines: Vec<String> = edges.iter().map(edge_line).collect();
    lines.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for key in keys {
        hasher.update(key.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for line in lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

/// Endpoint keys in sorted order, then every attribute field.
///
/// Fields are split by `\x1e` and list entries by `\x1f`, so moving text
/// between fields or entries changes the line.
fn edge_line(edge: &AgreementEdge) -> String {
    let (a, b) = {
        let (a, b) = (party::key(&edge.source), party::key(&edge.target));
        if a <= b { (a, b) } else { (b, a) }
    };
    let attrs = &edge.attributes;
    let quotes = attrs
        .quotes
        .as_deref()
        .map_or_else(|| "\x15".to_string(), |q| format!("\x06{q}"));
    [
        a,
        b,
        attrs.title.clone(),
        attrs.date.clone(),
        attrs.sector.join("\x1f"),
        attrs.policy_domain.join("\x1f"),
        attrs.form_of_cooperation.clone(),
        quotes,
        attrs.military_alliance.to_string(),
        attrs.free_trade_agreement.to_string(),
    ]
    .join("\x1e")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(row: usize, title: &str, parties: &[&str]) -> AgreementRecord {
        AgreementRecord {
            row,
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2010, 4, 1).expect("valid date"),
            parties: parties.iter().map(ToString::to_string).collect(),
            sector: vec!["Defence".to_string()],
            policy_domain: vec!["Security".to_string()],
            form_of_cooperation: "Treaty".to_string(),
            quotes: None,
            military_alliance: Membership::Yes,
            free_trade_agreement: Membership::No,
            corpus: None,
        }
    }

    #[test]
    fn empty_table_produces_empty_graph() {
        let graph = build_graph(&[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn two_records_keep_one_edge_per_agreement() {
        let records = vec![
            record(0, "first", &["A", "B", "C"]),
            record(1, "second", &["B", "C"]),
        ];
        let builder = GraphBuilder::new(&records);
        assert_eq!(builder.nodes(), ["A", "B", "C"]);

        let edges = builder.edges();
        let pairs: Vec<(&str, &str, &str)> = edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.attributes.title.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("A", "B", "first"),
                ("A", "C", "first"),
                ("B", "C", "first"),
                ("B", "C", "second"),
            ]
        );

        let graph = builder.build();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn partyless_records_are_skipped() {
        let records = vec![record(0, "empty", &[]), record(1, "pair", &["A", "B"])];
        let (graph, summary) = GraphBuilder::new(&records).build_with_summary();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped_partyless, 1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn single_party_record_adds_node_without_edges() {
        let records = vec![record(0, "solo", &["Iceland"])];
        let graph = build_graph(&records);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn spelling_variants_collapse_to_first_seen() {
        let records = vec![
            record(0, "one", &["United  Kingdom", "France"]),
            record(1, "two", &["united kingdom", "FRANCE ", "Spain"]),
        ];
        let graph = build_graph(&records);
        let names: Vec<&str> = graph.parties().collect();
        assert_eq!(names, ["United Kingdom", "France", "Spain"]);
        assert_eq!(graph.edge_count(), 4);

        let uk = graph.node_index("UNITED KINGDOM").expect("uk node");
        assert_eq!(graph.party(uk), Some("United Kingdom"));
    }

    #[test]
    fn duplicate_party_within_record_is_not_a_self_loop() {
        let records = vec![record(0, "dup", &["A", "a", "B"])];
        let edges = GraphBuilder::new(&records).edges();
        assert_eq!(edges.len(), 1);
        assert_ne!(edges[0].source, edges[0].target);
    }

    #[test]
    fn edge_attributes_carry_agreement_fields() {
        let mut rec = record(0, "accord", &["A", "B"]);
        rec.quotes = Some("together".to_string());
        let edges = GraphBuilder::new(&[rec]).edges();
        let attrs = &edges[0].attributes;
        assert_eq!(attrs.title, "accord");
        assert_eq!(attrs.date, "2010-04-01");
        assert_eq!(attrs.sector, ["Defence"]);
        assert_eq!(attrs.policy_domain, ["Security"]);
        assert_eq!(attrs.form_of_cooperation, "Treaty");
        assert_eq!(attrs.quotes.as_deref(), Some("together"));
        assert_eq!(attrs.military_alliance, Membership::Yes);
        assert_eq!(attrs.free_trade_agreement, Membership::No);
    }

    #[test]
    fn content_hash_ignores_record_order() {
        let a = record(0, "first", &["A", "B", "C"]);
        let b = record(1, "second", &["C", "D"]);
        let forward = build_graph(&[a.clone(), b.clone()]);
        let reverse = build_graph(&[b, a]);
        assert_eq!(forward.content_hash, reverse.content_hash);
    }

    #[test]
    fn content_hash_changes_with_edges() {
        let base = vec![record(0, "first", &["A", "B"])];
        let mut more = base.clone();
        more.push(record(1, "second", &["A", "B"]));
        assert_ne!(build_graph(&base).content_hash, build_graph(&more).content_hash);
    }

    #[test]
    fn content_hash_covers_edge_attributes() {
        let base = record(0, "first", &["A", "B"]);
        let hash = |r: &AgreementRecord| build_graph(std::slice::from_ref(r)).content_hash;

        let mut retitled = base.clone();
        retitled.title = "renamed".to_string();
        assert_ne!(hash(&base), hash(&retitled));

        let mut split = base.clone();
        split.sector = vec!["Energy".to_string(), "Transport".to_string()];
        let mut joined = base.clone();
        joined.sector = vec!["EnergyTransport".to_string()];
        assert_ne!(hash(&split), hash(&joined));

        let mut quoted = base.clone();
        quoted.quotes = Some(String::new());
        let mut unquoted = base;
        unquoted.quotes = None;
        assert_ne!(hash(&quoted), hash(&unquoted));
    }

    #[test]
    fn agreement_edges_round_trip_through_graph() {
        let records = vec![record(0, "first", &["A", "B", "C"])];
        let builder = GraphBuilder::new(&records);
        assert_eq!(builder.build().agreement_edges(), builder.edges());
    }
}
