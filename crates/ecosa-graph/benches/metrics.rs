//! Metric benchmarks on a synthetic agreement table.
//!
//! Run with:
//! ```sh
//! cargo bench -p ecosa-graph --bench metrics
//! ```

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ecosa_core::record::{AgreementRecord, Membership};
use ecosa_graph::build_graph;
use ecosa_graph::metrics::betweenness::betweenness_centrality;
use ecosa_graph::metrics::degree::degree_centrality;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// (name, parties, agreements)
const TIERS: [(&str, usize, usize); 3] = [("small", 40, 200), ("medium", 120, 1_000), ("large", 200, 4_000)];

/// Agreements with 2-5 parties drawn from a fixed pool.
fn synthetic_table(parties: usize, agreements: usize, seed: u64) -> Vec<AgreementRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let date = NaiveDate::from_ymd_opt(2014, 3, 1).unwrap_or_default();
    (0..agreements)
        .map(|row| {
            let k = rng.gen_range(2..=5);
            AgreementRecord {
                row,
                title: format!("Agreement {row}"),
                date,
                parties: (0..k)
                    .map(|_| format!("Party {}", rng.gen_range(0..parties)))
                    .collect(),
                sector: vec![],
                policy_domain: vec![],
                form_of_cooperation: "Treaty".to_string(),
                quotes: None,
                military_alliance: Membership::No,
                free_trade_agreement: Membership::No,
                corpus: None,
            }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph.build");
    for (name, parties, agreements) in TIERS {
        let table = synthetic_table(parties, agreements, 0xEC05A);
        group.throughput(Throughput::Elements(agreements as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &table, |b, table| {
            b.iter(|| black_box(build_graph(table).edge_count()));
        });
    }
    group.finish();
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    for (name, parties, agreements) in TIERS {
        let graph = build_graph(&synthetic_table(parties, agreements, 0xEC05A));
        group.bench_with_input(BenchmarkId::new("betweenness", name), &graph, |b, graph| {
            b.iter(|| black_box(betweenness_centrality(graph).len()));
        });
        group.bench_with_input(BenchmarkId::new("degree", name), &graph, |b, graph| {
            b.iter(|| black_box(degree_centrality(graph).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_centrality);
criterion_main!(benches);
