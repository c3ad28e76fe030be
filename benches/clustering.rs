use corrclust::cluster::{CorrelationClusterer, GreedyMerge, LpRelaxation, VertexGreedy};
use corrclust::SignedGraph;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

/// Planted partition: pairs inside a block are positive, across blocks negative,
/// with `noise` of the signs flipped and `density` of the pairs known.
fn planted(n: u32, blocks: u32, density: f64, noise: f64, seed: u64) -> SignedGraph<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Vec::new();
    let mut neg = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if !rng.random_bool(density) {
                continue;
            }
            let same = u % blocks == v % blocks;
            if same != rng.random_bool(noise) {
                pos.push((u, v));
            } else {
                neg.push((u, v));
            }
        }
    }
    SignedGraph::new(0..n, pos, neg).unwrap()
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    let graph = planted(120, 4, 0.5, 0.1, 42);

    group.bench_function("cluster_pairs_n120", |b| {
        b.iter(|| GreedyMerge::new().cluster(black_box(&graph)))
    });
    group.bench_function("vertex_pairs_n120", |b| {
        b.iter(|| VertexGreedy::new().cluster(black_box(&graph)))
    });

    group.finish();
}

fn bench_lp(c: &mut Criterion) {
    let mut group = c.benchmark_group("lp");
    let graph = planted(60, 3, 1.0, 0.05, 7);

    group.bench_function("formulate_complete_n60", |b| {
        b.iter(|| LpRelaxation::new(black_box(&graph)).formulate())
    });

    group.finish();
}

criterion_group!(benches, bench_greedy, bench_lp);
criterion_main!(benches);
