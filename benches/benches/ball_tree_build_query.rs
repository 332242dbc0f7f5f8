// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use armillary_ball_tree::{BallTree, BallTreeBuilder, Manhattan};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, dim: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| (0..dim).map(|_| rng.next_f64() * 1000.0).collect())
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, dim: usize, spread: f64) -> Vec<Vec<f64>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<Vec<f64>> = (0..n_clusters)
        .map(|_| (0..dim).map(|_| rng.next_f64() * 2000.0).collect())
        .collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for c in &centers {
        for _ in 0..per_cluster {
            out.push(c.iter().map(|x| x + (rng.next_f64() - 0.5) * spread).collect());
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_uniform_points(n, 3, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        for &leaf in &[1usize, 16, 40] {
            group.bench_function(format!("uniform_d3_n{}_leaf{}", n, leaf), |b| {
                b.iter(|| {
                    let tree = BallTree::build(&points, leaf).unwrap();
                    black_box(tree.node_count());
                })
            });
        }
    }
    group.finish();
}

fn bench_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn");
    for &dim in &[2usize, 8, 32] {
        let points = gen_uniform_points(20_000, dim, 0xFACE_FEED_CAFE_BABE);
        let queries = gen_uniform_points(256, dim, 0xBADC_F00D_1234_5678);
        let tree = BallTree::build(&points, 16).unwrap();
        group.throughput(Throughput::Elements(queries.len() as u64));
        for &k in &[1usize, 10, 50] {
            group.bench_function(format!("uniform_d{}_k{}", dim, k), |b| {
                b.iter(|| {
                    for q in &queries {
                        let nn = tree.query_knn(q, k).unwrap();
                        black_box(nn.distances()[k - 1]);
                    }
                })
            });
        }
    }

    let points = gen_clustered_points(40, 500, 4, 30.0);
    let queries = gen_uniform_points(256, 4, 0x1234_5678_9ABC_DEF0);
    let tree = BallTreeBuilder::new()
        .leaf_size(16)
        .metric(Manhattan)
        .build(&points)
        .unwrap();
    group.bench_function("clustered_d4_k10_manhattan", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(tree.query_knn(q, 10).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius");
    let points = gen_uniform_points(50_000, 3, 0xDEAD_BEEF_0BAD_F00D);
    let queries = gen_uniform_points(256, 3, 0x0DDB_A11C_AFE0_0001);
    let tree = BallTree::build(&points, 16).unwrap();
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &r in &[10.0_f64, 50.0, 200.0] {
        group.bench_function(format!("query_r{}", r), |b| {
            b.iter_batched(
                || queries.clone(),
                |qs| {
                    for q in &qs {
                        black_box(tree.query_radius(q, r).unwrap());
                    }
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("count_r{}", r), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.count_radius(q, r).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let points = gen_uniform_points(50_000, 8, 0xFEED_FACE_0000_0001);
    let queries = gen_uniform_points(2_048, 8, 0xFEED_FACE_0000_0002);
    let tree = BallTree::build(&points, 32).unwrap();
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("knn_batch_d8_k10", |b| {
        b.iter(|| black_box(tree.query_knn_batch(&queries, 10).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_knn, bench_radius, bench_batch);
criterion_main!(benches);
