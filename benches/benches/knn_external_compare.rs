// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use armillary_ball_tree::BallTree;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rstar::RTree;

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            // Offset odd rows to avoid exact distance ties.
            let jitter = if y % 2 == 1 { cell * 0.37 } else { 0.0 };
            out.push([x as f64 * cell + jitter, y as f64 * cell]);
        }
    }
    out
}

fn bench_knn_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_external_compare_f64");
    for &n in &[64usize, 128, 256] {
        let points = gen_grid_points(n, 10.0);
        let queries: Vec<[f64; 2]> = (0..128)
            .map(|i| [i as f64 * 4.9 + 0.3, (127 - i) as f64 * 3.7 + 0.1])
            .collect();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("armillary_build_n{}", n), |b| {
            b.iter(|| {
                let tree = BallTree::build(&points, 16).unwrap();
                black_box(tree.depth());
            })
        });

        group.bench_function(format!("rstar_build_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    black_box(tree.size());
                },
                BatchSize::SmallInput,
            )
        });

        let tree = BallTree::build(&points, 16).unwrap();
        let rtree = RTree::bulk_load(points.clone());

        group.bench_function(format!("armillary_knn10_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.query_knn(q, 10).unwrap());
                }
            })
        });

        group.bench_function(format!("rstar_knn10_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    let hits: Vec<_> = rtree.nearest_neighbor_iter(q).take(10).collect();
                    black_box(hits);
                }
            })
        });

        group.bench_function(format!("armillary_radius25_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.count_radius(q, 25.0).unwrap());
                }
            })
        });

        group.bench_function(format!("rstar_radius25_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    // rstar works with squared distances.
                    black_box(rtree.locate_within_distance(*q, 25.0 * 25.0).count());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_knn_external_compare_f64);
criterion_main!(benches);
