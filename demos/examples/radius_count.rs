// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radius queries over a jittered grid.
//!
//! Compares `query_radius`, `count_radius` and a brute-force scan, and shows the
//! batched form.
//!
//! Run:
//! - `cargo run -p armillary_demos --example radius_count`

use armillary_ball_tree::BallTree;

fn main() {
    let side = 100_usize;
    let mut points = Vec::with_capacity(side * side);
    for y in 0..side {
        for x in 0..side {
            let jitter = ((x * 31 + y * 17) % 7) as f64 * 0.05;
            points.push([x as f64 + jitter, y as f64 - jitter]);
        }
    }

    let tree = BallTree::build(&points, 16).unwrap();
    println!(
        "{} points, leaf size {}, depth {}",
        tree.len(),
        tree.leaf_size(),
        tree.depth()
    );

    let query = [50.0, 50.0];
    for r in [0.5, 2.0, 10.0, 200.0] {
        let hits = tree.query_radius(&query, r).unwrap();
        let count = tree.count_radius(&query, r).unwrap();
        let brute = points
            .iter()
            .filter(|p| ((p[0] - query[0]).powi(2) + (p[1] - query[1]).powi(2)).sqrt() <= r)
            .count();
        assert_eq!(hits.len(), count);
        assert_eq!(count, brute);
        println!("r = {r:>5}: {count} points");
    }

    let mut within = tree.query_radius_with_distances(&query, 1.5).unwrap();
    within.sort_by(|a, b| a.1.total_cmp(&b.1));
    println!("within 1.5 of {query:?}:");
    for (id, d) in within {
        println!("  #{id} {:?} at {d:.3}", points[id]);
    }

    let probes = [[0.0, 0.0], [99.0, 0.0], [50.0, 50.0], [99.0, 99.0]];
    let counts = tree.count_radius_batch(&probes, 3.0).unwrap();
    println!("counts within 3.0 of {probes:?}: {counts:?}");
}
