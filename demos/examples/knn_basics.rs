// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ball tree basics.
//!
//! Build a tree over a handful of 3D points, ask for nearest neighbors with the
//! default Euclidean metric, then rebuild with a different metric and leaf size.
//!
//! Run:
//! - `cargo run -p armillary_demos --example knn_basics`

use armillary_ball_tree::{BallTree, BallTreeBuilder, Chebyshev, Manhattan};

fn main() {
    let points = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [0.0, 0.0, 3.0],
        [4.0, 4.0, 4.0],
        [5.0, 4.0, 4.0],
        [4.0, 5.0, 4.0],
        [9.0, 9.0, 9.0],
    ];

    let tree = BallTree::build(&points, 1).unwrap();
    println!(
        "built: {} points, {} nodes, {} leaves, depth {}",
        tree.len(),
        tree.node_count(),
        tree.leaf_count(),
        tree.depth()
    );

    let query = [3.5, 4.0, 4.0];
    let nn = tree.query_knn(&query, 3).unwrap();
    println!("3 nearest to {:?} (euclidean):", query);
    for (id, d) in nn.iter() {
        println!("  #{id} {:?} at {d:.3}", points[id]);
    }

    // The same points under other metrics. Rankings can differ.
    let manhattan = BallTreeBuilder::new()
        .leaf_size(2)
        .metric(Manhattan)
        .build(&points)
        .unwrap();
    let chebyshev = BallTreeBuilder::new()
        .metric(Chebyshev)
        .build(&points)
        .unwrap();
    println!(
        "manhattan ids: {:?}",
        manhattan.query_knn_indices(&query, 3).unwrap()
    );
    println!(
        "chebyshev ids: {:?}",
        chebyshev.query_knn_indices(&query, 3).unwrap()
    );

    // Caller-provided buffers avoid allocating a result per query.
    let mut ids = [0_usize; 2];
    let mut dists = [0.0_f64; 2];
    tree.query_knn_into(&[0.0, 0.0, 0.0], &mut ids, Some(&mut dists[..]))
        .unwrap();
    println!("2 nearest to the origin: {ids:?} at {dists:?}");

    // k must be in 1..=n.
    match tree.query_knn(&query, points.len() + 1) {
        Ok(_) => unreachable!(),
        Err(e) => println!("expected error: {e}"),
    }
}
