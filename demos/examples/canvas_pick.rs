// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking the nearest markers on a 2D canvas.
//!
//! Markers are laid out as `kurbo::Point`s, indexed by their coordinates, and picked
//! by pointer position: the closest marker wins, and everything under a pick radius
//! is reported for a lasso-style hover.
//!
//! Run:
//! - `cargo run -p armillary_demos --example canvas_pick`

use armillary_ball_tree::BallTree;
use kurbo::{Circle, Point, Shape};

const PICK_RADIUS: f64 = 12.0;

fn main() {
    // A spiral of markers.
    let markers: Vec<Point> = (0..400)
        .map(|i| {
            let t = i as f64 * 0.15;
            Point::new(400.0 + t.cos() * t * 6.0, 300.0 + t.sin() * t * 6.0)
        })
        .collect();
    let coords: Vec<[f64; 2]> = markers.iter().map(|p| [p.x, p.y]).collect();
    let tree = BallTree::build(&coords, 4).unwrap();

    for pointer in [
        Point::new(400.0, 300.0),
        Point::new(520.0, 260.0),
        Point::new(10.0, 10.0),
    ] {
        let nn = tree.query_knn(&[pointer.x, pointer.y], 1).unwrap();
        let (id, d) = (nn.ids()[0], nn.distances()[0]);
        debug_assert!((markers[id].distance(pointer) - d).abs() < 1e-9);
        println!(
            "pointer {pointer:?}: nearest marker #{id} at {:?} ({d:.2} px)",
            markers[id]
        );

        let hover = Circle::new(pointer, PICK_RADIUS);
        let mut under = tree
            .query_radius(&[pointer.x, pointer.y], PICK_RADIUS)
            .unwrap();
        under.sort_unstable();
        // The hover circle's boundary is inclusive in the tree, exclusive in kurbo.
        let strictly_inside = under.iter().filter(|&&i| hover.contains(markers[i])).count();
        assert!(strictly_inside <= under.len());
        println!(
            "  {} markers under the {PICK_RADIUS} px hover ({strictly_inside} strictly inside): {under:?}",
            under.len()
        );
    }

    let root = tree.root();
    println!(
        "root ball: center ({:.1}, {:.1}), radius {:.1}",
        root.centroid()[0],
        root.centroid()[1],
        root.radius()
    );
}
