// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=armillary_ball_tree --heading-base-level=0

//! Armillary Ball Tree: a static ball tree for exact nearest-neighbor and radius queries.
//!
//! A ball tree recursively splits a fixed set of d-dimensional points into two halves
//! along the axis of widest spread. Each node is bounded by a ball (centroid and radius),
//! and queries use those balls to skip whole subtrees.
//!
//! - Build once from a borrowed slice of points with [`BallTree::build`] or [`BallTreeBuilder`].
//! - Find the `k` nearest points with [`BallTree::query_knn`] (branch-and-bound, nearest first).
//! - Find or count the points within a radius with [`BallTree::query_radius`] and
//!   [`BallTree::count_radius`].
//!
//! It is generic over the scalar type (`f32` or `f64`), the point type (anything that is
//! `AsRef<[T]>`), and the distance [`Metric`]. The default metric is [`Euclidean`];
//! [`Manhattan`], [`Chebyshev`], [`Minkowski`] and closures via [`FnMetric`] are also provided.
//! Any metric works as long as it satisfies the triangle inequality.
//!
//! # Example
//!
//! ```rust
//! use armillary_ball_tree::BallTree;
//!
//! let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0], [6.0, 5.0]];
//! let tree = BallTree::build(&points, 1).unwrap();
//!
//! // Two nearest neighbors of the origin: itself and one of the unit points.
//! let nn = tree.query_knn(&[0.0, 0.0], 2).unwrap();
//! assert_eq!(nn.ids()[0], 0);
//! assert_eq!(nn.distances(), &[0.0, 1.0]);
//!
//! // Everything within 1.5 of the origin.
//! assert_eq!(tree.count_radius(&[0.0, 0.0], 1.5).unwrap(), 3);
//! ```
//!
//! ## Structure
//!
//! The tree owns one index partition: a permutation of point identifiers. Every node covers
//! a contiguous range of it, and the two children of a node split that range at its midpoint,
//! so the depth is at most `ceil(log2(n))` whatever the point distribution.
//! Queries walk the hierarchy with an explicit stack and never mutate it.
//!
//! ## Features
//!
//! - `std` (default): float math from the standard library.
//! - `libm`: float math from `libm`, for `no_std` targets.
//! - `rayon`: run [`BallTree::query_knn_batch`] and [`BallTree::count_radius_batch`] in parallel.
//!
//! ### Float semantics
//!
//! Coordinates must be finite; building rejects NaN and infinities.

#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("armillary_ball_tree requires either the `std` or `libm` feature");

extern crate alloc;

pub mod batch;
pub mod error;
pub mod metric;
pub mod node;
pub mod partition;
pub mod query;
pub mod tree;
pub mod types;

pub use error::{BallTreeError, Result};
pub use metric::{Chebyshev, Euclidean, FnMetric, Manhattan, Metric, Minkowski};
pub use node::Node;
pub use partition::IndexRange;
pub use query::{KnnHeap, Neighbors};
pub use tree::{BallTree, BallTreeBuilder};
pub use types::Scalar;
