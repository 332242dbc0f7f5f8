// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by tree construction, queries, and metrics.

use thiserror::Error;

/// Errors reported by [`BallTree`](crate::BallTree) construction and queries.
///
/// Construction errors abort the build entirely; no partially built tree is returned.
/// Query errors abort only the call that raised them, since queries never mutate the tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BallTreeError {
    /// A zero-length partition was reached while building the tree.
    ///
    /// This is an internal invariant violation and never a valid tree state.
    #[error("zero-sized node at depth {depth} (partition offset {offset})")]
    EmptyNode {
        /// Recursion depth at which the empty range was found.
        depth: usize,
        /// Offset of the empty range in the index partition.
        offset: usize,
    },

    /// The dataset passed to the builder holds no points.
    #[error("cannot build a ball tree from an empty point set")]
    EmptyDataset,

    /// The requested neighbor count is outside `1..=n`.
    #[error("invalid neighbor count: k must be in 1..={n} (got {k})")]
    InvalidNeighborCount {
        /// The requested number of neighbors.
        k: usize,
        /// The number of indexed points.
        n: usize,
    },

    /// Two points (or a point and the dataset) disagree on dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimensionality of the dataset.
        expected: usize,
        /// Dimensionality of the offending point.
        found: usize,
    },

    /// Dataset points have no coordinates.
    #[error("points must have at least one dimension")]
    ZeroDimensional,

    /// Caller-supplied id and distance buffers differ in length.
    #[error("buffer length mismatch: {ids} ids but {distances} distances")]
    BufferLengthMismatch {
        /// Length of the id buffer.
        ids: usize,
        /// Length of the distance buffer.
        distances: usize,
    },

    /// The leaf-size threshold must be at least one.
    #[error("invalid leaf size {0}: must be at least 1")]
    InvalidLeafSize(usize),

    /// A radius query was given a negative or NaN radius.
    #[error("query radius must be a non-negative number")]
    InvalidRadius,

    /// A dataset point has a NaN or infinite coordinate.
    #[error("point {point} has a non-finite coordinate on axis {axis}")]
    NonFiniteCoordinate {
        /// Identifier of the offending point.
        point: usize,
        /// Axis of the offending coordinate.
        axis: usize,
    },

    /// Minkowski distances only satisfy the triangle inequality for `p >= 1`.
    #[error("minkowski exponent must be a finite number >= 1")]
    InvalidMinkowskiP,
}

/// Result alias used throughout the crate.
pub type Result<T, E = BallTreeError> = core::result::Result<T, E>;
