// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction and small coordinate helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

use num_traits::Float;

/// Numeric scalar abstraction for point coordinates and distances.
///
/// This trait layers the few operations the tree needs on top of
/// [`num_traits::Float`]: a conversion from point counts (for centroids) and
/// a total order (for sorting partitions). It is implemented for `f32` and `f64`.
pub trait Scalar: Float + Debug + Send + Sync + 'static {
    /// Convert a point count to the scalar type.
    fn from_count(n: usize) -> Self;

    /// Total ordering used when sorting coordinates.
    fn total_order(a: Self, b: Self) -> Ordering;
}

impl Scalar for f32 {
    #[inline]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Point counts beyond 2^24 lose precision in f32 centroids, which is inherent to f32 data."
    )]
    fn from_count(n: usize) -> Self {
        n as Self
    }

    #[inline]
    fn total_order(a: Self, b: Self) -> Ordering {
        a.total_cmp(&b)
    }
}

impl Scalar for f64 {
    #[inline]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Point counts beyond 2^53 are not addressable in practice."
    )]
    fn from_count(n: usize) -> Self {
        n as Self
    }

    #[inline]
    fn total_order(a: Self, b: Self) -> Ordering {
        a.total_cmp(&b)
    }
}

/// Lower bound on the distance from a query to any point inside a ball.
///
/// `center_dist` is the distance from the query to the ball's centroid.
#[inline]
pub fn ball_lower_bound<T: Scalar>(center_dist: T, radius: T) -> T {
    (center_dist - radius).max(T::zero())
}

/// Relative rounding slack for bound tests on `dim`-dimensional points.
///
/// Multiplied by the magnitude of the distances a bound test combines, this covers
/// their accumulated float error. Subtree decisions widened by it agree with the
/// exact per-point test.
pub(crate) fn rounding_slack<T: Scalar>(dim: usize) -> T {
    T::epsilon() * T::from_count(4 * (dim + 4))
}

/// The axis of maximum spread (`max - min`) over a set of coordinate rows.
///
/// Returns `(axis, spread)`, or `None` when `rows` is empty or `dim == 0`.
/// A later axis replaces the current choice when its spread is `>=` the
/// current maximum, so the last axis among equal maxima wins.
pub(crate) fn widest_axis<'a, T, I>(rows: I, dim: usize) -> Option<(usize, T)>
where
    T: Scalar,
    I: Iterator<Item = &'a [T]> + Clone,
{
    let mut best: Option<(usize, T)> = None;
    for axis in 0..dim {
        let mut it = rows.clone().map(|r| r[axis]);
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let spread = hi - lo;
        if best.is_none_or(|(_, s)| spread >= s) {
            best = Some((axis, spread));
        }
    }
    best
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
