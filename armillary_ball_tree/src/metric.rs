// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance metrics.
//!
//! The tree is correct for any metric that is non-negative, symmetric, and satisfies
//! the triangle inequality; pruning relies on the latter.
//!
//! - [`Euclidean`] (default): L2 distance.
//! - [`Manhattan`]: L1 ("cityblock") distance.
//! - [`Chebyshev`]: L∞ distance.
//! - [`Minkowski`]: Lp distance for `p >= 1`.
//! - [`FnMetric`]: wraps a user closure.

use core::fmt::Debug;

use crate::error::{BallTreeError, Result};
use crate::types::Scalar;

/// Distance capability used by [`BallTree`](crate::BallTree).
///
/// Implementations may assume `a.len() == b.len()`; the tree validates
/// dimensionality once at its API boundary. Use [`Metric::checked_distance`]
/// where inputs have not been validated.
pub trait Metric<T: Scalar> {
    /// Distance between two points of equal dimensionality.
    fn distance(&self, a: &[T], b: &[T]) -> T;

    /// Distance between two points, failing fast if their dimensionality differs.
    fn checked_distance(&self, a: &[T], b: &[T]) -> Result<T> {
        if a.len() != b.len() {
            return Err(BallTreeError::DimensionMismatch {
                expected: a.len(),
                found: b.len(),
            });
        }
        Ok(self.distance(a, b))
    }
}

impl<T: Scalar, M: Metric<T> + ?Sized> Metric<T> for &M {
    #[inline]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        (**self).distance(a, b)
    }
}

/// Euclidean (L2) distance: square root of the sum of squared differences.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl<T: Scalar> Metric<T> for Euclidean {
    #[inline]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "point dimensionality must match");
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| {
                let d = x - y;
                acc + d * d
            })
            .sqrt()
    }
}

/// Manhattan (L1) distance: sum of absolute differences.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl<T: Scalar> Metric<T> for Manhattan {
    #[inline]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "point dimensionality must match");
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y).abs())
    }
}

/// Chebyshev (L∞) distance: largest absolute difference on any axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl<T: Scalar> Metric<T> for Chebyshev {
    #[inline]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "point dimensionality must match");
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| acc.max((x - y).abs()))
    }
}

/// Minkowski (Lp) distance.
///
/// Only `p >= 1` yields a metric; smaller exponents break the triangle inequality
/// and are rejected by [`Minkowski::new`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Minkowski<T> {
    p: T,
}

impl<T: Scalar> Minkowski<T> {
    /// Create a Minkowski metric with exponent `p`.
    pub fn new(p: T) -> Result<Self> {
        if !p.is_finite() || p < T::one() {
            return Err(BallTreeError::InvalidMinkowskiP);
        }
        Ok(Self { p })
    }

    /// The exponent.
    pub fn p(&self) -> T {
        self.p
    }
}

impl<T: Scalar> Metric<T> for Minkowski<T> {
    #[inline]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "point dimensionality must match");
        let sum = a
            .iter()
            .zip(b)
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y).abs().powf(self.p));
        sum.powf(self.p.recip())
    }
}

/// Adapter turning a closure into a [`Metric`].
///
/// The closure must itself be a metric for query results to be exact.
#[derive(Copy, Clone)]
pub struct FnMetric<F>(pub F);

impl<F> Debug for FnMetric<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnMetric").finish_non_exhaustive()
    }
}

impl<T: Scalar, F: Fn(&[T], &[T]) -> T> Metric<T> for FnMetric<F> {
    #[inline]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        (self.0)(a, b)
    }
}
