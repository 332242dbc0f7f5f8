// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query bookkeeping and result types.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{Scalar, lt};

/// Bounded list of the `k` best candidates found so far.
///
/// Distances and ids live in two parallel buffers of length `k`, kept sorted by
/// ascending distance. The first [`len`](Self::len) slots are filled; the rest hold
/// `+inf`. Until the list is full every candidate is accepted, even one at `+inf`,
/// so a query always reports `k` distinct points.
#[derive(Clone, Debug)]
pub struct KnnHeap<T> {
    distances: Vec<T>,
    ids: Vec<usize>,
    len: usize,
}

impl<T: Scalar> KnnHeap<T> {
    /// Create an empty list for `k >= 1` neighbors.
    pub fn new(k: usize) -> Self {
        debug_assert!(k >= 1, "k must be positive");
        Self {
            distances: vec![T::infinity(); k],
            ids: vec![0; k],
            len: 0,
        }
    }

    /// Capacity `k`.
    pub fn k(&self) -> usize {
        self.ids.len()
    }

    /// Number of accepted candidates, at most `k`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing was accepted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `k` candidates were accepted.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.k()
    }

    /// The worst accepted distance (`+inf` until `k` candidates were accepted).
    #[inline]
    pub fn worst(&self) -> T {
        self.distances[self.distances.len() - 1]
    }

    /// Whether a subtree whose points are all at least `bound` away can still
    /// contribute a candidate.
    #[inline]
    pub fn admits(&self, bound: T) -> bool {
        !self.is_full() || lt(bound, self.worst())
    }

    /// Offer a candidate. Returns true if it was accepted.
    ///
    /// Once full, candidates not strictly closer than [`worst`](Self::worst) are
    /// rejected. Accepted candidates are placed after any entries at an equal distance.
    pub fn push(&mut self, id: usize, dist: T) -> bool {
        if self.is_full() && !lt(dist, self.worst()) {
            return false;
        }
        let pos = self.distances[..self.len].partition_point(|&d| !lt(dist, d));
        let end = self.len.min(self.k() - 1);
        self.distances.copy_within(pos..end, pos + 1);
        self.ids.copy_within(pos..end, pos + 1);
        self.distances[pos] = dist;
        self.ids[pos] = id;
        if self.len < self.k() {
            self.len += 1;
        }
        true
    }

    /// Finish into a [`Neighbors`] result.
    ///
    /// Unfilled slots are dropped.
    pub fn into_neighbors(mut self) -> Neighbors<T> {
        self.ids.truncate(self.len);
        self.distances.truncate(self.len);
        Neighbors {
            ids: self.ids,
            distances: self.distances,
        }
    }
}

/// Result of a k-nearest-neighbor query, nearest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbors<T> {
    ids: Vec<usize>,
    distances: Vec<T>,
}

impl<T: Copy> Neighbors<T> {
    /// Point identifiers, nearest first.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Distances matching [`ids`](Self::ids).
    pub fn distances(&self) -> &[T] {
        &self.distances
    }

    /// Number of neighbors.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no neighbors are held.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(id, distance)` pairs, nearest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.ids.iter().copied().zip(self.distances.iter().copied())
    }

    /// Split into `(ids, distances)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.ids, self.distances)
    }
}
