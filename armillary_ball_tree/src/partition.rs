// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index partition: the permutation of point identifiers shared by all nodes.
//!
//! The tree owns one `Vec<usize>` holding a permutation of `0..N`. Every node
//! refers to a contiguous sub-range of it through an [`IndexRange`]. During
//! construction the buffer is split with `split_at_mut`, so sibling subtrees only
//! ever see disjoint mutable views.

use alloc::vec::Vec;
use core::ops::Range;

use crate::types::Scalar;

/// A view `(offset, len)` into the shared index partition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    offset: usize,
    len: usize,
}

impl IndexRange {
    /// Create a view starting at `offset` covering `len` entries.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Start of the view in the partition buffer.
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Number of entries in the view.
    pub const fn len(self) -> usize {
        self.len
    }

    /// Whether the view is empty.
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The view as a buffer range.
    pub const fn as_range(self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Split at the midpoint: the left half gets `floor(len / 2)` entries.
    pub const fn halves(self) -> (Self, Self) {
        let left = self.len / 2;
        (
            Self::new(self.offset, left),
            Self::new(self.offset + left, self.len - left),
        )
    }
}

/// The identity permutation `0..n`.
pub(crate) fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Sort a slice of point ids by their coordinate on `axis`.
pub(crate) fn sort_by_axis<T, P>(ids: &mut [usize], points: &[P], axis: usize)
where
    T: Scalar,
    P: AsRef<[T]>,
{
    ids.sort_unstable_by(|&a, &b| {
        T::total_order(points[a].as_ref()[axis], points[b].as_ref()[axis])
    });
}
