// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ball tree nodes and their recursive construction.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use log::trace;

use crate::error::{BallTreeError, Result};
use crate::metric::Metric;
use crate::partition::{IndexRange, sort_by_axis};
use crate::types::{Scalar, widest_axis};

/// A node of the ball tree.
///
/// Each node covers a contiguous range of the tree's index partition and is bounded
/// by the ball `(centroid, radius)`. Internal nodes own exactly two children whose
/// ranges split the parent's range at its midpoint.
#[derive(Clone, Debug)]
pub struct Node<T> {
    range: IndexRange,
    centroid: Vec<T>,
    radius: T,
    children: Option<Box<[Self; 2]>>,
}

impl<T: Scalar> Node<T> {
    /// The range of the index partition covered by this node.
    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// Number of points under this node.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Always false: nodes hold at least one point.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Mean coordinate vector of the points under this node.
    pub fn centroid(&self) -> &[T] {
        &self.centroid
    }

    /// Largest distance from the centroid to any point under this node.
    pub fn radius(&self) -> T {
        self.radius
    }

    /// Whether this node is a leaf (searched by brute force).
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The two children of an internal node.
    pub fn children(&self) -> Option<&[Self; 2]> {
        self.children.as_deref()
    }

    /// Distance from `query` to the centroid.
    ///
    /// No point under this node is closer to `query` than this minus
    /// [`radius`](Self::radius).
    #[inline]
    pub fn center_distance<M: Metric<T>>(&self, metric: &M, query: &[T]) -> T {
        metric.distance(query, &self.centroid)
    }
}

/// Counters collected while building, reported through `log`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BuildStats {
    pub(crate) nodes: usize,
    pub(crate) leaves: usize,
    pub(crate) depth: usize,
}

/// Recursive node construction over one dataset.
pub(crate) struct NodeBuilder<'a, P, M> {
    points: &'a [P],
    dim: usize,
    leaf_size: usize,
    metric: &'a M,
    pub(crate) stats: BuildStats,
}

impl<'a, P, M> NodeBuilder<'a, P, M> {
    pub(crate) fn new(points: &'a [P], dim: usize, leaf_size: usize, metric: &'a M) -> Self {
        Self {
            points,
            dim,
            leaf_size,
            metric,
            stats: BuildStats::default(),
        }
    }

    /// Build the node covering `range`; `ids` is exactly that range of the partition.
    pub(crate) fn build<T>(
        &mut self,
        ids: &mut [usize],
        range: IndexRange,
        depth: usize,
    ) -> Result<Node<T>>
    where
        T: Scalar,
        P: AsRef<[T]>,
        M: Metric<T>,
    {
        debug_assert_eq!(ids.len(), range.len(), "id slice must match its range");
        self.stats.nodes += 1;
        self.stats.depth = self.stats.depth.max(depth);

        let points = self.points;
        let n = ids.len();
        if n == 0 {
            return Err(BallTreeError::EmptyNode {
                depth,
                offset: range.offset(),
            });
        }
        if n == 1 {
            self.stats.leaves += 1;
            return Ok(Node {
                range,
                centroid: points[ids[0]].as_ref().to_vec(),
                radius: T::zero(),
                children: None,
            });
        }

        let mut centroid = vec![T::zero(); self.dim];
        for &i in ids.iter() {
            for (c, &x) in centroid.iter_mut().zip(points[i].as_ref()) {
                *c = *c + x;
            }
        }
        let count = T::from_count(n);
        for c in &mut centroid {
            *c = *c / count;
        }

        let radius = ids.iter().fold(T::zero(), |r, &i| {
            r.max(self.metric.distance(points[i].as_ref(), &centroid))
        });

        if n <= self.leaf_size {
            self.stats.leaves += 1;
            return Ok(Node {
                range,
                centroid,
                radius,
                children: None,
            });
        }

        let (axis, spread) = widest_axis(ids.iter().map(|&i| points[i].as_ref()), self.dim)
            .ok_or(BallTreeError::EmptyNode {
                depth,
                offset: range.offset(),
            })?;
        trace!(
            "split depth={depth} offset={} len={n} axis={axis} spread={spread:?}",
            range.offset()
        );
        sort_by_axis(ids, points, axis);

        let (left_range, right_range) = range.halves();
        let (left_ids, right_ids) = ids.split_at_mut(left_range.len());
        let left = self.build(left_ids, left_range, depth + 1)?;
        let right = self.build(right_ids, right_range, depth + 1)?;

        Ok(Node {
            range,
            centroid,
            radius,
            children: Some(Box::new([left, right])),
        })
    }
}
