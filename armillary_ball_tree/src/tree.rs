// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public [`BallTree`] API: construction, configuration, and queries.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use log::debug;

use crate::error::{BallTreeError, Result};
use crate::metric::{Euclidean, Metric};
use crate::node::{BuildStats, Node, NodeBuilder};
use crate::partition::{IndexRange, identity};
use crate::query::{KnnHeap, Neighbors};
use crate::types::{Scalar, ball_lower_bound, rounding_slack};

/// A static ball tree over a borrowed set of points.
///
/// The tree owns its node hierarchy and index partition and borrows the dataset,
/// which must outlive it. Point identifiers are positions in the dataset slice.
/// Nothing is mutated after [`build`](Self::build) returns, so a tree can be
/// queried from several threads at once.
pub struct BallTree<'a, P, T, M = Euclidean> {
    points: &'a [P],
    indices: Vec<usize>,
    root: Node<T>,
    dim: usize,
    leaf_size: usize,
    metric: M,
    slack: T,
    stats: BuildStats,
}

/// Configuration for building a [`BallTree`].
///
/// ```rust
/// use armillary_ball_tree::{BallTreeBuilder, Manhattan};
///
/// let points = vec![[0.0_f64, 0.0], [3.0, 4.0], [1.0, 1.0]];
/// let tree = BallTreeBuilder::new()
///     .leaf_size(2)
///     .metric(Manhattan)
///     .build(&points)
///     .unwrap();
/// let nn = tree.query_knn(&[0.9, 0.9], 1).unwrap();
/// assert_eq!(nn.ids(), &[2]);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct BallTreeBuilder<M = Euclidean> {
    leaf_size: usize,
    metric: M,
}

impl Default for BallTreeBuilder<Euclidean> {
    fn default() -> Self {
        Self {
            leaf_size: 1,
            metric: Euclidean,
        }
    }
}

impl BallTreeBuilder<Euclidean> {
    /// Builder with leaf size 1 and the Euclidean metric.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> BallTreeBuilder<M> {
    /// Nodes with at most `leaf_size` points are not split further.
    pub fn leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Use a different distance metric.
    pub fn metric<N>(self, metric: N) -> BallTreeBuilder<N> {
        BallTreeBuilder {
            leaf_size: self.leaf_size,
            metric,
        }
    }

    /// Build a tree over `points`.
    pub fn build<'a, P, T>(self, points: &'a [P]) -> Result<BallTree<'a, P, T, M>>
    where
        T: Scalar,
        P: AsRef<[T]>,
        M: Metric<T>,
    {
        BallTree::build_with_metric(points, self.leaf_size, self.metric)
    }
}

impl<'a, P, T> BallTree<'a, P, T, Euclidean>
where
    T: Scalar,
    P: AsRef<[T]>,
{
    /// Build a tree over `points` using the Euclidean metric.
    pub fn build(points: &'a [P], leaf_size: usize) -> Result<Self> {
        Self::build_with_metric(points, leaf_size, Euclidean)
    }
}

impl<'a, P, T, M> BallTree<'a, P, T, M>
where
    T: Scalar,
    P: AsRef<[T]>,
    M: Metric<T>,
{
    /// Build a tree over `points` using `metric`.
    ///
    /// Fails if `points` is empty, `leaf_size` is zero, points disagree on
    /// dimensionality, or any coordinate is NaN or infinite.
    pub fn build_with_metric(points: &'a [P], leaf_size: usize, metric: M) -> Result<Self> {
        if leaf_size < 1 {
            return Err(BallTreeError::InvalidLeafSize(leaf_size));
        }
        let dim = points
            .first()
            .ok_or(BallTreeError::EmptyDataset)?
            .as_ref()
            .len();
        if dim == 0 {
            return Err(BallTreeError::ZeroDimensional);
        }
        validate_points(points, dim)?;

        let n = points.len();
        let mut indices = identity(n);
        let mut builder = NodeBuilder::new(points, dim, leaf_size, &metric);
        let root = builder.build(&mut indices, IndexRange::new(0, n), 0)?;
        let stats = builder.stats;
        debug!(
            "built ball tree: points={n} dim={dim} leaf_size={leaf_size} nodes={} leaves={} depth={}",
            stats.nodes, stats.leaves, stats.depth
        );

        Ok(Self {
            points,
            indices,
            root,
            dim,
            leaf_size,
            metric,
            slack: rounding_slack(dim),
            stats,
        })
    }

    /// Find the `k` nearest points to `point`, nearest first.
    ///
    /// Points at equal distance are ordered by discovery, so which of several
    /// equidistant points fills the last slot is unspecified.
    pub fn query_knn(&self, point: &[T], k: usize) -> Result<Neighbors<T>> {
        self.check_point(point)?;
        self.check_k(k)?;
        let mut heap = KnnHeap::new(k);
        self.knn_search(point, &mut heap);
        Ok(heap.into_neighbors())
    }

    /// Like [`query_knn`](Self::query_knn), returning only the identifiers.
    pub fn query_knn_indices(&self, point: &[T], k: usize) -> Result<Vec<usize>> {
        Ok(self.query_knn(point, k)?.into_parts().0)
    }

    /// Write the `ids.len()` nearest points into caller-supplied buffers.
    ///
    /// `distances`, when given, must have the same length as `ids`.
    pub fn query_knn_into(
        &self,
        point: &[T],
        ids: &mut [usize],
        distances: Option<&mut [T]>,
    ) -> Result<()> {
        if let Some(d) = &distances
            && d.len() != ids.len()
        {
            return Err(BallTreeError::BufferLengthMismatch {
                ids: ids.len(),
                distances: d.len(),
            });
        }
        let (found_ids, found_dists) = self.query_knn(point, ids.len())?.into_parts();
        ids.copy_from_slice(&found_ids);
        if let Some(d) = distances {
            d.copy_from_slice(&found_dists);
        }
        Ok(())
    }

    /// Identifiers of all points within distance `r` of `point` (inclusive).
    ///
    /// The order follows the tree layout, not distance.
    pub fn query_radius(&self, point: &[T], r: T) -> Result<Vec<usize>> {
        self.check_point(point)?;
        check_radius(r)?;
        let mut out = Vec::new();
        self.radius_walk(point, r, |hit| match hit {
            RadiusHit::Contained(ids) => out.extend_from_slice(ids),
            RadiusHit::Within(id, _) => out.push(id),
        });
        Ok(out)
    }

    /// Number of points within distance `r` of `point`, without materializing them.
    pub fn count_radius(&self, point: &[T], r: T) -> Result<usize> {
        self.check_point(point)?;
        check_radius(r)?;
        let mut count = 0;
        self.radius_walk(point, r, |hit| match hit {
            RadiusHit::Contained(ids) => count += ids.len(),
            RadiusHit::Within(..) => count += 1,
        });
        Ok(count)
    }

    /// `(id, distance)` pairs for all points within distance `r` of `point`.
    pub fn query_radius_with_distances(&self, point: &[T], r: T) -> Result<Vec<(usize, T)>> {
        self.check_point(point)?;
        check_radius(r)?;
        let mut out = Vec::new();
        self.radius_walk(point, r, |hit| match hit {
            RadiusHit::Contained(ids) => out.extend(
                ids.iter()
                    .map(|&i| (i, self.metric.distance(point, self.points[i].as_ref()))),
            ),
            RadiusHit::Within(id, d) => out.push((id, d)),
        });
        Ok(out)
    }

    fn check_point(&self, point: &[T]) -> Result<()> {
        if point.len() != self.dim {
            return Err(BallTreeError::DimensionMismatch {
                expected: self.dim,
                found: point.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_k(&self, k: usize) -> Result<()> {
        let n = self.len();
        if k == 0 || k > n {
            return Err(BallTreeError::InvalidNeighborCount { k, n });
        }
        Ok(())
    }

    /// Centroid distance of `node` and the absolute rounding slack for bound tests on it.
    #[inline]
    fn center_and_slack(&self, node: &Node<T>, point: &[T]) -> (T, T) {
        let center = node.center_distance(&self.metric, point);
        (center, self.slack * (center + node.radius()))
    }

    /// Lower bound on the distance from `point` to anything under `node`,
    /// widened so rounding never prunes a qualifying point.
    #[inline]
    fn pruning_bound(&self, node: &Node<T>, point: &[T]) -> (T, T) {
        let (center, slack) = self.center_and_slack(node, point);
        (center, ball_lower_bound(center, node.radius() + slack))
    }

    /// Branch-and-bound search, nearer child first.
    fn knn_search(&self, point: &[T], heap: &mut KnnHeap<T>) {
        let (root_center, root_lb) = self.pruning_bound(&self.root, point);
        let mut stack = vec![(&self.root, root_center, root_lb)];
        while let Some((node, center, dist_lb)) = stack.pop() {
            if !heap.admits(dist_lb) {
                continue;
            }
            match node.children() {
                None => {
                    let ids = self.node_indices(node);
                    if let [only] = ids {
                        // Zero radius: the centroid is the point itself.
                        heap.push(*only, center);
                        continue;
                    }
                    for &i in ids {
                        let d = self.metric.distance(point, self.points[i].as_ref());
                        heap.push(i, d);
                    }
                }
                Some([left, right]) => {
                    let (c_left, lb_left) = self.pruning_bound(left, point);
                    let (c_right, lb_right) = self.pruning_bound(right, point);
                    // Pushed last is visited first.
                    if lb_left <= lb_right {
                        stack.push((right, c_right, lb_right));
                        stack.push((left, c_left, lb_left));
                    } else {
                        stack.push((left, c_left, lb_left));
                        stack.push((right, c_right, lb_right));
                    }
                }
            }
        }
    }

    fn radius_walk<'t, F>(&'t self, point: &[T], r: T, mut visit: F)
    where
        F: FnMut(RadiusHit<'t, T>),
    {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            let (center, slack) = self.center_and_slack(node, point);
            let radius = node.radius();
            if ball_lower_bound(center, radius + slack) > r {
                continue;
            }
            let ids = self.node_indices(node);
            if ball_lower_bound(center, radius) + radius + radius + slack <= r {
                visit(RadiusHit::Contained(ids));
                continue;
            }
            match node.children() {
                None => {
                    for &i in ids {
                        let d = self.metric.distance(point, self.points[i].as_ref());
                        if d <= r {
                            visit(RadiusHit::Within(i, d));
                        }
                    }
                }
                Some([left, right]) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }
}

impl<'a, P, T, M> BallTree<'a, P, T, M>
where
    T: Scalar,
{
    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false: a tree holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dimensionality of the indexed points.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The leaf-size threshold the tree was built with.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The distance metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The borrowed dataset.
    pub fn points(&self) -> &'a [P] {
        self.points
    }

    /// The root node.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// The index partition: a permutation of `0..len()` in tree order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Identifiers of the points under `node`.
    pub fn node_indices(&self, node: &Node<T>) -> &[usize] {
        &self.indices[node.range().as_range()]
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.stats.nodes
    }

    /// Number of leaf nodes.
    pub fn leaf_count(&self) -> usize {
        self.stats.leaves
    }

    /// Depth of the deepest node (the root has depth 0).
    pub fn depth(&self) -> usize {
        self.stats.depth
    }
}

impl<P, T: Debug, M: Debug> Debug for BallTree<'_, P, T, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BallTree")
            .field("points", &self.indices.len())
            .field("dim", &self.dim)
            .field("leaf_size", &self.leaf_size)
            .field("metric", &self.metric)
            .field("nodes", &self.stats.nodes)
            .field("depth", &self.stats.depth)
            .finish_non_exhaustive()
    }
}

enum RadiusHit<'t, T> {
    /// Every point of a node lies within the radius.
    Contained(&'t [usize]),
    /// A single point tested by exact distance.
    Within(usize, T),
}

fn validate_points<T: Scalar, P: AsRef<[T]>>(points: &[P], dim: usize) -> Result<()> {
    for (i, p) in points.iter().enumerate() {
        let p = p.as_ref();
        if p.len() != dim {
            return Err(BallTreeError::DimensionMismatch {
                expected: dim,
                found: p.len(),
            });
        }
        if let Some(axis) = p.iter().position(|v| !v.is_finite()) {
            return Err(BallTreeError::NonFiniteCoordinate { point: i, axis });
        }
    }
    Ok(())
}

pub(crate) fn check_radius<T: Scalar>(r: T) -> Result<()> {
    if r.is_nan() || r < T::zero() {
        return Err(BallTreeError::InvalidRadius);
    }
    Ok(())
}
