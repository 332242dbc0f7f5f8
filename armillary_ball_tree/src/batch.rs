// Copyright 2025 the Armillary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched queries.
//!
//! With the `rayon` feature the queries of a batch run on the rayon thread pool;
//! otherwise they run sequentially. Results are returned in input order either way.

use alloc::vec::Vec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::Result;
use crate::metric::Metric;
use crate::query::Neighbors;
use crate::tree::{BallTree, check_radius};
use crate::types::Scalar;

impl<P, T, M> BallTree<'_, P, T, M>
where
    T: Scalar,
    P: AsRef<[T]> + Sync,
    M: Metric<T> + Sync,
{
    /// Run [`query_knn`](Self::query_knn) for every query point.
    ///
    /// The first failing query aborts the batch.
    pub fn query_knn_batch<Q>(&self, queries: &[Q], k: usize) -> Result<Vec<Neighbors<T>>>
    where
        Q: AsRef<[T]> + Sync,
    {
        self.check_k(k)?;
        #[cfg(feature = "rayon")]
        let it = queries.par_iter();
        #[cfg(not(feature = "rayon"))]
        let it = queries.iter();
        it.map(|q| self.query_knn(q.as_ref(), k)).collect()
    }

    /// Run [`count_radius`](Self::count_radius) for every query point.
    ///
    /// An invalid radius is reported even for an empty batch.
    pub fn count_radius_batch<Q>(&self, queries: &[Q], r: T) -> Result<Vec<usize>>
    where
        Q: AsRef<[T]> + Sync,
    {
        check_radius(r)?;
        #[cfg(feature = "rayon")]
        let it = queries.par_iter();
        #[cfg(not(feature = "rayon"))]
        let it = queries.iter();
        it.map(|q| self.count_radius(q.as_ref(), r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::BallTree;
    use crate::error::BallTreeError;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn batch_results_follow_input_order() {
        let pts: Vec<[f64; 2]> = (0..50).map(|i| [f64::from(i), 0.0]).collect();
        let tree = BallTree::build(&pts, 4).unwrap();
        let queries = vec![[10.2, 0.0], [0.0, 0.0], [48.9, 1.0]];
        let res = tree.query_knn_batch(&queries, 1).unwrap();
        let firsts: Vec<usize> = res.iter().map(|n| n.ids()[0]).collect();
        assert_eq!(firsts, vec![10, 0, 49]);

        let counts = tree.count_radius_batch(&queries, 1.5).unwrap();
        assert_eq!(counts, vec![3, 2, 2]);
    }

    #[test]
    fn batch_errors_propagate() {
        let pts = vec![[0.0_f64, 0.0], [1.0, 0.0]];
        let tree = BallTree::build(&pts, 1).unwrap();
        let queries = vec![vec![0.0, 0.0], vec![0.0]];
        assert_eq!(
            tree.query_knn_batch(&queries, 1).unwrap_err(),
            BallTreeError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            tree.query_knn_batch(&queries, 3).unwrap_err(),
            BallTreeError::InvalidNeighborCount { k: 3, n: 2 }
        );
    }

    #[test]
    fn empty_batches_still_validate_their_arguments() {
        let pts = vec![[0.0_f64, 0.0], [1.0, 0.0]];
        let tree = BallTree::build(&pts, 1).unwrap();
        let none: [[f64; 2]; 0] = [];
        assert_eq!(
            tree.count_radius_batch(&none, -1.0).unwrap_err(),
            BallTreeError::InvalidRadius
        );
        assert_eq!(
            tree.count_radius_batch(&none, f64::NAN).unwrap_err(),
            BallTreeError::InvalidRadius
        );
        assert_eq!(
            tree.query_knn_batch(&none, 0).unwrap_err(),
            BallTreeError::InvalidNeighborCount { k: 0, n: 2 }
        );
        assert_eq!(tree.count_radius_batch(&none, 1.0).unwrap(), Vec::<usize>::new());
    }
}
