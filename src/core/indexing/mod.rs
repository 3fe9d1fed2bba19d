// src/core/indexing/mod.rs

//! Spatial indexing: the `SpatialIndex` trait and its KD-tree implementation.

pub mod kdtree;

use crate::core::common::KdscanError;
use crate::core::types::PointData;

/// Interface for exact spatial queries over a fixed, build-once point set.
///
/// Implementations are immutable after construction: both query methods take
/// `&self` and never mutate index state, so a built index is safe to share
/// across concurrent readers. The clustering engine consumes this trait and
/// keys all its bookkeeping by the original input indices the queries report,
/// so coordinate-duplicate points stay distinguishable.
pub trait SpatialIndex {
    /// Number of indexed points.
    fn len(&self) -> usize;

    /// `true` if the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the indexed points. 0 for an empty index.
    fn dimension(&self) -> u32;

    /// The point stored at `index` (its original input position).
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    fn point(&self, index: usize) -> &PointData;

    /// Original indices of every point within Euclidean distance `radius` of
    /// `query` (inclusive). Order is unspecified.
    ///
    /// # Errors
    /// `DimensionMismatch` if the query dimension differs from the index's,
    /// `InvalidParameter` if `radius` is negative or not finite.
    fn range_query(&self, query: &PointData, radius: f32) -> Result<Vec<usize>, KdscanError>;

    /// The `min(k, len)` points nearest to `query` as
    /// `(original_index, distance)` pairs, sorted ascending by distance with
    /// ties broken by ascending index.
    ///
    /// # Errors
    /// `DimensionMismatch` if the query dimension differs from the index's,
    /// `InvalidParameter` if `k` is 0.
    fn k_nearest(&self, query: &PointData, k: usize) -> Result<Vec<(usize, f32)>, KdscanError>;
}
