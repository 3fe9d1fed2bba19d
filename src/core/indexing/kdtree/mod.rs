// src/core/indexing/kdtree/mod.rs

//! Balanced KD-Tree spatial index.

pub use self::error::KdTreeError;
use self::tree::KdTree;
use super::SpatialIndex;
use crate::core::common::KdscanError;
use crate::core::types::PointData;

mod builder;
mod error;
mod heap;
mod search;
mod tree;

#[cfg(test)]
mod tests;

/// `KdTreeIndex`: an exact, build-once spatial index over a fixed point set.
///
/// The index owns the point store; tree nodes refer to points by their
/// original position in the input sequence, so query results identify points
/// by input index and coordinate-duplicates remain distinguishable. The
/// structure is immutable after `build` — there is no insertion, deletion, or
/// rebalancing, and both queries take `&self`.
#[derive(Debug)]
pub struct KdTreeIndex {
    dimension: u32,
    tree: KdTree,
    points: Vec<PointData>,
}

impl KdTreeIndex {
    /// Builds an index over `points`, taking ownership of the store.
    ///
    /// The dimension is determined by the first point; every other point must
    /// match it. An empty input yields a well-defined empty index (dimension
    /// 0) whose queries all return empty results.
    ///
    /// # Errors
    /// `DimensionMismatch` if the points disagree on dimension, or
    /// `InvalidInput` if any coordinate is NaN or infinite.
    pub fn build(points: Vec<PointData>) -> Result<Self, KdscanError> {
        let dimension = points.first().map_or(0, |p| p.dimension);

        for (i, point) in points.iter().enumerate() {
            if !point.is_valid() {
                return Err(KdscanError::InvalidInput {
                    message: format!("Point {i} contains invalid coordinates (NaN or infinite)"),
                });
            }
        }

        let tree = builder::build_kdtree(&points, dimension)?;
        Ok(Self { dimension, tree, points })
    }

    /// Builds an index from raw coordinate rows.
    ///
    /// # Errors
    /// Same conditions as [`KdTreeIndex::build`].
    pub fn build_from_rows(rows: &[Vec<f32>]) -> Result<Self, KdscanError> {
        let points = rows.iter().map(|row| PointData::from_row(row)).collect();
        Self::build(points)
    }

    /// All indexed points, in original input order.
    #[must_use]
    pub fn points(&self) -> &[PointData] {
        &self.points
    }
}

impl SpatialIndex for KdTreeIndex {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn dimension(&self) -> u32 {
        self.dimension
    }

    fn point(&self, index: usize) -> &PointData {
        &self.points[index]
    }

    fn range_query(&self, query: &PointData, radius: f32) -> Result<Vec<usize>, KdscanError> {
        search::range_query(&self.tree, query, radius, &self.points).map_err(KdscanError::from)
    }

    fn k_nearest(&self, query: &PointData, k: usize) -> Result<Vec<(usize, f32)>, KdscanError> {
        search::find_knn(&self.tree, query, k, &self.points).map_err(KdscanError::from)
    }
}
