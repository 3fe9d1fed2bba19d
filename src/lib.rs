#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::cast_precision_loss)]
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

//! # kdscan: KD-Tree Spatial Indexing and DBSCAN Clustering
//!
//! `kdscan` provides an exact, build-once spatial index (a balanced KD-tree)
//! over a fixed set of n-dimensional points, answering range and k-nearest
//! neighbor queries, and a DBSCAN clustering engine built entirely on the
//! index's range-query primitive.
//!
//! The index is immutable after construction: queries take `&self` and are
//! safe to issue from multiple readers. Clustering is sequential by nature
//! (each point's classification can change its neighbors' classification).

pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::core::clustering::{cluster, dbscan, DbscanResult, Label};
pub use crate::core::common::KdscanError;
pub use crate::core::indexing::kdtree::KdTreeIndex;
pub use crate::core::indexing::SpatialIndex;
pub use crate::core::types::{PointData, PointFactory};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, KdscanError>;
