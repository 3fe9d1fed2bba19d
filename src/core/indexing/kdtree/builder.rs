// src/core/indexing/kdtree/builder.rs

//! Logic for building a balanced KD-Tree from a set of points.

use std::cmp::Ordering;

use super::error::KdTreeError;
use super::tree::{KdNode, KdTree, NodeId};
use crate::core::types::PointData;

/// Where a pending subrange hangs once its median node is created.
enum ParentLink {
    Root,
    Child { parent: NodeId, right_side: bool },
}

/// Builds a balanced KD-Tree over `points`.
///
/// The tree stores indices into `points` (each point's original input
/// position); the caller keeps ownership of the coordinate data and supplies
/// it again at query time. Construction partitions an index permutation: at
/// depth `d` the split axis is `d % dimension`, the subrange is partitioned
/// around its exact median on that axis, the median element becomes the
/// node's point, and the two halves become the subtrees at depth `d + 1`.
/// Exact-median splits make the resulting depth `ceil(log2 n)` regardless of
/// input skew.
///
/// # Errors
/// `InvalidParameter` if `dimension` is 0 while points exist, or
/// `DimensionMismatch` if any point's dimension differs from `dimension`.
pub fn build_kdtree(points: &[PointData], dimension: u32) -> Result<KdTree, KdTreeError> {
    let mut tree = KdTree::new(dimension);
    if points.is_empty() {
        return Ok(tree);
    }
    if dimension == 0 {
        return Err(KdTreeError::InvalidParameter(
            "Dimension cannot be 0 for a non-empty point set.".to_string(),
        ));
    }

    // Validate all points have the expected dimension before any tree work.
    for point in points {
        if point.dimension != dimension {
            return Err(KdTreeError::DimensionMismatch {
                expected: dimension as usize,
                found: point.dimension as usize,
            });
        }
    }

    let dim = dimension as usize;
    let mut order: Vec<usize> = (0..points.len()).collect();

    // Explicit work stack over (lo, hi, depth, parent link) subranges of
    // `order`, so construction depth never depends on the call stack.
    let mut work: Vec<(usize, usize, usize, ParentLink)> =
        vec![(0, points.len(), 0, ParentLink::Root)];

    while let Some((lo, hi, depth, link)) = work.pop() {
        if lo >= hi {
            continue;
        }

        let axis = depth % dim;
        let mid = lo + (hi - lo) / 2;

        // Exact median on this axis; everything before `mid` compares at or
        // below it, everything after at or above (nth_element semantics).
        order[lo..hi].select_nth_unstable_by(mid - lo, |&l, &r| {
            points[l].data[axis].partial_cmp(&points[r].data[axis]).unwrap_or(Ordering::Equal)
        });

        let node_id =
            tree.push_node(KdNode { point_index: order[mid], axis, left: None, right: None });
        match link {
            ParentLink::Root => tree.set_root(node_id),
            ParentLink::Child { parent, right_side } => {
                tree.link_child(parent, right_side, node_id);
            }
        }

        work.push((lo, mid, depth + 1, ParentLink::Child { parent: node_id, right_side: false }));
        work.push((mid + 1, hi, depth + 1, ParentLink::Child { parent: node_id, right_side: true }));
    }

    Ok(tree)
}
