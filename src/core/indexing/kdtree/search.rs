// src/core/indexing/kdtree/search.rs

//! Range and k-nearest-neighbor traversals over a built KD-Tree.

use super::error::KdTreeError;
use super::heap::BoundedNeighborHeap;
use super::tree::{KdTree, NodeId};
use crate::core::types::PointData;

/// Collects the original indices of every indexed point within `radius`
/// (inclusive) of `query`.
///
/// At every node the traversal descends the child on the query's side of the
/// splitting plane; the far child is visited only when the perpendicular
/// distance from the query to the plane is at most `radius`. The inclusive
/// comparison matters: with radius 0, coordinate-duplicates of the query that
/// ended up across a median split sit at plane distance exactly 0 and must
/// still be found.
///
/// # Errors
/// `DimensionMismatch` if the query dimension differs from the tree's,
/// `InvalidParameter` if `radius` is negative or not finite.
pub fn range_query(
    tree: &KdTree,
    query: &PointData,
    radius: f32,
    points: &[PointData],
) -> Result<Vec<usize>, KdTreeError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(KdTreeError::InvalidParameter(format!(
            "Range query radius must be finite and non-negative, got {radius}."
        )));
    }
    let Some(root) = tree.root() else {
        return Ok(Vec::new()); // Empty tree
    };
    if query.dimension != tree.dimension() {
        return Err(KdTreeError::DimensionMismatch {
            expected: tree.dimension() as usize,
            found: query.dimension as usize,
        });
    }
    check_point_store(tree, points)?;

    let mut hits = Vec::new();
    let radius_sq = radius * radius;
    range_recursive(tree, root, query, radius, radius_sq, points, &mut hits);
    Ok(hits)
}

fn range_recursive(
    tree: &KdTree,
    node_id: NodeId,
    query: &PointData,
    radius: f32,
    radius_sq: f32,
    points: &[PointData],
    hits: &mut Vec<usize>,
) {
    let node = tree.node(node_id);
    let node_point = &points[node.point_index];

    let dist_sq: f32 = query
        .data
        .iter()
        .zip(node_point.data.iter())
        .map(|(q, p)| (q - p).powi(2))
        .sum();
    if dist_sq <= radius_sq {
        hits.push(node.point_index);
    }

    let plane_distance = (query.data[node.axis] - node_point.data[node.axis]).abs();
    let (near, far) = if query.data[node.axis] <= node_point.data[node.axis] {
        (node.left, node.right)
    } else {
        (node.right, node.left)
    };

    if let Some(near_id) = near {
        range_recursive(tree, near_id, query, radius, radius_sq, points, hits);
    }
    if plane_distance <= radius {
        if let Some(far_id) = far {
            range_recursive(tree, far_id, query, radius, radius_sq, points, hits);
        }
    }
}

/// Finds the `min(k, n)` points nearest to `query`.
///
/// Returns `(original_index, distance)` pairs sorted ascending by distance,
/// ties by ascending index. The far child of a node is pruned only once the
/// candidate heap is full and the splitting plane lies strictly beyond the
/// current worst retained distance; the bound tightens as the heap fills.
///
/// # Errors
/// `DimensionMismatch` if the query dimension differs from the tree's,
/// `InvalidParameter` if `k` is 0.
pub fn find_knn(
    tree: &KdTree,
    query: &PointData,
    k: usize,
    points: &[PointData],
) -> Result<Vec<(usize, f32)>, KdTreeError> {
    if k == 0 {
        return Err(KdTreeError::InvalidParameter(
            "k must be at least 1 for a nearest-neighbor query.".to_string(),
        ));
    }
    let Some(root) = tree.root() else {
        return Ok(Vec::new()); // Empty tree
    };
    if query.dimension != tree.dimension() {
        return Err(KdTreeError::DimensionMismatch {
            expected: tree.dimension() as usize,
            found: query.dimension as usize,
        });
    }
    check_point_store(tree, points)?;

    let mut best = BoundedNeighborHeap::new(k);
    knn_recursive(tree, root, query, points, &mut best);
    Ok(best.into_sorted_results())
}

fn knn_recursive(
    tree: &KdTree,
    node_id: NodeId,
    query: &PointData,
    points: &[PointData],
    best: &mut BoundedNeighborHeap,
) {
    let node = tree.node(node_id);
    let node_point = &points[node.point_index];

    let dist_sq: f32 = query
        .data
        .iter()
        .zip(node_point.data.iter())
        .map(|(q, p)| (q - p).powi(2))
        .sum();
    best.try_admit(dist_sq, node.point_index);

    let plane_distance_sq = (query.data[node.axis] - node_point.data[node.axis]).powi(2);
    let (near, far) = if query.data[node.axis] <= node_point.data[node.axis] {
        (node.left, node.right)
    } else {
        (node.right, node.left)
    };

    if let Some(near_id) = near {
        knn_recursive(tree, near_id, query, points, best);
    }

    // The k-th neighbor may lie exactly on the splitting plane, hence <=.
    let must_visit_far = best.has_room()
        || best.worst_distance_sq().map_or(true, |worst| plane_distance_sq <= worst);
    if must_visit_far {
        if let Some(far_id) = far {
            knn_recursive(tree, far_id, query, points, best);
        }
    }
}

/// A tree whose nodes reference points beyond the supplied store is stale.
fn check_point_store(tree: &KdTree, points: &[PointData]) -> Result<(), KdTreeError> {
    if tree.node_count() > points.len() {
        return Err(KdTreeError::InternalError(format!(
            "Tree holds {} nodes but only {} points were supplied.",
            tree.node_count(),
            points.len()
        )));
    }
    Ok(())
}
