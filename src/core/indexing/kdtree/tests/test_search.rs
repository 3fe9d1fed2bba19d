// src/core/indexing/kdtree/tests/test_search.rs

use approx::assert_relative_eq;

use crate::core::indexing::kdtree::builder::build_kdtree;
use crate::core::indexing::kdtree::error::KdTreeError;
use crate::core::indexing::kdtree::search::{find_knn, range_query};
use crate::core::types::{PointData, PointFactory};

// Helper to create PointData easily
fn point(data: Vec<f32>) -> PointData {
    let dim = data.len() as u32;
    PointData::new(dim, data).unwrap()
}

/// Brute-force reference: indices of all points within `radius` of `query`.
fn brute_force_range(points: &[PointData], query: &PointData, radius: f32) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.distance_sq(query).unwrap() <= radius * radius)
        .map(|(i, _)| i)
        .collect()
}

/// Brute-force reference: top-k by (distance, index).
fn brute_force_knn(points: &[PointData], query: &PointData, k: usize) -> Vec<(usize, f32)> {
    // Order by squared distance, exactly as the index does, so tie-breaks
    // agree bit-for-bit.
    let mut all: Vec<(usize, f32)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance_sq(query).unwrap()))
        .collect();
    all.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    all.truncate(k);
    all.into_iter().map(|(i, d)| (i, d.sqrt())).collect()
}

#[test]
fn test_range_query_empty_tree() {
    let tree = build_kdtree(&[], 2).unwrap();
    let query = point(vec![1.0, 1.0]);
    let hits = range_query(&tree, &query, 1.0, &[]).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_range_query_simple_2d() {
    // Points: (7,2), (5,4), (9,6), (4,7), (8,1), (2,3)
    let points = vec![
        point(vec![7.0, 2.0]), // 0
        point(vec![5.0, 4.0]), // 1
        point(vec![9.0, 6.0]), // 2
        point(vec![4.0, 7.0]), // 3
        point(vec![8.0, 1.0]), // 4
        point(vec![2.0, 3.0]), // 5
    ];
    let tree = build_kdtree(&points, 2).unwrap();

    let query = point(vec![7.0, 2.0]);
    let mut hits = range_query(&tree, &query, 4.0, &points).unwrap();
    hits.sort_unstable();
    // Within 4 of (7,2): itself, (5,4) at sqrt(8), (8,1) at sqrt(2),
    // (9,6) is sqrt(20) > 4, (4,7) is sqrt(34), (2,3) is sqrt(26).
    assert_eq!(hits, vec![0, 1, 4]);
}

#[test]
fn test_range_query_radius_zero_returns_coordinate_duplicates() {
    let points = vec![
        point(vec![1.0, 1.0]), // 0: duplicate
        point(vec![2.0, 2.0]), // 1
        point(vec![1.0, 1.0]), // 2: duplicate
        point(vec![1.0, 1.0]), // 3: duplicate
        point(vec![0.0, 5.0]), // 4
    ];
    let tree = build_kdtree(&points, 2).unwrap();

    let query = point(vec![1.0, 1.0]);
    let mut hits = range_query(&tree, &query, 0.0, &points).unwrap();
    hits.sort_unstable();
    // All duplicates come back as distinct identities, nothing else.
    assert_eq!(hits, vec![0, 2, 3]);
}

#[test]
fn test_range_query_radius_zero_unindexed_query_point() {
    let points = vec![point(vec![1.0, 1.0]), point(vec![2.0, 2.0])];
    let tree = build_kdtree(&points, 2).unwrap();

    let hits = range_query(&tree, &point(vec![3.0, 3.0]), 0.0, &points).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_range_query_dimension_mismatch() {
    let points = vec![point(vec![1.0, 2.0])];
    let tree = build_kdtree(&points, 2).unwrap();

    let query = point(vec![1.0, 2.0, 3.0]);
    let result = range_query(&tree, &query, 1.0, &points);
    assert!(matches!(result, Err(KdTreeError::DimensionMismatch { expected: 2, found: 3 })));
}

#[test]
fn test_range_query_invalid_radius() {
    let points = vec![point(vec![1.0, 2.0])];
    let tree = build_kdtree(&points, 2).unwrap();
    let query = point(vec![1.0, 2.0]);

    assert!(matches!(
        range_query(&tree, &query, -1.0, &points),
        Err(KdTreeError::InvalidParameter(_))
    ));
    assert!(matches!(
        range_query(&tree, &query, f32::NAN, &points),
        Err(KdTreeError::InvalidParameter(_))
    ));
}

#[test]
fn test_range_query_matches_brute_force_on_random_clouds() {
    for &dim in &[1u32, 2, 3, 5] {
        let points: Vec<PointData> =
            (0..300).map(|_| PointFactory::create_random_point(dim).unwrap()).collect();
        let tree = build_kdtree(&points, dim).unwrap();

        for _ in 0..25 {
            let query = PointFactory::create_random_point(dim).unwrap();
            for &radius in &[0.0f32, 0.1, 0.5, 1.0] {
                let mut hits = range_query(&tree, &query, radius, &points).unwrap();
                hits.sort_unstable();
                assert_eq!(hits, brute_force_range(&points, &query, radius));
            }
        }
    }
}

#[test]
fn test_find_knn_empty_tree() {
    let tree = build_kdtree(&[], 2).unwrap();
    let query = point(vec![1.0, 1.0]);
    let results = find_knn(&tree, &query, 1, &[]).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_find_knn_exact_match() {
    let points = vec![point(vec![1.0, 2.0]), point(vec![5.0, 5.0])];
    let tree = build_kdtree(&points, 2).unwrap();

    let results = find_knn(&tree, &point(vec![5.0, 5.0]), 1, &points).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, 1);
    assert_eq!(results[0].1, 0.0);
}

#[test]
fn test_find_knn_k_greater_than_points() {
    let points = vec![point(vec![1.0, 2.0]), point(vec![5.0, 5.0])];
    let tree = build_kdtree(&points, 2).unwrap();

    let results = find_knn(&tree, &point(vec![0.0, 0.0]), 5, &points).unwrap();
    assert_eq!(results.len(), 2); // Should return all points

    let dist_p0 = (1.0f32.powi(2) + 2.0f32.powi(2)).sqrt(); // sqrt(5)
    let dist_p1 = (5.0f32.powi(2) + 5.0f32.powi(2)).sqrt(); // sqrt(50)
    assert_eq!(results[0].0, 0);
    assert_relative_eq!(results[0].1, dist_p0, epsilon = 1e-6);
    assert_eq!(results[1].0, 1);
    assert_relative_eq!(results[1].1, dist_p1, epsilon = 1e-6);
}

#[test]
fn test_find_knn_simple_2d() {
    // Points: (2,3), (5,4), (9,6), (4,7), (8,1), (7,2); query (6,3).
    let points = vec![
        point(vec![2.0, 3.0]), // 0: dist 4
        point(vec![5.0, 4.0]), // 1: dist sqrt(2)
        point(vec![9.0, 6.0]), // 2: dist sqrt(18)
        point(vec![4.0, 7.0]), // 3: dist sqrt(20)
        point(vec![8.0, 1.0]), // 4: dist sqrt(8)
        point(vec![7.0, 2.0]), // 5: dist sqrt(2)
    ];
    let tree = build_kdtree(&points, 2).unwrap();

    let results = find_knn(&tree, &point(vec![6.0, 3.0]), 3, &points).unwrap();
    assert_eq!(results.len(), 3);

    // 1 and 5 tie at sqrt(2); by-index tie-break puts 1 first.
    let dist_tied = 2.0f32.sqrt();
    assert_eq!(results[0].0, 1);
    assert_relative_eq!(results[0].1, dist_tied, epsilon = 1e-6);
    assert_eq!(results[1].0, 5);
    assert_relative_eq!(results[1].1, dist_tied, epsilon = 1e-6);
    assert_eq!(results[2].0, 4);
    assert_relative_eq!(results[2].1, 8.0f32.sqrt(), epsilon = 1e-6);
}

#[test]
fn test_find_knn_boundary_tie_kept_by_index() {
    // Points 1 and 2 tie at distance 1 from the query with k = 2: the lower
    // index must win the final slot.
    let points = vec![
        point(vec![0.0, 0.0]), // 0: dist 0
        point(vec![1.0, 0.0]), // 1: dist 1
        point(vec![-1.0, 0.0]), // 2: dist 1
    ];
    let tree = build_kdtree(&points, 2).unwrap();

    let results = find_knn(&tree, &point(vec![0.0, 0.0]), 2, &points).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, 0);
    assert_eq!(results[1].0, 1);
}

#[test]
fn test_find_knn_k_zero_is_invalid() {
    let points = vec![point(vec![1.0, 2.0])];
    let tree = build_kdtree(&points, 2).unwrap();

    let result = find_knn(&tree, &point(vec![1.0, 2.0]), 0, &points);
    assert!(matches!(result, Err(KdTreeError::InvalidParameter(_))));
}

#[test]
fn test_find_knn_query_dimension_mismatch() {
    let points = vec![point(vec![1.0, 2.0])];
    let tree = build_kdtree(&points, 2).unwrap();

    let result = find_knn(&tree, &point(vec![1.0, 2.0, 3.0]), 1, &points);
    assert!(matches!(result, Err(KdTreeError::DimensionMismatch { .. })));
}

#[test]
fn test_find_knn_matches_brute_force_on_random_clouds() {
    for &dim in &[2u32, 4] {
        let points: Vec<PointData> =
            (0..250).map(|_| PointFactory::create_random_point(dim).unwrap()).collect();
        let tree = build_kdtree(&points, dim).unwrap();

        for _ in 0..20 {
            let query = PointFactory::create_random_point(dim).unwrap();
            for &k in &[1usize, 3, 10, 250, 400] {
                let results = find_knn(&tree, &query, k, &points).unwrap();
                let expected = brute_force_knn(&points, &query, k);
                assert_eq!(results.len(), expected.len());
                for (got, want) in results.iter().zip(expected.iter()) {
                    assert_eq!(got.0, want.0);
                    assert_relative_eq!(got.1, want.1, epsilon = 1e-4);
                }
            }
        }
    }
}
