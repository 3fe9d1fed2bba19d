// src/core/clustering/dbscan.rs

//! DBSCAN: worklist-driven density clustering over a spatial index.
//!
//! The only spatial primitive consumed is `SpatialIndex::range_query`; the
//! engine itself is a per-point label state machine plus a FIFO worklist that
//! expands each discovered cluster until no reachable point remains.

use std::collections::VecDeque;

use crate::core::common::KdscanError;
use crate::core::indexing::kdtree::KdTreeIndex;
use crate::core::indexing::SpatialIndex;
use serde::{Deserialize, Serialize};

/// Noise sentinel used in integer label output.
pub const NOISE_LABEL: i64 = -1;

/// Per-point classification state.
///
/// Legal transitions: `Unvisited -> Noise`, `Unvisited -> Cluster(id)`, and
/// `Noise -> Cluster(id)` when a point first judged sparse turns out to be a
/// border point of a cluster found later. There is no transition out of
/// `Cluster`. `Unvisited` never survives a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Not yet examined by the outer scan or any expansion.
    Unvisited,
    /// Neither a core point nor (so far) reachable from one.
    Noise,
    /// Member of the cluster with this id; ids are contiguous from 0 in
    /// discovery order.
    Cluster(usize),
}

impl Label {
    /// Integer form: `Noise` maps to [`NOISE_LABEL`], `Cluster(id)` to `id`.
    ///
    /// # Panics
    /// Panics on `Unvisited`, which a completed run never produces.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Unvisited => unreachable!("Unvisited label escaped a completed clustering run"),
            Self::Noise => NOISE_LABEL,
            Self::Cluster(id) => id as i64,
        }
    }
}

/// Outcome of a clustering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbscanResult {
    /// One label per input point, in input order.
    pub labels: Vec<Label>,
    /// Number of clusters found; cluster ids are `0..cluster_count`.
    pub cluster_count: usize,
}

impl DbscanResult {
    /// The labels as integers, with `Noise` mapped to [`NOISE_LABEL`].
    #[must_use]
    pub fn cluster_labels(&self) -> Vec<i64> {
        self.labels.iter().map(|label| label.as_i64()).collect()
    }
}

/// Runs DBSCAN over the points held by `index`.
///
/// Scans points in input order; each still-unvisited point's eps-neighborhood
/// decides whether it seeds a new cluster (at least `min_pts` members,
/// itself included) or is provisionally noise. A seeded cluster expands
/// through a FIFO worklist: popped noise points are promoted as border
/// points, popped unvisited points join the cluster and, when themselves
/// core, enqueue their not-yet-enqueued unvisited neighbors. Each index
/// enters the worklist at most once per run, so the expansion performs at
/// most one range query per point overall.
///
/// # Errors
/// `InvalidParameter` if `eps` is not finite and positive or `min_pts` is 0,
/// before any computation begins. Query errors from the index propagate.
pub fn dbscan<I: SpatialIndex>(
    index: &I,
    eps: f32,
    min_pts: usize,
) -> Result<DbscanResult, KdscanError> {
    if !eps.is_finite() || eps <= 0.0 {
        return Err(KdscanError::InvalidParameter(format!(
            "eps must be finite and positive, got {eps}."
        )));
    }
    if min_pts < 1 {
        return Err(KdscanError::InvalidParameter("min_pts must be at least 1.".to_string()));
    }

    let n = index.len();
    let mut labels = vec![Label::Unvisited; n];
    // Guards against re-enqueueing an index. Monotone across clusters: every
    // enqueued index is resolved to Cluster(_) before its worklist drains.
    let mut enqueued = vec![false; n];
    let mut worklist: VecDeque<usize> = VecDeque::new();
    let mut cluster_id = 0usize;

    for i in 0..n {
        if labels[i] != Label::Unvisited {
            continue;
        }

        let neighbors = index.range_query(index.point(i), eps)?;
        if neighbors.len() < min_pts {
            // Provisional: may still be reclaimed as a border point later.
            labels[i] = Label::Noise;
            continue;
        }

        // Core point: seed a new cluster with its neighborhood (minus itself).
        labels[i] = Label::Cluster(cluster_id);
        for &j in &neighbors {
            if j != i && !enqueued[j] {
                enqueued[j] = true;
                worklist.push_back(j);
            }
        }

        while let Some(q) = worklist.pop_front() {
            match labels[q] {
                Label::Cluster(_) => continue,
                Label::Noise => {
                    // Border point: joins the cluster, no expansion from it.
                    labels[q] = Label::Cluster(cluster_id);
                }
                Label::Unvisited => {
                    labels[q] = Label::Cluster(cluster_id);
                    let reachable = index.range_query(index.point(q), eps)?;
                    if reachable.len() < min_pts {
                        continue;
                    }
                    for &j in &reachable {
                        match labels[j] {
                            Label::Noise => labels[j] = Label::Cluster(cluster_id),
                            Label::Unvisited if !enqueued[j] => {
                                enqueued[j] = true;
                                worklist.push_back(j);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        cluster_id += 1;
    }

    Ok(DbscanResult { labels, cluster_count: cluster_id })
}

/// One-shot convenience: builds a KD-tree index over `rows` and clusters it,
/// returning integer labels with `Noise` mapped to [`NOISE_LABEL`].
///
/// # Errors
/// Build errors from [`KdTreeIndex::build_from_rows`] and parameter errors
/// from [`dbscan`].
pub fn cluster(rows: &[Vec<f32>], eps: f32, min_pts: usize) -> Result<Vec<i64>, KdscanError> {
    let index = KdTreeIndex::build_from_rows(rows)?;
    Ok(dbscan(&index, eps, min_pts)?.cluster_labels())
}
