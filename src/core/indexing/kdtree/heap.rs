// src/core/indexing/kdtree/heap.rs

//! Bounded max-priority collection for k-nearest-neighbor candidates.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A k-NN candidate: `(squared_distance, point_index)`.
///
/// Squared distance is used because `BinaryHeap` is a max-heap and the search
/// needs cheap access to the current *worst* (largest-distance) candidate.
/// Ties on distance order by `point_index`, which makes the retained k-set
/// deterministic when several points sit at the admission boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub distance_sq: f32,
    pub point_index: usize,
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq
            .partial_cmp(&other.distance_sq)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.point_index.cmp(&other.point_index))
    }
}

/// A max-heap over `Neighbor` bounded to `capacity` entries.
///
/// `try_admit` implements the admission rule of bounded k-NN search: a
/// candidate enters while the heap is under capacity, or by evicting the
/// current worst entry when the candidate compares strictly better than it.
#[derive(Debug)]
pub struct BoundedNeighborHeap {
    heap: BinaryHeap<Neighbor>,
    capacity: usize,
}

impl BoundedNeighborHeap {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity.saturating_add(1)), capacity }
    }

    /// `true` while fewer than `capacity` candidates are held.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.heap.len() < self.capacity
    }

    /// Squared distance of the current worst retained candidate, `None` when
    /// the heap is empty. While the heap has room this is not a search bound:
    /// callers must keep exploring regardless.
    #[must_use]
    pub fn worst_distance_sq(&self) -> Option<f32> {
        self.heap.peek().map(|n| n.distance_sq)
    }

    /// Admits a candidate if the heap has room or the candidate beats the
    /// current worst entry (which is then evicted). Returns whether the
    /// candidate was retained.
    pub fn try_admit(&mut self, distance_sq: f32, point_index: usize) -> bool {
        let candidate = Neighbor { distance_sq, point_index };
        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
            return true;
        }
        match self.heap.peek() {
            Some(worst) if candidate < *worst => {
                self.heap.pop();
                self.heap.push(candidate);
                true
            }
            _ => false,
        }
    }

    /// Drains the heap into `(point_index, distance)` pairs sorted ascending
    /// by distance, ties by ascending index. Distances come back un-squared.
    #[must_use]
    pub fn into_sorted_results(self) -> Vec<(usize, f32)> {
        let mut neighbors = self.heap.into_vec();
        neighbors.sort_unstable();
        neighbors.into_iter().map(|n| (n.point_index, n.distance_sq.sqrt())).collect()
    }
}
