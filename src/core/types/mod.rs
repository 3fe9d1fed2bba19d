// src/core/types/mod.rs

//! Point data types shared by the index and the clustering engine.

use crate::core::common::KdscanError;
use serde::{Deserialize, Serialize};

/// A fixed-length ordered sequence of real-valued coordinates.
///
/// The dimension is set at construction and is invariant for the lifetime of
/// any index built over the point. Coordinate identity is positional: two
/// points with equal coordinates are still distinct entries in an index,
/// distinguished by their original input position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    /// Number of coordinates in `data`.
    pub dimension: u32,
    /// The coordinates themselves.
    pub data: Vec<f32>,
}

impl PointData {
    /// Creates a new point, returning `None` if `data.len()` disagrees with
    /// `dimension`.
    #[must_use]
    pub fn new(dimension: u32, data: Vec<f32>) -> Option<Self> {
        if data.len() == dimension as usize {
            Some(Self { dimension, data })
        } else {
            None
        }
    }

    /// Builds a point from a raw coordinate row, taking the dimension from
    /// the row's length.
    #[must_use]
    pub fn from_row(row: &[f32]) -> Self {
        Self { dimension: row.len() as u32, data: row.to_vec() }
    }

    /// Check if the point is valid (no NaN or infinite coordinates).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.data.iter().all(|&x| x.is_finite())
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Returns `None` on dimension disagreement. Squared form is the one the
    /// index traversals compare; `sqrt` happens only at API boundaries.
    #[must_use]
    pub fn distance_sq(&self, other: &Self) -> Option<f32> {
        if self.dimension != other.dimension {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f32>(),
        )
    }

    /// Euclidean distance to another point, or `None` on dimension
    /// disagreement.
    #[must_use]
    pub fn euclidean_distance(&self, other: &Self) -> Option<f32> {
        self.distance_sq(other).map(f32::sqrt)
    }
}

/// Factory for validated point construction.
pub struct PointFactory;

impl PointFactory {
    /// Create a new point with validation.
    ///
    /// # Errors
    /// Returns `KdscanError::DimensionMismatch` if the data length doesn't
    /// match the dimension, or `KdscanError::InvalidInput` if the point
    /// contains NaN or infinite coordinates.
    pub fn create_point(dimension: u32, data: Vec<f32>) -> Result<PointData, KdscanError> {
        let data_len = data.len();
        let point = PointData::new(dimension, data).ok_or(KdscanError::DimensionMismatch {
            expected: dimension as usize,
            found: data_len,
        })?;

        if !point.is_valid() {
            return Err(KdscanError::InvalidInput {
                message: "Point contains invalid coordinates (NaN or infinite)".to_string(),
            });
        }

        Ok(point)
    }

    /// Create a random point with coordinates in [-1, 1) (for benchmarks and
    /// property tests).
    ///
    /// # Errors
    /// Returns `KdscanError::InvalidParameter` if dimension is 0.
    pub fn create_random_point(dimension: u32) -> Result<PointData, KdscanError> {
        if dimension == 0 {
            return Err(KdscanError::InvalidParameter(
                "Point dimension must be greater than 0".to_string(),
            ));
        }

        use rand::Rng;
        let mut rng = rand::thread_rng();
        let data: Vec<f32> = (0..dimension).map(|_| rng.gen_range(-1.0..1.0)).collect();

        Self::create_point(dimension, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_construction() {
        assert!(PointData::new(2, vec![1.0, 2.0]).is_some());
        assert!(PointData::new(3, vec![1.0, 2.0]).is_none());
    }

    #[test]
    fn test_point_validation() {
        let valid = PointFactory::create_point(2, vec![1.0, 2.0]).unwrap();
        assert!(valid.is_valid());

        let nan = PointData::new(2, vec![f32::NAN, 2.0]).unwrap();
        assert!(!nan.is_valid());
        assert!(matches!(
            PointFactory::create_point(2, vec![f32::NAN, 2.0]),
            Err(KdscanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_euclidean_distance() {
        let a = PointData::new(2, vec![0.0, 0.0]).unwrap();
        let b = PointData::new(2, vec![3.0, 4.0]).unwrap();
        assert_relative_eq!(a.euclidean_distance(&b).unwrap(), 5.0, epsilon = 1e-6);

        let c = PointData::new(3, vec![0.0, 0.0, 0.0]).unwrap();
        assert!(a.euclidean_distance(&c).is_none());
    }

    #[test]
    fn test_factory_create_random_point() {
        let point = PointFactory::create_random_point(10).unwrap();
        assert_eq!(point.dimension, 10);
        assert!(point.is_valid());

        assert!(matches!(
            PointFactory::create_random_point(0),
            Err(KdscanError::InvalidParameter(_))
        ));
    }
}
