// src/core/common/error.rs

use crate::core::indexing::kdtree::KdTreeError;
use std::fmt;

/// Crate-wide error type.
///
/// All failures are deterministic argument-validation errors detected before
/// any partial work is performed, so no variant carries partial-state cleanup
/// concerns.
#[derive(Debug)]
pub enum KdscanError {
    /// Point or query dimensions are inconsistent with the index's dimension.
    DimensionMismatch { expected: usize, found: usize },
    /// A parameter is outside its legal domain (eps, radius, k, min_pts).
    InvalidParameter(String),
    /// Input data is malformed (e.g. NaN or infinite coordinates).
    InvalidInput { message: String },
    /// An index-level failure.
    Index(String),
    /// An invariant violation inside the crate.
    Internal(String),
}

impl fmt::Display for KdscanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => {
                write!(f, "Dimension Mismatch: expected {expected}, found {found}")
            }
            Self::InvalidParameter(s) => write!(f, "Invalid Parameter: {s}"),
            Self::InvalidInput { message } => write!(f, "Invalid input: {message}"),
            Self::Index(s) => write!(f, "Index Error: {s}"),
            Self::Internal(s) => write!(f, "Internal Error: {s}"),
        }
    }
}

impl std::error::Error for KdscanError {}

impl From<KdTreeError> for KdscanError {
    fn from(err: KdTreeError) -> Self {
        match err {
            KdTreeError::DimensionMismatch { expected, found } => {
                Self::DimensionMismatch { expected, found }
            }
            KdTreeError::InvalidParameter(msg) => Self::InvalidParameter(msg),
            KdTreeError::InternalError(msg) => Self::Index(msg),
        }
    }
}
