// src/core/indexing/kdtree/error.rs

use std::fmt;

/// Custom error types for KD-Tree operations.
#[derive(Debug)]
pub enum KdTreeError {
    /// Point or query dimensions are inconsistent.
    DimensionMismatch { expected: usize, found: usize },
    /// A query parameter is outside its legal domain.
    InvalidParameter(String),
    /// An invariant violation inside the tree, e.g. a stale point index.
    InternalError(String),
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => {
                write!(f, "KD-Tree Dimension Mismatch: expected {expected}, found {found}")
            }
            Self::InvalidParameter(msg) => write!(f, "KD-Tree Invalid Parameter: {msg}"),
            Self::InternalError(msg) => write!(f, "KD-Tree Internal Error: {msg}"),
        }
    }
}

impl std::error::Error for KdTreeError {}
