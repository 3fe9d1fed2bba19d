// src/core/clustering/mod.rs

//! Density-based clustering built on the spatial index's range queries.

pub mod dbscan;

pub use dbscan::{cluster, dbscan, DbscanResult, Label};
