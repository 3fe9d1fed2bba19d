// src/core/mod.rs

//! Core modules: shared types, error handling, spatial indexing, clustering.

pub mod clustering;
pub mod common;
pub mod indexing;
pub mod types;
