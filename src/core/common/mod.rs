// src/core/common/mod.rs

//! Common error types shared across the crate.

pub mod error;

pub use error::KdscanError;
