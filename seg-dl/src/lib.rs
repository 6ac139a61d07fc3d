//! Semantic segmentation dataset adapters.

mod common;
pub mod config;
pub mod dataset;
pub mod download;
pub mod env;
pub mod error;
pub mod transform;
