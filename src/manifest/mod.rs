//! Manifest file discovery and parsing
//!
//! This module provides functionality to:
//! - Discover the root package.json and Yarn workspace members
//! - Parse package.json into an order-preserving document
//! - Write changed manifests back with stable formatting

mod package_json;
mod repository;

pub use package_json::Manifest;
pub use repository::{ManifestRepository, MANIFEST_FILENAME};
