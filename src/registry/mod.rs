//! Registry adapters for looking up package versions
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - npm registry adapter resolving the `latest` dist-tag

mod client;
mod npm;

pub use client::HttpClient;
pub use npm::{NpmAdapter, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Look up the version currently published as latest.
    ///
    /// Returns `Ok(None)` when the registry does not know the package.
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError>;
}
