//! npm Registry adapter
//!
//! Resolves the `latest` dist-tag of a package from its packument.
//! API endpoint: {registry}/{package}, with the `/` of scoped names encoded.

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package metadata response
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    /// Tag name to version, e.g. `latest`, `next`
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

impl NpmAdapter {
    /// Create a new npm adapter for the registry at `base_url`
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            package.replace('/', "%2f")
        )
    }

    fn latest_from(
        &self,
        response: NpmPackageResponse,
        package: &str,
    ) -> Result<Option<String>, RegistryError> {
        let Some(latest) = response.dist_tags.get("latest") else {
            return Ok(None);
        };

        semver::Version::parse(latest).map_err(|e| {
            RegistryError::invalid_response(
                package,
                self.registry_name(),
                format!("latest version '{}' is not valid semver: {}", latest, e),
            )
        })?;
        Ok(Some(latest.clone()))
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        let url = self.build_url(package);
        debug!(%url, "fetching packument");

        let response: NpmPackageResponse = match self
            .client
            .get_json(&url, package, self.registry_name())
            .await
        {
            Ok(response) => response,
            Err(RegistryError::PackageNotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        self.latest_from(response, package)
    }
}
