//! Target version resolution

use crate::domain::VersionRange;
use crate::error::UpdateError;
use crate::registry::RegistryAdapter;
use tracing::debug;

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Given on the command line
    Explicit,
    /// Looked up from the registry's latest tag
    Registry,
}

/// The version to write, before per-site operator handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub range: VersionRange,
    pub source: VersionSource,
}

impl ResolvedVersion {
    /// Creates a ResolvedVersion from an explicit version string
    pub fn explicit(raw: &str) -> Self {
        Self {
            range: VersionRange::parse(raw),
            source: VersionSource::Explicit,
        }
    }

    /// Creates a ResolvedVersion from a registry version
    pub fn from_registry(version: &str) -> Self {
        Self {
            range: VersionRange::parse(version),
            source: VersionSource::Registry,
        }
    }

    /// Returns true if the version was fetched from the registry
    pub fn is_from_registry(&self) -> bool {
        self.source == VersionSource::Registry
    }
}

/// Decides which version a package is updated to
pub struct VersionResolver<'a> {
    registry: &'a dyn RegistryAdapter,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver backed by `registry`
    pub fn new(registry: &'a dyn RegistryAdapter) -> Self {
        Self { registry }
    }

    /// Resolve the version for `package`.
    ///
    /// A non-blank explicit version is used verbatim; otherwise the registry's
    /// latest version is fetched.
    pub async fn resolve(
        &self,
        package: &str,
        explicit: Option<&str>,
    ) -> Result<ResolvedVersion, UpdateError> {
        if let Some(raw) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
            debug!(package, version = raw, "using explicit version");
            return Ok(ResolvedVersion::explicit(raw));
        }

        let latest = self.registry.latest_version(package).await?;
        match latest.as_deref().map(str::trim) {
            Some(version) if !version.is_empty() => {
                debug!(package, version, registry = self.registry.registry_name(), "resolved latest version");
                Ok(ResolvedVersion::from_registry(version))
            }
            _ => Err(UpdateError::version_not_found(package)),
        }
    }
}
