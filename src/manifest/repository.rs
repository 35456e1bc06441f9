//! Manifest discovery, reading and writing
//!
//! This module provides:
//! - Discovery of the root package.json and its workspace members
//! - Reading manifests into [`Manifest`] documents
//! - Writing changed manifests back (skipped in dry-run mode)

use crate::error::ManifestError;
use crate::manifest::Manifest;
use glob::{glob, Pattern};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of a manifest
pub const MANIFEST_FILENAME: &str = "package.json";

/// Access to the manifests of one project directory
#[derive(Debug, Clone)]
pub struct ManifestRepository {
    /// Project root holding the root package.json
    root: PathBuf,
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl ManifestRepository {
    /// Create a repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Path of the root package.json
    pub fn root_manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    /// List the root manifest followed by every workspace member manifest.
    ///
    /// Members are appended in pattern declaration order and in glob order
    /// within each pattern. A path is listed once even if several patterns
    /// match it.
    pub fn discover_manifest_paths(&self) -> Result<Vec<PathBuf>, ManifestError> {
        let root_path = self.root_manifest_path();
        let root_manifest = self.read_manifest(&root_path)?;

        let mut seen = HashSet::new();
        seen.insert(identity(&root_path));
        let mut paths = vec![root_path.clone()];

        for workspace_pattern in root_manifest.workspace_patterns() {
            let pattern = self.member_glob(&root_path, &workspace_pattern)?;
            let matches = glob(&pattern).map_err(|e| ManifestError::InvalidWorkspacePattern {
                path: root_path.clone(),
                pattern: workspace_pattern.clone(),
                message: e.to_string(),
            })?;

            for entry in matches {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        warn!(
                            pattern = %workspace_pattern,
                            path = %e.path().display(),
                            error = %e.error(),
                            "skipping unreadable workspace path"
                        );
                        continue;
                    }
                };
                if seen.insert(identity(&path)) {
                    debug!(pattern = %workspace_pattern, path = %path.display(), "found workspace manifest");
                    paths.push(path);
                }
            }
        }

        Ok(paths)
    }

    /// Read and parse the manifest at `path`
    pub fn read_manifest(&self, path: &Path) -> Result<Manifest, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::from_read(path, e))?;
        Manifest::parse(path, &content)
    }

    /// Read every discovered manifest, in discovery order
    pub fn load_all(&self) -> Result<Vec<Manifest>, ManifestError> {
        self.discover_manifest_paths()?
            .iter()
            .map(|path| self.read_manifest(path))
            .collect()
    }

    /// Overwrite the manifest's file with its serialized content
    pub fn write_manifest(&self, manifest: &Manifest) -> Result<(), ManifestError> {
        let content = manifest.to_json_string()?;
        if self.dry_run {
            debug!(path = %manifest.path().display(), "dry run, not writing manifest");
            return Ok(());
        }
        fs::write(manifest.path(), content)
            .map_err(|e| ManifestError::write_error(manifest.path(), e))
    }

    /// Path relative to the project root, for display
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root)
            .or_else(|_| path.strip_prefix("."))
            .unwrap_or(path)
    }

    /// Build the glob matching member manifests of one workspace pattern
    fn member_glob(&self, root_path: &Path, workspace_pattern: &str) -> Result<String, ManifestError> {
        let root = self
            .root
            .to_str()
            .ok_or_else(|| ManifestError::InvalidWorkspacePattern {
                path: root_path.to_path_buf(),
                pattern: workspace_pattern.to_string(),
                message: "project path is not valid UTF-8".to_string(),
            })?;

        let member = workspace_pattern.trim_end_matches('/');
        Ok(format!(
            "{}/{}/{}",
            Pattern::escape(root.trim_end_matches('/')),
            member,
            MANIFEST_FILENAME
        ))
    }
}

/// Key used to detect the same file reached through different paths
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
