//! Applying a resolved version to manifests

use crate::domain::{DependencyChange, DependencyKind};
use crate::error::ManifestError;
use crate::manifest::{Manifest, ManifestRepository};
use crate::update::ResolvedVersion;
use std::path::PathBuf;
use tracing::debug;

/// Files and sites touched by one rewrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteResult {
    /// Changed manifests, in manifest order
    pub changed_paths: Vec<PathBuf>,
    /// Every rewritten dependency entry
    pub changes: Vec<DependencyChange>,
}

impl RewriteResult {
    /// Returns true if no manifest was touched
    pub fn is_empty(&self) -> bool {
        self.changed_paths.is_empty()
    }
}

/// Rewrite every section of `manifest` that references `package`
pub fn rewrite_manifest(
    manifest: &mut Manifest,
    package: &str,
    resolved: &ResolvedVersion,
) -> Vec<DependencyChange> {
    let mut changes = Vec::new();

    for kind in DependencyKind::ALL {
        let Some(existing) = manifest.dependency(kind, package) else {
            continue;
        };
        let new_range = resolved.range.write_over(existing);
        if let Some(old_range) = manifest.set_dependency(kind, package, new_range.clone()) {
            changes.push(DependencyChange::new(
                manifest.path(),
                kind,
                old_range,
                new_range,
            ));
        }
    }

    changes
}

/// Applies resolved versions and persists changed manifests
pub struct DependencyRewriter<'a> {
    repository: &'a ManifestRepository,
}

impl<'a> DependencyRewriter<'a> {
    /// Create a rewriter writing through `repository`
    pub fn new(repository: &'a ManifestRepository) -> Self {
        Self { repository }
    }

    /// Set `package` to `resolved` in every manifest referencing it.
    ///
    /// Only manifests with at least one touched section are written.
    pub fn apply_version(
        &self,
        manifests: &mut [Manifest],
        package: &str,
        resolved: &ResolvedVersion,
    ) -> Result<RewriteResult, ManifestError> {
        let mut result = RewriteResult::default();

        for manifest in manifests.iter_mut() {
            let changes = rewrite_manifest(manifest, package, resolved);
            if changes.is_empty() {
                continue;
            }

            debug!(path = %manifest.path().display(), sites = changes.len(), "rewrote manifest");
            self.repository.write_manifest(manifest)?;
            result.changed_paths.push(manifest.path().to_path_buf());
            result.changes.extend(changes);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn manifest(content: &str) -> Manifest {
        Manifest::parse("package.json", content).unwrap()
    }

    fn rewrite(content: &str, version: &str) -> (Manifest, Vec<DependencyChange>) {
        let mut manifest = manifest(content);
        let changes = rewrite_manifest(&mut manifest, "left-pad", &ResolvedVersion::explicit(version));
        (manifest, changes)
    }

    #[test]
    fn test_caret_is_preserved() {
        let (manifest, changes) = rewrite(r#"{"dependencies":{"left-pad":"^1.0.0"}}"#, "2.0.0");
        assert_eq!(
            manifest.dependency(DependencyKind::Dependencies, "left-pad"),
            Some("^2.0.0")
        );
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old_range, "^1.0.0");
        assert_eq!(changes[0].new_range, "^2.0.0");
    }

    #[test]
    fn test_exact_stays_exact() {
        let (manifest, _) = rewrite(r#"{"dependencies":{"left-pad":"1.0.0"}}"#, "2.0.0");
        assert_eq!(
            manifest.dependency(DependencyKind::Dependencies, "left-pad"),
            Some("2.0.0")
        );
    }

    #[test]
    fn test_explicit_operator_overrides() {
        let (manifest, _) = rewrite(r#"{"dependencies":{"left-pad":"^1.0.0"}}"#, "~2.0.0");
        assert_eq!(
            manifest.dependency(DependencyKind::Dependencies, "left-pad"),
            Some("~2.0.0")
        );
    }

    #[test]
    fn test_operator_preserved_per_section() {
        let (manifest, changes) = rewrite(
            r#"{
  "dependencies": {"left-pad": "~1.0.0"},
  "devDependencies": {"left-pad": "1.0.0"},
  "peerDependencies": {"left-pad": "^1.0.0"}
}"#,
            "2.0.0",
        );
        assert_eq!(
            manifest.dependency(DependencyKind::Dependencies, "left-pad"),
            Some("~2.0.0")
        );
        assert_eq!(
            manifest.dependency(DependencyKind::DevDependencies, "left-pad"),
            Some("2.0.0")
        );
        assert_eq!(
            manifest.dependency(DependencyKind::PeerDependencies, "left-pad"),
            Some("^2.0.0")
        );
        let kinds: Vec<_> = changes.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, DependencyKind::ALL.to_vec());
    }

    #[test]
    fn test_absent_package_is_untouched() {
        let (_, changes) = rewrite(r#"{"dependencies":{"right-pad":"^1.0.0"}}"#, "2.0.0");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_same_version_still_counts_as_touched() {
        let (_, changes) = rewrite(r#"{"dependencies":{"left-pad":"^2.0.0"}}"#, "2.0.0");
        assert_eq!(changes.len(), 1);
        assert!(!changes[0].is_modification());
    }

    #[test]
    fn test_apply_version_writes_only_changed_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("package.json"),
            "{\"workspaces\": [\"packages/*\"], \"dependencies\": {\"left-pad\": \"^1.0.0\"}}\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("packages/a")).unwrap();
        let untouched = "{ \"name\": \"a\",   \"dependencies\": { \"right-pad\": \"1.0.0\" } }";
        fs::write(root.join("packages/a/package.json"), untouched).unwrap();

        let repository = ManifestRepository::new(root);
        let mut manifests = repository.load_all().unwrap();
        let result = DependencyRewriter::new(&repository)
            .apply_version(&mut manifests, "left-pad", &ResolvedVersion::explicit("2.0.0"))
            .unwrap();

        assert_eq!(result.changed_paths, vec![root.join("package.json")]);
        assert_eq!(
            fs::read_to_string(root.join("package.json")).unwrap(),
            "{\n  \"workspaces\": [\n    \"packages/*\"\n  ],\n  \"dependencies\": {\n    \"left-pad\": \"^2.0.0\"\n  }\n}\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("packages/a/package.json")).unwrap(),
            untouched
        );
    }

    #[test]
    fn test_apply_version_dry_run_reports_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let original = "{\"dependencies\": {\"left-pad\": \"^1.0.0\"}}";
        fs::write(temp_dir.path().join("package.json"), original).unwrap();

        let repository = ManifestRepository::new(temp_dir.path()).with_dry_run(true);
        let mut manifests = repository.load_all().unwrap();
        let result = DependencyRewriter::new(&repository)
            .apply_version(&mut manifests, "left-pad", &ResolvedVersion::explicit("2.0.0"))
            .unwrap();

        assert_eq!(result.changed_paths.len(), 1);
        assert!(!result.is_empty());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
            original
        );
    }
}
