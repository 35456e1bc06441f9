//! Update orchestrator for coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: resolve → rewrite manifests → prune yarn.lock → install
//! - Single package and batch (all dependencies / all dev dependencies) runs
//! - Dry-run mode support
//! - Skip-and-continue for recoverable per-package failures in batch runs

use crate::cli::CliArgs;
use crate::domain::{DependencyKind, PackageOutcome, UpdatePlan, UpdateReport, UpdateTarget};
use crate::error::{ConfigError, UpdateError};
use crate::lockfile::{LockfileStore, LOCKFILE_FILENAME};
use crate::manifest::ManifestRepository;
use crate::output::OutputSink;
use crate::package_manager::{PackageManagerRunner, YarnRunner};
use crate::progress::Progress;
use crate::registry::{HttpClient, NpmAdapter, RegistryAdapter, NPM_REGISTRY_URL};
use crate::update::{DependencyRewriter, VersionResolver};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

const NO_UPDATE_MESSAGE: &str = "No update occurred - the specified dependency could not be found.";

/// Everything a run needs, independent of how it was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Project root holding package.json and yarn.lock
    pub cwd: PathBuf,
    /// Package to update
    pub package: Option<String>,
    /// Explicit version; latest is fetched when absent
    pub version: Option<String>,
    /// Update every `dependencies` entry
    pub all_dependencies: bool,
    /// Update every `devDependencies` entry
    pub all_dev_dependencies: bool,
    /// Run `yarn install` afterwards
    pub install: bool,
    /// Suppress non-error output
    pub silent: bool,
    /// Report without writing or installing
    pub dry_run: bool,
    /// npm registry base URL
    pub registry_url: String,
    /// Draw spinners on an interactive terminal
    pub show_progress: bool,
}

impl UpdateOptions {
    /// Options for updating a project rooted at `cwd`, with defaults
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            package: None,
            version: None,
            all_dependencies: false,
            all_dev_dependencies: false,
            install: true,
            silent: false,
            dry_run: false,
            registry_url: NPM_REGISTRY_URL.to_string(),
            show_progress: false,
        }
    }

    /// Build options from parsed command line arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        if !args.cwd.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: args.cwd.clone(),
                message: "not a directory".to_string(),
            });
        }

        let registry = reqwest::Url::parse(&args.registry).map_err(|e| {
            ConfigError::InvalidRegistryUrl {
                value: args.registry.clone(),
                message: e.to_string(),
            }
        })?;
        if !matches!(registry.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidRegistryUrl {
                value: args.registry.clone(),
                message: format!("unsupported scheme '{}'", registry.scheme()),
            });
        }

        Ok(Self {
            cwd: args.cwd.clone(),
            package: args.package_name().map(str::to_string),
            version: args.target_version().map(str::to_string),
            all_dependencies: args.all_dependencies,
            all_dev_dependencies: args.all_dev_dependencies,
            install: !args.no_yarn,
            silent: args.silent,
            dry_run: args.dry_run,
            registry_url: args.registry.clone(),
            show_progress: !args.silent,
        })
    }
}

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    Resolving,
    Rewriting,
    Pruning,
    Installing,
    Done,
    Failed,
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateState::Idle => "idle",
            UpdateState::Resolving => "resolving",
            UpdateState::Rewriting => "rewriting",
            UpdateState::Pruning => "pruning",
            UpdateState::Installing => "installing",
            UpdateState::Done => "done",
            UpdateState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    options: UpdateOptions,
    registry: Box<dyn RegistryAdapter>,
    installer: Box<dyn PackageManagerRunner>,
    state: UpdateState,
}

impl Orchestrator {
    /// Create an orchestrator with explicit collaborators
    pub fn new(
        options: UpdateOptions,
        registry: Box<dyn RegistryAdapter>,
        installer: Box<dyn PackageManagerRunner>,
    ) -> Self {
        Self {
            options,
            registry,
            installer,
            state: UpdateState::Idle,
        }
    }

    /// Create an orchestrator talking to the configured npm registry and yarn
    pub fn with_npm(options: UpdateOptions) -> Result<Self, UpdateError> {
        let client = HttpClient::new()?;
        let registry = NpmAdapter::new(client, options.registry_url.clone());
        Ok(Self::new(
            options,
            Box::new(registry),
            Box::new(YarnRunner::new()),
        ))
    }

    /// Current state of the run
    pub fn state(&self) -> UpdateState {
        self.state
    }

    /// Run the update workflow, reporting progress through `sink`
    pub async fn run(&mut self, sink: &mut dyn OutputSink) -> Result<UpdateReport, UpdateError> {
        match self.execute(sink).await {
            Ok(report) => {
                self.state = UpdateState::Done;
                Ok(report)
            }
            Err(e) => {
                debug!(state = %self.state, error = %e, "update failed");
                self.state = UpdateState::Failed;
                Err(e)
            }
        }
    }

    async fn execute(&mut self, sink: &mut dyn OutputSink) -> Result<UpdateReport, UpdateError> {
        let plan = UpdatePlan::new(
            self.options.package.as_deref(),
            self.options.version.as_deref(),
            self.options.all_dependencies,
            self.options.all_dev_dependencies,
        )?;

        let repository =
            ManifestRepository::new(&self.options.cwd).with_dry_run(self.options.dry_run);
        let lock_store = LockfileStore::new(&self.options.cwd).with_dry_run(self.options.dry_run);
        let mut progress = if self.options.show_progress {
            Progress::for_terminal(self.options.silent)
        } else {
            Progress::disabled()
        };
        let mut report = UpdateReport::new(self.options.dry_run);

        match plan.target {
            UpdateTarget::Package { name, version } => {
                let outcome = self
                    .update_package(
                        &repository,
                        &lock_store,
                        &name,
                        version.as_deref(),
                        &mut progress,
                        sink,
                    )
                    .await?;
                report.add_outcome(outcome);
            }
            UpdateTarget::Batch {
                dependencies,
                dev_dependencies,
            } => {
                let packages = self.batch_packages(&repository, dependencies, dev_dependencies)?;
                debug!(count = packages.len(), "batch update");

                for package in packages {
                    sink.blank();
                    sink.info(&format!("Trying to update {}...", package));

                    let result = self
                        .update_package(&repository, &lock_store, &package, None, &mut progress, sink)
                        .await;
                    match result {
                        Ok(outcome) => report.add_outcome(outcome),
                        Err(e) if e.is_recoverable() => {
                            warn!(%package, error = %e, "skipping package");
                            sink.warning(&e.to_string());
                            report.add_outcome(PackageOutcome::Skipped {
                                package,
                                reason: e.to_string(),
                            });
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        self.finish(&mut report, &mut progress, sink)?;
        Ok(report)
    }

    /// Update one package across all manifests and prune its lockfile entries
    async fn update_package(
        &mut self,
        repository: &ManifestRepository,
        lock_store: &LockfileStore,
        package: &str,
        explicit: Option<&str>,
        progress: &mut Progress,
        sink: &mut dyn OutputSink,
    ) -> Result<PackageOutcome, UpdateError> {
        self.state = UpdateState::Resolving;
        if explicit.is_none() {
            progress.spinner(&format!("Fetching latest version of {}...", package));
        }
        let resolved = VersionResolver::new(self.registry.as_ref())
            .resolve(package, explicit)
            .await;
        progress.finish_and_clear();
        let resolved = resolved?;

        if resolved.is_from_registry() {
            sink.info(&format!("Fetching latest version: {}", resolved.range));
        }
        sink.info(&format!("Updating {} to version {}...", package, resolved.range));

        // Parsed up front so a broken lockfile aborts before any manifest is written
        let lockfile = lock_store.load()?;
        let mut manifests = repository.load_all()?;

        self.state = UpdateState::Rewriting;
        let rewrite =
            DependencyRewriter::new(repository).apply_version(&mut manifests, package, &resolved)?;
        for path in &rewrite.changed_paths {
            sink.success(&format!(
                "✔ Updated version in {}",
                repository.display_path(path).display()
            ));
        }

        if rewrite.is_empty() {
            sink.blank();
            sink.warning(NO_UPDATE_MESSAGE);
            return Ok(PackageOutcome::NotFound {
                package: package.to_string(),
            });
        }

        self.state = UpdateState::Pruning;
        let removed_lock_entries = match lockfile {
            Some(mut lockfile) => {
                let removed = lockfile.remove_package(package);
                if !removed.is_empty() {
                    lock_store.save(&lockfile)?;
                }
                for key in &removed {
                    sink.success(&format!("✔ Removed entry {} from {}", key, LOCKFILE_FILENAME));
                }
                removed
            }
            None => {
                warn!(path = %lock_store.path().display(), "no lockfile");
                sink.warning(&format!(
                    "No {} found, skipping lockfile cleanup",
                    LOCKFILE_FILENAME
                ));
                Vec::new()
            }
        };

        Ok(PackageOutcome::Updated {
            package: package.to_string(),
            version: resolved.range.to_string(),
            changes: rewrite.changes,
            removed_lock_entries,
        })
    }

    /// Distinct package names of the selected sections, in discovery order
    fn batch_packages(
        &self,
        repository: &ManifestRepository,
        dependencies: bool,
        dev_dependencies: bool,
    ) -> Result<Vec<String>, UpdateError> {
        let manifests = repository.load_all()?;
        let kinds = [
            (dependencies, DependencyKind::Dependencies),
            (dev_dependencies, DependencyKind::DevDependencies),
        ];

        let mut seen = HashSet::new();
        let mut packages = Vec::new();
        for (_, kind) in kinds.into_iter().filter(|(selected, _)| *selected) {
            for manifest in &manifests {
                for name in manifest.dependency_names(kind) {
                    if seen.insert(name.to_string()) {
                        packages.push(name.to_string());
                    }
                }
            }
        }

        Ok(packages)
    }

    /// Install step and closing message
    fn finish(
        &mut self,
        report: &mut UpdateReport,
        progress: &mut Progress,
        sink: &mut dyn OutputSink,
    ) -> Result<(), UpdateError> {
        sink.blank();

        // A package missing from every manifest already reported this
        let reported = report
            .outcomes
            .iter()
            .any(|outcome| matches!(outcome, PackageOutcome::NotFound { .. }));
        if !report.has_changes() && !reported {
            sink.warning(NO_UPDATE_MESSAGE);
        }

        if !report.has_changes() || self.options.dry_run {
            sink.success("Done!");
            return Ok(());
        }

        if !self.options.install {
            sink.success("Done! Please run `yarn` to update your dependencies.");
            return Ok(());
        }

        self.state = UpdateState::Installing;
        sink.info("Now running `yarn` to install new dependency...");
        progress.spinner("Running yarn install...");
        let result = self.installer.run_install(&self.options.cwd);
        progress.finish_and_clear();
        let result = result?.into_result()?;
        debug!(command = %result.command, "install finished");
        report.installed = true;

        sink.blank();
        sink.success("Done!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InstallError, RegistryError};
    use crate::output::MemorySink;
    use crate::package_manager::InstallResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct FakeRegistry {
        versions: HashMap<String, String>,
    }

    impl FakeRegistry {
        fn new(versions: &[(&str, &str)]) -> Box<Self> {
            Box::new(Self {
                versions: versions
                    .iter()
                    .map(|(name, version)| (name.to_string(), version.to_string()))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl RegistryAdapter for FakeRegistry {
        fn registry_name(&self) -> &'static str {
            "fake"
        }

        async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
            Ok(self.versions.get(package).cloned())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingInstaller {
        calls: Arc<Mutex<usize>>,
        fail: bool,
    }

    impl PackageManagerRunner for RecordingInstaller {
        fn run_install(&self, _working_dir: &Path) -> Result<InstallResult, InstallError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                Ok(InstallResult::failure("yarn install", Some(1), String::new(), "boom".to_string()))
            } else {
                Ok(InstallResult::success("yarn install", String::new(), String::new()))
            }
        }
    }

    const LOCK: &str = "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n# yarn lockfile v1\n\n\nleft-pad@^1.0.0:\n  version \"1.3.0\"\n\nright-pad@^1.0.0:\n  version \"1.0.1\"\n";

    fn project(root_manifest: &str, lockfile: Option<&str>) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), root_manifest).unwrap();
        if let Some(lockfile) = lockfile {
            fs::write(temp_dir.path().join("yarn.lock"), lockfile).unwrap();
        }
        temp_dir
    }

    fn options(root: &Path) -> UpdateOptions {
        UpdateOptions::new(root)
    }

    #[tokio::test]
    async fn test_invalid_invocation() {
        let temp_dir = project("{}", None);
        let mut orchestrator = Orchestrator::new(
            options(temp_dir.path()),
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller::default()),
        );
        let mut sink = MemorySink::new();

        let err = orchestrator.run(&mut sink).await.unwrap_err();
        assert!(matches!(err, UpdateError::InvalidInvocation));
        assert_eq!(orchestrator.state(), UpdateState::Failed);
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_single_package_with_explicit_version() {
        let temp_dir = project(r#"{"dependencies": {"left-pad": "^1.0.0"}}"#, Some(LOCK));
        let installer = RecordingInstaller::default();
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                version: Some("2.0.0".to_string()),
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(installer.clone()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();

        assert_eq!(orchestrator.state(), UpdateState::Done);
        assert!(report.installed);
        assert_eq!(*installer.calls.lock().unwrap(), 1);
        assert_eq!(report.removed_lock_entry_count(), 1);
        assert!(sink.contains("Updating left-pad to version 2.0.0..."));
        assert!(sink.contains("✔ Updated version in package.json"));
        assert!(sink.contains("✔ Removed entry left-pad@^1.0.0 from yarn.lock"));
        assert!(sink.contains("Now running `yarn` to install new dependency..."));
        assert!(!sink.contains("Fetching latest version"));

        let manifest = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"left-pad\": \"^2.0.0\""));
        let lockfile = fs::read_to_string(temp_dir.path().join("yarn.lock")).unwrap();
        assert!(!lockfile.contains("left-pad"));
        assert!(lockfile.contains("right-pad@^1.0.0"));
    }

    #[tokio::test]
    async fn test_single_package_latest_version() {
        let temp_dir = project(r#"{"devDependencies": {"left-pad": "~1.0.0"}}"#, Some(LOCK));
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                install: false,
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[("left-pad", "1.3.0")]),
            Box::new(RecordingInstaller::default()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();

        assert!(!report.installed);
        assert_eq!(report.outcomes[0].changes()[0].new_range, "~1.3.0");
        assert!(sink.contains("Fetching latest version: 1.3.0"));
        assert!(sink.contains("Done! Please run `yarn` to update your dependencies."));
    }

    #[tokio::test]
    async fn test_single_package_not_found_in_registry() {
        let temp_dir = project(r#"{"dependencies": {"left-pad": "^1.0.0"}}"#, Some(LOCK));
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller::default()),
        );
        let mut sink = MemorySink::new();

        let err = orchestrator.run(&mut sink).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No version found to update to for package left-pad"
        );
        assert_eq!(orchestrator.state(), UpdateState::Failed);
    }

    #[tokio::test]
    async fn test_absent_package_is_no_update() {
        let manifest = r#"{"dependencies": {"right-pad": "^1.0.0"}}"#;
        let temp_dir = project(manifest, Some(LOCK));
        let installer = RecordingInstaller::default();
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                version: Some("2.0.0".to_string()),
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(installer.clone()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();

        assert!(!report.has_changes());
        assert!(!report.installed);
        assert_eq!(*installer.calls.lock().unwrap(), 0);
        assert!(sink.contains(NO_UPDATE_MESSAGE));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("yarn.lock")).unwrap(),
            LOCK
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
            manifest
        );
    }

    #[tokio::test]
    async fn test_missing_lockfile_is_skipped() {
        let temp_dir = project(r#"{"dependencies": {"left-pad": "^1.0.0"}}"#, None);
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                version: Some("2.0.0".to_string()),
                install: false,
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller::default()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();
        assert!(report.has_changes());
        assert!(sink.contains("No yarn.lock found"));
        assert!(!temp_dir.path().join("yarn.lock").exists());
    }

    #[tokio::test]
    async fn test_broken_lockfile_aborts_before_writing() {
        let manifest = r#"{"dependencies": {"left-pad": "^1.0.0"}}"#;
        let temp_dir = project(manifest, Some("left-pad@^1.0.0:\n   version \"1.3.0\"\n"));
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                version: Some("2.0.0".to_string()),
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller::default()),
        );
        let mut sink = MemorySink::new();

        let err = orchestrator.run(&mut sink).await.unwrap_err();
        assert!(matches!(err, UpdateError::Lockfile(_)));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
            manifest
        );
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let manifest = r#"{"dependencies": {"left-pad": "^1.0.0"}}"#;
        let temp_dir = project(manifest, Some(LOCK));
        let installer = RecordingInstaller::default();
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                version: Some("2.0.0".to_string()),
                dry_run: true,
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(installer.clone()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();

        assert!(report.dry_run);
        assert!(report.has_changes());
        assert_eq!(report.removed_lock_entry_count(), 1);
        assert_eq!(*installer.calls.lock().unwrap(), 0);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
            manifest
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("yarn.lock")).unwrap(),
            LOCK
        );
    }

    #[tokio::test]
    async fn test_install_failure() {
        let temp_dir = project(r#"{"dependencies": {"left-pad": "^1.0.0"}}"#, Some(LOCK));
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("left-pad".to_string()),
                version: Some("2.0.0".to_string()),
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller {
                fail: true,
                ..Default::default()
            }),
        );
        let mut sink = MemorySink::new();

        let err = orchestrator.run(&mut sink).await.unwrap_err();
        assert!(matches!(err, UpdateError::Install(InstallError::Failed { .. })));
        // manifests stay rewritten
        let manifest = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("^2.0.0"));
    }

    #[tokio::test]
    async fn test_batch_skips_unknown_packages() {
        let temp_dir = project(
            r#"{"dependencies": {"left-pad": "^1.0.0", "private-pkg": "1.0.0"}, "devDependencies": {"jest": "^29.0.0"}}"#,
            Some(LOCK),
        );
        let installer = RecordingInstaller::default();
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                all_dependencies: true,
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[("left-pad", "1.3.0"), ("jest", "29.7.0")]),
            Box::new(installer.clone()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();

        let packages: Vec<&str> = report.outcomes.iter().map(|o| o.package()).collect();
        assert_eq!(packages, vec!["left-pad", "private-pkg"]);
        assert_eq!(report.updated_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(sink.contains("Trying to update private-pkg..."));
        assert!(sink.contains("No version found to update to for package private-pkg"));
        assert_eq!(*installer.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_batch_where_every_lookup_fails() {
        let temp_dir = project(r#"{"devDependencies": {"a": "1.0.0", "b": "^2.0.0"}}"#, None);
        let installer = RecordingInstaller::default();
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                all_dev_dependencies: true,
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(installer.clone()),
        );
        let mut sink = MemorySink::new();

        let report = orchestrator.run(&mut sink).await.unwrap();
        assert!(!report.has_changes());
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(*installer.calls.lock().unwrap(), 0);
        assert_eq!(orchestrator.state(), UpdateState::Done);
        assert!(sink.contains(NO_UPDATE_MESSAGE));
        assert_eq!(sink.messages().last(), Some(&"Done!"));
    }

    #[tokio::test]
    async fn test_not_found_message_is_printed_once() {
        let temp_dir = project(r#"{"dependencies": {"left-pad": "1.0.0"}}"#, None);
        let mut orchestrator = Orchestrator::new(
            UpdateOptions {
                package: Some("is-odd".to_string()),
                version: Some("3.0.0".to_string()),
                ..options(temp_dir.path())
            },
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller::default()),
        );
        let mut sink = MemorySink::new();

        orchestrator.run(&mut sink).await.unwrap();
        let count = sink
            .messages()
            .into_iter()
            .filter(|message| *message == NO_UPDATE_MESSAGE)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_batch_packages_order_and_dedup() {
        let temp_dir = project(
            r#"{"workspaces": ["packages/*"], "dependencies": {"zod": "1.0.0"}, "devDependencies": {"jest": "1.0.0", "zod": "1.0.0"}}"#,
            None,
        );
        let member = temp_dir.path().join("packages/a");
        fs::create_dir_all(&member).unwrap();
        fs::write(
            member.join("package.json"),
            r#"{"dependencies": {"axios": "1.0.0", "zod": "1.0.0"}}"#,
        )
        .unwrap();

        let orchestrator = Orchestrator::new(
            options(temp_dir.path()),
            FakeRegistry::new(&[]),
            Box::new(RecordingInstaller::default()),
        );
        let repository = ManifestRepository::new(temp_dir.path());

        assert_eq!(
            orchestrator.batch_packages(&repository, true, false).unwrap(),
            vec!["zod", "axios"]
        );
        assert_eq!(
            orchestrator.batch_packages(&repository, true, true).unwrap(),
            vec!["zod", "axios", "jest"]
        );
        assert_eq!(
            orchestrator.batch_packages(&repository, false, true).unwrap(),
            vec!["jest", "zod"]
        );
    }

    #[test]
    fn test_update_state_display() {
        assert_eq!(UpdateState::Resolving.to_string(), "resolving");
        assert_eq!(UpdateState::Failed.to_string(), "failed");
    }

    #[test]
    fn test_options_defaults() {
        let options = UpdateOptions::new(".");
        assert!(options.install);
        assert!(!options.dry_run);
        assert_eq!(options.registry_url, NPM_REGISTRY_URL);
    }
}
