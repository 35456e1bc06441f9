//! Update result summary types
//!
//! Provides structures for tracking update results per package and for the
//! whole invocation.

use super::DependencyChange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of updating a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackageOutcome {
    /// At least one manifest referenced the package and was rewritten
    Updated {
        package: String,
        version: String,
        changes: Vec<DependencyChange>,
        removed_lock_entries: Vec<String>,
    },
    /// No manifest references the package
    NotFound { package: String },
    /// The package was skipped during a batch run
    Skipped { package: String, reason: String },
}

impl PackageOutcome {
    /// Returns the package name
    pub fn package(&self) -> &str {
        match self {
            PackageOutcome::Updated { package, .. }
            | PackageOutcome::NotFound { package }
            | PackageOutcome::Skipped { package, .. } => package,
        }
    }

    /// Returns true if this outcome changed any file
    pub fn is_update(&self) -> bool {
        matches!(self, PackageOutcome::Updated { .. })
    }

    /// Returns true if the package was skipped
    pub fn is_skip(&self) -> bool {
        matches!(self, PackageOutcome::Skipped { .. })
    }

    /// Returns the dependency changes of this outcome
    pub fn changes(&self) -> &[DependencyChange] {
        match self {
            PackageOutcome::Updated { changes, .. } => changes,
            _ => &[],
        }
    }

    /// Returns the lockfile keys removed for this outcome
    pub fn removed_lock_entries(&self) -> &[String] {
        match self {
            PackageOutcome::Updated {
                removed_lock_entries,
                ..
            } => removed_lock_entries,
            _ => &[],
        }
    }
}

/// Overall report of an invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    /// Outcome for each processed package, in processing order
    pub outcomes: Vec<PackageOutcome>,
    /// Whether `yarn install` ran successfully afterwards
    pub installed: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl UpdateReport {
    /// Creates a new UpdateReport
    pub fn new(dry_run: bool) -> Self {
        Self {
            outcomes: Vec::new(),
            installed: false,
            dry_run,
        }
    }

    /// Adds a package outcome
    pub fn add_outcome(&mut self, outcome: PackageOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns true if any package was updated
    pub fn has_changes(&self) -> bool {
        self.outcomes.iter().any(PackageOutcome::is_update)
    }

    /// Returns the number of updated packages
    pub fn updated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_update()).count()
    }

    /// Returns the number of skipped packages
    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skip()).count()
    }

    /// Returns the distinct manifest paths touched, in first-touch order
    pub fn changed_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();
        for change in self.outcomes.iter().flat_map(PackageOutcome::changes) {
            if !files.contains(&change.path) {
                files.push(change.path.clone());
            }
        }
        files
    }

    /// Returns the total number of removed lockfile keys
    pub fn removed_lock_entry_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.removed_lock_entries().len())
            .sum()
    }
}
