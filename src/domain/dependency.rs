//! Dependency section and change types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A dependency section of package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// `dependencies`
    Dependencies,
    /// `devDependencies`
    DevDependencies,
    /// `peerDependencies`
    PeerDependencies,
}

impl DependencyKind {
    /// All sections rewritten by an update, in rewrite order
    pub const ALL: [DependencyKind; 3] = [
        DependencyKind::Dependencies,
        DependencyKind::DevDependencies,
        DependencyKind::PeerDependencies,
    ];

    /// Returns the JSON key of this section
    pub fn section_key(&self) -> &'static str {
        match self {
            DependencyKind::Dependencies => "dependencies",
            DependencyKind::DevDependencies => "devDependencies",
            DependencyKind::PeerDependencies => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_key())
    }
}

/// A single rewritten dependency entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyChange {
    /// Manifest the entry lives in
    pub path: PathBuf,
    /// Section the entry lives in
    pub kind: DependencyKind,
    /// Range before the update
    pub old_range: String,
    /// Range after the update
    pub new_range: String,
}

impl DependencyChange {
    /// Creates a new DependencyChange
    pub fn new(
        path: impl Into<PathBuf>,
        kind: DependencyKind,
        old_range: impl Into<String>,
        new_range: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            old_range: old_range.into(),
            new_range: new_range.into(),
        }
    }

    /// Returns true if the written range differs from the previous one
    pub fn is_modification(&self) -> bool {
        self.old_range != self.new_range
    }
}
