//! yarn.lock (v1) support
//!
//! This module provides:
//! - A parser for the Yarn v1 lockfile syntax
//! - A writer producing the canonical layout Yarn itself writes
//! - Removal of every entry that resolves a given package
//! - File access with dry-run support

mod parser;
mod prune;
mod writer;

pub use parser::SyntaxError;
pub use prune::{prune_entries, PruneResult};

use crate::error::LockfileError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the lockfile
pub const LOCKFILE_FILENAME: &str = "yarn.lock";

/// A value in the lockfile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockValue {
    /// A string, quoted or bare
    String(String),
    /// `true` / `false`
    Bool(bool),
    /// A numeric literal, kept as written
    Number(String),
    /// A nested block of fields
    Table(Vec<LockNode>),
}

impl LockValue {
    /// Returns the string content if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LockValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the field named `key` if this is a table
    pub fn field(&self, key: &str) -> Option<&LockValue> {
        match self {
            LockValue::Table(nodes) => nodes
                .iter()
                .find(|node| node.keys.iter().any(|k| k == key))
                .map(|node| &node.value),
            _ => None,
        }
    }
}

/// One header line and its value; several keys may share the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockNode {
    pub keys: Vec<String>,
    pub value: LockValue,
}

/// A parsed yarn.lock: a flat table from `name@range` keys to entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lockfile {
    nodes: Vec<LockNode>,
}

impl Lockfile {
    /// Entries in file order
    pub fn entries(&self) -> &[LockNode] {
        &self.nodes
    }

    /// Every top-level key, in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .flat_map(|node| node.keys.iter().map(String::as_str))
    }

    /// Returns the entry resolved for `key`
    pub fn get(&self, key: &str) -> Option<&LockValue> {
        self.nodes
            .iter()
            .find(|node| node.keys.iter().any(|k| k == key))
            .map(|node| &node.value)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys in the flat table
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|node| node.keys.len()).sum()
    }

    /// Returns true if the table has no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The yarn.lock file of a project
#[derive(Debug, Clone)]
pub struct LockfileStore {
    path: PathBuf,
    dry_run: bool,
}

impl LockfileStore {
    /// Store for the lockfile in `root`
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(LOCKFILE_FILENAME),
            dry_run: false,
        }
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Path of the lockfile
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the lockfile; `None` if the project has none
    pub fn load(&self) -> Result<Option<Lockfile>, LockfileError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LockfileError::ReadError {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let lockfile = Lockfile::parse(&content).map_err(|e| LockfileError::ParseError {
            path: self.path.clone(),
            line: e.line,
            message: e.message,
        })?;
        debug!(path = %self.path.display(), keys = lockfile.len(), "loaded lockfile");
        Ok(Some(lockfile))
    }

    /// Overwrite the lockfile with the canonical serialization
    pub fn save(&self, lockfile: &Lockfile) -> Result<(), LockfileError> {
        if self.dry_run {
            debug!(path = %self.path.display(), "dry run, not writing lockfile");
            return Ok(());
        }
        fs::write(&self.path, lockfile.to_string()).map_err(|source| LockfileError::WriteError {
            path: self.path.clone(),
            source,
        })
    }
}
