//! Removal of lockfile entries for one package
//!
//! Every key starting with `<package>@` is removed, so the package manager
//! resolves the package again on the next install. An entry whose keys are
//! all removed disappears from the file.

use super::{Lockfile, SyntaxError};

/// Result of pruning lockfile text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneResult {
    /// Canonical serialization after removal
    pub content: String,
    /// Removed keys, sorted
    pub removed_keys: Vec<String>,
}

impl Lockfile {
    /// Remove every key resolving `package`, returning the removed keys sorted
    pub fn remove_package(&mut self, package: &str) -> Vec<String> {
        let prefix = format!("{}@", package);
        let mut removed = Vec::new();

        for node in &mut self.nodes {
            node.keys.retain(|key| {
                if key.starts_with(&prefix) {
                    removed.push(key.clone());
                    false
                } else {
                    true
                }
            });
        }
        self.nodes.retain(|node| !node.keys.is_empty());

        removed.sort();
        removed
    }
}

/// Parse `content`, drop the entries of `package` and serialize the rest
pub fn prune_entries(content: &str, package: &str) -> Result<PruneResult, SyntaxError> {
    let mut lockfile = Lockfile::parse(content)?;
    let removed_keys = lockfile.remove_package(package);
    Ok(PruneResult {
        content: lockfile.to_string(),
        removed_keys,
    })
}
