//! package.json document model
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - workspaces (array form and `{ "packages": [...] }` form)
//!
//! The document keeps every field and the original key order, so writing an
//! unmodified manifest reproduces a 2-space indented file byte for byte.

use crate::domain::DependencyKind;
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A parsed package.json file
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
    trailing_newline: bool,
}

impl Manifest {
    /// Parse manifest content read from `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        let Value::Object(document) = value else {
            return Err(ManifestError::json_parse_error(
                &path,
                "top-level value is not an object",
            ));
        };

        Ok(Self {
            path,
            document,
            trailing_newline: content.ends_with('\n'),
        })
    }

    /// Path this manifest was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the range of `package` in the given section
    pub fn dependency(&self, kind: DependencyKind, package: &str) -> Option<&str> {
        self.section(kind)?.get(package)?.as_str()
    }

    /// Returns the package names of a section in declaration order
    pub fn dependency_names(&self, kind: DependencyKind) -> Vec<&str> {
        self.section(kind)
            .map(|deps| deps.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Replaces the range of an existing string entry, returning the old range.
    ///
    /// Missing sections and entries are left alone; the key keeps its position.
    pub fn set_dependency(
        &mut self,
        kind: DependencyKind,
        package: &str,
        range: impl Into<String>,
    ) -> Option<String> {
        let deps = self.document.get_mut(kind.section_key())?.as_object_mut()?;
        match deps.get_mut(package)? {
            Value::String(current) => Some(std::mem::replace(current, range.into())),
            _ => None,
        }
    }

    /// Returns the workspace glob patterns declared by this manifest
    pub fn workspace_patterns(&self) -> Vec<String> {
        let patterns = match self.document.get("workspaces") {
            Some(Value::Array(arr)) => Some(arr),
            Some(Value::Object(obj)) => obj.get("packages").and_then(Value::as_array),
            _ => None,
        };

        patterns
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Serialize with 2-space indentation, keeping the original final newline
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        let mut content = serde_json::to_string_pretty(&self.document)
            .map_err(|e| ManifestError::json_parse_error(&self.path, e.to_string()))?;
        if self.trailing_newline {
            content.push('\n');
        }
        Ok(content)
    }

    fn section(&self, kind: DependencyKind) -> Option<&Map<String, Value>> {
        self.document.get(kind.section_key())?.as_object()
    }
}
