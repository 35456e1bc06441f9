//! Version resolution and manifest rewriting
//!
//! This module provides:
//! - Resolution of the version to write, explicit or from the registry
//! - Rewriting of every dependency section that references a package

mod resolver;
mod rewriter;

pub use resolver::{ResolvedVersion, VersionResolver, VersionSource};
pub use rewriter::{rewrite_manifest, DependencyRewriter, RewriteResult};
