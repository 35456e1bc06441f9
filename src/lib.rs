//! yud - Yarn workspace dependency updater library
//!
//! This library provides the core functionality for updating one dependency
//! across a Yarn project:
//! - Discovery of the root package.json and its workspace members
//! - Version resolution against the npm registry
//! - Range-preserving rewrites of dependency sections
//! - yarn.lock parsing, pruning and canonical re-serialization

pub mod cli;
pub mod domain;
pub mod error;
pub mod lockfile;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod registry;
pub mod update;
