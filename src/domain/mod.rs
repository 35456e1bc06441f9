//! Core domain models for yud
//!
//! This module contains the fundamental types used throughout the application:
//! - Version ranges and their leading operators
//! - Dependency sections and rewritten entries
//! - The update plan for one invocation
//! - Per-package outcomes and the overall report

mod dependency;
mod summary;
mod update_plan;
mod version_spec;

pub use dependency::{DependencyChange, DependencyKind};
pub use summary::{PackageOutcome, UpdateReport};
pub use update_plan::{UpdatePlan, UpdateTarget};
pub use version_spec::{RangeOperator, VersionRange};
