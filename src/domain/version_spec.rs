//! Version range types for package.json entries
//!
//! A range written by this tool is an optional operator followed by a
//! version literal:
//! - Exact: `1.2.3`
//! - Tilde: `~1.2.3`
//! - Caret: `^1.2.3`
//!
//! Other npm range syntaxes (`>=`, `1.x`, `workspace:`) are treated as exact
//! because their first character is neither `^` nor `~`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading operator of a version range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeOperator {
    /// No operator, the version is pinned
    #[default]
    Exact,
    /// `~` - patch updates allowed
    Tilde,
    /// `^` - minor and patch updates allowed
    Caret,
}

impl RangeOperator {
    /// Returns the operator a range string starts with
    pub fn of(range: &str) -> Self {
        match range.chars().next() {
            Some('^') => RangeOperator::Caret,
            Some('~') => RangeOperator::Tilde,
            _ => RangeOperator::Exact,
        }
    }

    /// Returns the textual form of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            RangeOperator::Exact => "",
            RangeOperator::Tilde => "~",
            RangeOperator::Caret => "^",
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A version range split into operator and version literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRange {
    /// The leading operator
    pub operator: RangeOperator,
    /// The version literal without operator
    pub version: String,
}

impl VersionRange {
    /// Creates a new VersionRange
    pub fn new(operator: RangeOperator, version: impl Into<String>) -> Self {
        Self {
            operator,
            version: version.into(),
        }
    }

    /// Splits a raw range string into operator and literal
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let operator = RangeOperator::of(raw);
        let version = &raw[operator.symbol().len()..];
        Self::new(operator, version)
    }

    /// Returns true if the range carries an explicit `^` or `~`
    pub fn has_operator(&self) -> bool {
        self.operator != RangeOperator::Exact
    }

    /// Returns true if the literal is a valid semantic version
    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.version).is_ok()
    }

    /// Computes the value to write over an existing range.
    ///
    /// An explicit operator always wins. Otherwise the existing range's
    /// operator is carried over, and an exact pin stays exact.
    pub fn write_over(&self, existing: &str) -> String {
        let operator = if self.has_operator() {
            self.operator
        } else {
            RangeOperator::of(existing.trim_start())
        };
        format!("{}{}", operator.symbol(), self.version)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
