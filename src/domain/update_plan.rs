//! What a single invocation is asked to update

use crate::error::UpdateError;

/// Target of an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateTarget {
    /// One named package, optionally to an explicit version
    Package {
        name: String,
        version: Option<String>,
    },
    /// Every package listed in the selected sections, always to latest
    Batch {
        dependencies: bool,
        dev_dependencies: bool,
    },
}

/// Ephemeral description of an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub target: UpdateTarget,
}

impl UpdatePlan {
    /// Builds a plan from the requested package and batch flags.
    ///
    /// A package name takes priority over the batch flags. Blank names and
    /// versions count as absent.
    pub fn new(
        package: Option<&str>,
        version: Option<&str>,
        all_dependencies: bool,
        all_dev_dependencies: bool,
    ) -> Result<Self, UpdateError> {
        let package = non_blank(package);
        let version = non_blank(version);

        let target = match package {
            Some(name) => UpdateTarget::Package {
                name: name.to_string(),
                version: version.map(str::to_string),
            },
            None if all_dependencies || all_dev_dependencies => UpdateTarget::Batch {
                dependencies: all_dependencies,
                dev_dependencies: all_dev_dependencies,
            },
            None => return Err(UpdateError::InvalidInvocation),
        };

        Ok(Self { target })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
