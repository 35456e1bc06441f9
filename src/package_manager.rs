//! Package manager integration for reinstalling after an update
//!
//! This module provides:
//! - The [`PackageManagerRunner`] seam used by the orchestrator
//! - [`YarnRunner`], which runs `yarn install` in the project root

use crate::error::InstallError;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Result of a package manager installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    /// The command that was executed
    pub command: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Exit code, if the process exited normally
    pub status: Option<i32>,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl InstallResult {
    /// Create a successful install result
    pub fn success(command: impl Into<String>, stdout: String, stderr: String) -> Self {
        Self {
            command: command.into(),
            success: true,
            status: Some(0),
            stdout,
            stderr,
        }
    }

    /// Create a failed install result
    pub fn failure(
        command: impl Into<String>,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            command: command.into(),
            success: false,
            status,
            stdout,
            stderr,
        }
    }

    /// Build a result from a finished process
    fn from_output(command: String, output: Output) -> Self {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Self::success(command, stdout, stderr)
        } else {
            Self::failure(command, output.status.code(), stdout, stderr)
        }
    }

    /// Convert an unsuccessful result into an [`InstallError::Failed`]
    pub fn into_result(self) -> Result<Self, InstallError> {
        if self.success {
            return Ok(self);
        }
        Err(InstallError::Failed {
            command: self.command,
            status: self.status,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Trait for running the package manager install command
pub trait PackageManagerRunner: Send + Sync {
    /// Run the install command in the specified directory.
    ///
    /// Fails only if the process cannot be started; a non-zero exit is an
    /// unsuccessful [`InstallResult`].
    fn run_install(&self, working_dir: &Path) -> Result<InstallResult, InstallError>;
}

/// Runner that executes `yarn install`
#[derive(Debug, Clone)]
pub struct YarnRunner {
    program: String,
}

impl YarnRunner {
    /// Create a runner using the platform's yarn executable
    pub fn new() -> Self {
        Self::with_program(default_program())
    }

    /// Create a runner using a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self) -> String {
        format!("{} install", self.program)
    }
}

impl Default for YarnRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManagerRunner for YarnRunner {
    fn run_install(&self, working_dir: &Path) -> Result<InstallResult, InstallError> {
        let command = self.command_line();
        debug!(%command, dir = %working_dir.display(), "running install");

        let output = Command::new(&self.program)
            .arg("install")
            .current_dir(working_dir)
            .output()
            .map_err(|source| InstallError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        Ok(InstallResult::from_output(command, output))
    }
}

fn default_program() -> &'static str {
    if cfg!(windows) {
        "yarn.cmd"
    } else {
        "yarn"
    }
}
