//! CLI argument parsing module for yud

use crate::registry::NPM_REGISTRY_URL;
use clap::Parser;
use std::path::PathBuf;

/// Update a dependency across a Yarn workspace
#[derive(Parser, Debug, Clone)]
#[command(
    name = "yud",
    version,
    about = "Update a dependency in every package.json of a Yarn workspace and prune yarn.lock"
)]
pub struct CliArgs {
    /// Package to update
    #[arg(value_name = "PACKAGE")]
    pub package_arg: Option<String>,

    /// Version to update to (default: latest published version)
    #[arg(value_name = "VERSION")]
    pub version_arg: Option<String>,

    /// Package to update (takes priority over the positional argument)
    #[arg(short = 'p', long = "package", value_name = "NAME")]
    pub package: Option<String>,

    /// Version to update to (takes priority over the positional argument)
    #[arg(short = 'v', long = "target-version", value_name = "VERSION")]
    pub target_version: Option<String>,

    // Batch modes
    /// Update every package listed in `dependencies`
    #[arg(long)]
    pub all_dependencies: bool,

    /// Update every package listed in `devDependencies`
    #[arg(long)]
    pub all_dev_dependencies: bool,

    // Install option
    /// Do not run `yarn install` afterwards
    #[arg(long = "no-yarn", visible_alias = "no-install")]
    pub no_yarn: bool,

    // General options
    /// Project root containing package.json and yarn.lock
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// npm registry base URL
    #[arg(long, env = "NPM_CONFIG_REGISTRY", default_value = NPM_REGISTRY_URL)]
    pub registry: String,

    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub silent: bool,

    /// Print debug diagnostics to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The package to update; the flag wins over the positional argument
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_deref().or(self.package_arg.as_deref())
    }

    /// The explicit version; the flag wins over the positional argument
    pub fn target_version(&self) -> Option<&str> {
        self.target_version
            .as_deref()
            .or(self.version_arg.as_deref())
    }
}
