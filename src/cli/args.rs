//! Command line argument parsing and validation.

use clap::{Parser, Subcommand};

use crate::config::ReleaseKind;

/// Publish Marlin firmware builds to GitHub releases
#[derive(Parser, Debug)]
#[command(
    name = "marlin_publish",
    version,
    about = "Publish Marlin firmware builds to GitHub releases",
    long_about = "Resolve the latest upstream Marlin version, ensure the matching \
release exists in the target repository, and upload firmware binaries as assets.

Usage:
  marlin_publish publish --kind nightly firmware-ender3.bin
  marlin_publish publish --kind stable ender3=out/firmware.bin skr-mini=out/skr.bin
  marlin_publish resolve --kind stable"
)]
pub struct Args {
    /// Suppress progress output (errors are always shown)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Publishing operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the latest upstream version and publish build artifacts
    /// to the matching release
    Publish {
        /// Release channel to publish to
        #[arg(long, value_enum)]
        kind: ReleaseKind,

        /// Target repository in owner/repo form
        #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
        repo: String,

        /// GitHub API token (falls back to GITHUB_TOKEN)
        #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Artifacts to upload, as NAME=PATH; a bare PATH publishes
        /// under the file's own name
        #[arg(required = true, value_name = "NAME=PATH")]
        assets: Vec<String>,
    },

    /// Resolve and print the latest upstream version for a channel
    Resolve {
        /// Release channel to resolve
        #[arg(long, value_enum)]
        kind: ReleaseKind,

        /// GitHub API token (falls back to GITHUB_TOKEN)
        #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Emit machine-readable JSON instead of the bare identifier
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Name of the subcommand, for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Command::Publish { .. } => "publish",
            Command::Resolve { .. } => "resolve",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Publish { assets, .. } = &self.command {
            if assets.iter().any(|a| a.trim().is_empty()) {
                return Err("asset arguments must not be empty".to_string());
            }
        }

        Ok(())
    }
}
