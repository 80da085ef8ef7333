//! Run configuration: repository identities and release channels.
//!
//! The core logic never reads process state; everything it needs arrives
//! through [`PublishConfig`], resolved once at the CLI edge.

use std::fmt;

use clap::ValueEnum;

use crate::error::{CliError, Result};

/// An `owner/name` repository coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// The upstream firmware repository versions are resolved against.
    pub fn upstream() -> Self {
        Self {
            owner: "MarlinFirmware".to_string(),
            name: "Marlin".to_string(),
        }
    }

    /// Parse an `owner/repo` string, the format `GITHUB_REPOSITORY` uses.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(CliError::InvalidArguments {
                reason: format!("invalid repository '{s}'. Expected: owner/repo"),
            }
            .into()),
        }
    }

    /// Web URL of a tagged release page on this repository.
    pub fn tag_url(&self, tag: &str) -> String {
        format!("https://github.com/{self}/releases/tag/{tag}")
    }

    /// Web URL of the source tree at a commit.
    pub fn tree_url(&self, commit: &str) -> String {
        format!("https://github.com/{self}/tree/{commit}")
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Release channel a publishing run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseKind {
    /// Tagged, numbered upstream release considered production-ready
    Stable,
    /// Rolling build from the tip of the upstream maintenance branch
    Nightly,
}

impl ReleaseKind {
    /// Lowercase channel name used in tags and display names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Nightly => "nightly",
        }
    }

    /// Nightly releases are flagged prerelease on the hosting platform.
    pub fn is_prerelease(self) -> bool {
        matches!(self, Self::Nightly)
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a publishing run needs to know, resolved once at the edge.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Repository versions are resolved against
    pub upstream: RepoRef,
    /// Repository releases are created in
    pub target: RepoRef,
}
