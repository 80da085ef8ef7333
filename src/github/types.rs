//! Wire types for the subset of the GitHub release API this crate touches.

use serde::{Deserialize, Serialize};

/// A release record, as returned by the releases endpoints.
///
/// `id` is optional so a malformed response surfaces as a publishing
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Numeric release id
    pub id: Option<u64>,
    /// Tag the release is bound to
    pub tag_name: String,
    /// Display name
    pub name: Option<String>,
    /// Prerelease flag
    #[serde(default)]
    pub prerelease: bool,
    /// Assets attached to the release
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// An asset already attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Numeric asset id
    pub id: u64,
    /// Asset filename
    pub name: String,
}

/// Response of an asset upload.
///
/// `id` is optional for the same reason as [`Release::id`].
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAsset {
    /// Numeric asset id
    pub id: Option<u64>,
    /// Asset filename
    pub name: Option<String>,
}

/// A branch record; only the tip commit is of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    /// Branch name
    pub name: String,
    /// Tip commit
    pub commit: BranchCommit,
}

/// Tip commit of a branch.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    /// Commit hash
    pub sha: String,
}

/// Request body for release creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewRelease {
    /// Tag to bind the release to
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Release body text
    pub body: String,
    /// Prerelease flag
    pub prerelease: bool,
}
