//! GitHub API integration for release operations

mod client;
mod types;

pub use client::{GitHubClient, ReleaseHost};
pub use types::{Branch, BranchCommit, NewRelease, Release, ReleaseAsset, UploadedAsset};
