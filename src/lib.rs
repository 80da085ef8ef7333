//! # marlin_publish
//!
//! Publishes Marlin firmware build artifacts to GitHub releases.
//!
//! A CI pipeline compiles firmware, then calls this crate (or its
//! bundled CLI) to push the binaries to a release feed deterministically:
//! repeated runs for the same upstream version land on the same release,
//! and re-uploading a filename replaces the prior asset instead of
//! duplicating it.
//!
//! ## Pipeline
//!
//! - **[`version`]** — resolve the latest upstream reference point: the
//!   newest stable release tag, or the tip commit of the nightly branch.
//! - **[`release`]** — find or create the release tagged
//!   `{kind}-{version}` in the target repository.
//! - **[`assets`]** — upload each firmware binary, deleting a prior
//!   same-named asset first when replacing.
//!
//! All GitHub access goes through the narrow [`github::ReleaseHost`]
//! trait, so the pipeline can be exercised against an in-memory host.
//!
//! ## Usage
//!
//! ```bash
//! marlin_publish publish --kind nightly firmware-ender3.bin
//! marlin_publish publish --kind stable ender3=out/firmware.bin
//! marlin_publish resolve --kind stable
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod release;
pub mod version;

// Re-export main types for public API
pub use assets::{AssetAction, AssetUpload};
pub use config::{PublishConfig, ReleaseKind, RepoRef};
pub use error::{PublishError, Result};
pub use github::{GitHubClient, ReleaseHost};
