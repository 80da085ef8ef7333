//! Version resolution: which upstream reference point a publishing run
//! targets.
//!
//! Stable builds track the latest published Marlin release; nightly
//! builds track the tip of the upstream maintenance branch.

use crate::config::{ReleaseKind, RepoRef};
use crate::error::{Result, VersionError};
use crate::github::ReleaseHost;

/// Branch the nightly channel tracks.
pub const NIGHTLY_BRANCH: &str = "bugfix-2.1.x";

/// Resolve the version identifier for `kind`: a release tag for stable,
/// a commit hash for nightly.
pub async fn resolve(
    host: &impl ReleaseHost,
    upstream: &RepoRef,
    kind: ReleaseKind,
) -> Result<String> {
    match kind {
        ReleaseKind::Stable => latest_stable(host, upstream).await,
        ReleaseKind::Nightly => latest_nightly(host, upstream).await,
    }
}

/// Latest stable release tag of the upstream repository.
///
/// The tag must look like a Marlin 2 version; Marlin 1.x firmware uses a
/// different build layout and is not publishable by this pipeline.
pub async fn latest_stable(host: &impl ReleaseHost, upstream: &RepoRef) -> Result<String> {
    log::debug!("resolving latest stable release of {upstream}");

    let release = host.latest_release(upstream).await?;
    if is_marlin2(&release.tag_name) {
        Ok(release.tag_name)
    } else {
        Err(VersionError::InvalidStableTag {
            tag: release.tag_name,
        }
        .into())
    }
}

/// Tip commit of the upstream nightly branch. Any branch head is
/// accepted; nightly builds are not version-checked.
pub async fn latest_nightly(host: &impl ReleaseHost, upstream: &RepoRef) -> Result<String> {
    log::debug!("resolving head of {NIGHTLY_BRANCH} on {upstream}");

    let branch = host.branch_head(upstream, NIGHTLY_BRANCH).await?;
    Ok(branch.commit.sha)
}

/// True when `tag` names a Marlin 2 era version: the first character is
/// a digit with value >= 2. Marlin stable tags carry no `v` prefix.
pub fn is_marlin2(tag: &str) -> bool {
    tag.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .is_some_and(|major| major >= 2)
}

#[cfg(test)]
mod tests {
    use super::is_marlin2;

    #[test]
    fn accepts_major_two_and_up() {
        assert!(is_marlin2("2.1.2.4"));
        assert!(is_marlin2("2.0.9.7"));
        assert!(is_marlin2("3.0"));
        assert!(is_marlin2("2"));
    }

    #[test]
    fn rejects_marlin_one() {
        assert!(!is_marlin2("1.1.9.1"));
        assert!(!is_marlin2("1.0.2-2"));
    }

    #[test]
    fn rejects_non_numeric_without_panicking() {
        assert!(!is_marlin2(""));
        assert!(!is_marlin2("v2.1.2"));
        assert!(!is_marlin2("bugfix-2.1.x"));
        assert!(!is_marlin2("release"));
    }
}
