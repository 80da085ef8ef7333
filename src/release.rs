//! Release reconciliation: find-or-create the target release for a
//! resolved version.

use crate::config::{PublishConfig, ReleaseKind, RepoRef};
use crate::error::{ReleaseError, Result};
use crate::github::{NewRelease, ReleaseHost};

/// Tag of the target release for a (kind, version) pair.
pub fn release_tag(kind: ReleaseKind, version: &str) -> String {
    format!("{kind}-{version}")
}

/// Display name. Nightly runs carry the wall-clock stamp so successive
/// nightlies are distinguishable in the release list.
fn release_name(kind: ReleaseKind, version: &str, current_date_time: &str) -> String {
    match kind {
        ReleaseKind::Stable => format!("{kind}-{version}"),
        ReleaseKind::Nightly => format!("{kind}-{current_date_time}"),
    }
}

/// Body text: a link back to the upstream source the build came from.
fn release_body(kind: ReleaseKind, upstream: &RepoRef, version: &str) -> String {
    match kind {
        ReleaseKind::Stable => upstream.tag_url(version),
        ReleaseKind::Nightly => upstream.tree_url(version),
    }
}

/// Find the release tagged `{kind}-{version}` in the target repository,
/// or create it. Returns the release id either way.
///
/// Re-running after a partial failure (say, an asset upload died) finds
/// the release the earlier run created instead of duplicating it. A 404
/// from the lookup means "create"; any other lookup failure aborts the
/// run.
pub async fn ensure_release(
    host: &impl ReleaseHost,
    config: &PublishConfig,
    version: &str,
    kind: ReleaseKind,
    current_date_time: &str,
) -> Result<u64> {
    let tag = release_tag(kind, version);

    if let Some(existing) = host.release_by_tag(&config.target, &tag).await? {
        if let Some(id) = existing.id {
            log::debug!("release {tag} already exists with id {id}");
            return Ok(id);
        }
    }

    let new = NewRelease {
        tag_name: tag.clone(),
        name: release_name(kind, version, current_date_time),
        body: release_body(kind, &config.upstream, version),
        prerelease: kind.is_prerelease(),
    };

    log::debug!("creating release {tag} on {}", config.target);
    let created = host.create_release(&config.target, &new).await?;
    created
        .id
        .ok_or_else(|| ReleaseError::CreationFailed { tag }.into())
}
