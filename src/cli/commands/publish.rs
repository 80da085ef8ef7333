//! Full publishing pipeline: resolve the upstream version, reconcile the
//! target release, upload assets.

use chrono::Utc;

use crate::assets::{AssetAction, AssetUpload};
use crate::cli::OutputManager;
use crate::config::{PublishConfig, ReleaseKind, RepoRef};
use crate::error::{CliError, Result};
use crate::github::{GitHubClient, ReleaseHost};
use crate::{assets, release, version};

/// Format of the timestamp baked into nightly display names.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub(super) async fn execute(
    kind: ReleaseKind,
    repo: &str,
    token: Option<String>,
    asset_args: &[String],
    output: &OutputManager,
) -> Result<()> {
    let config = PublishConfig {
        upstream: RepoRef::upstream(),
        target: RepoRef::parse(repo)?,
    };

    let mut staged = Vec::with_capacity(asset_args.len());
    for arg in asset_args {
        staged.push(super::helpers::parse_asset_arg(arg)?);
    }

    // Duplicate names would fight over the same asset slot.
    for (i, (name, _)) in staged.iter().enumerate() {
        if staged[..i].iter().any(|(seen, _)| seen == name) {
            return Err(CliError::InvalidArguments {
                reason: format!("duplicate asset name '{name}'"),
            }
            .into());
        }
    }

    let token = super::helpers::resolve_token(token)?;
    let client = GitHubClient::new(&token)?;

    output.info(&format!(
        "Resolving latest {kind} version of {}",
        config.upstream
    ));
    let version_id = version::resolve(&client, &config.upstream, kind).await?;
    output.indent(&format!("version: {version_id}"));

    let now = Utc::now().format(DATE_TIME_FORMAT).to_string();
    let release_id = release::ensure_release(&client, &config, &version_id, kind, &now).await?;

    let tag = release::release_tag(kind, &version_id);
    output.info(&format!("Using release {tag} (id {release_id})"));

    // Existing assets on the release decide create-vs-update per name.
    let existing = client
        .release_by_tag(&config.target, &tag)
        .await?
        .map(|r| r.assets)
        .unwrap_or_default();

    let staged_count = staged.len();
    for (filename, build_path) in staged {
        let action = match existing.iter().find(|a| a.name == filename) {
            Some(prior) => {
                output.warn(&format!("replacing existing asset {filename}"));
                AssetAction::Update { asset_id: prior.id }
            }
            None => AssetAction::Create,
        };

        let upload = AssetUpload {
            filename,
            build_path,
            action,
        };
        let asset_id = assets::upload_asset(&client, &config, release_id, &upload).await?;
        output.indent(&format!("uploaded {} (asset id {asset_id})", upload.filename));
    }

    output.success(&format!(
        "Published {staged_count} asset(s) to {} release {tag}",
        config.target
    ));
    Ok(())
}
