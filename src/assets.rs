//! Asset publishing: attach firmware binaries to a release, replacing
//! prior same-named assets.

use std::path::PathBuf;

use bytes::Bytes;

use crate::config::PublishConfig;
use crate::error::{AssetError, Result};
use crate::github::ReleaseHost;

/// What to do with an asset name that may already exist on the release.
///
/// Replacement carries the id of the asset to remove, so an update
/// without one is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetAction {
    /// The name is new on this release
    Create,
    /// The name exists; delete the prior asset before uploading
    Update {
        /// Id of the asset to delete
        asset_id: u64,
    },
}

/// A firmware binary staged for upload.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    /// Name the asset is published under
    pub filename: String,
    /// Local path of the built artifact
    pub build_path: PathBuf,
    /// Create vs replace
    pub action: AssetAction,
}

/// Upload an asset to the release, deleting the prior same-named asset
/// first when replacing.
///
/// GitHub rejects duplicate asset names, so the caller decides
/// create-vs-update up front instead of leaning on that conflict
/// behavior. The file is read whole; firmware binaries fit in memory.
pub async fn upload_asset(
    host: &impl ReleaseHost,
    config: &PublishConfig,
    release_id: u64,
    asset: &AssetUpload,
) -> Result<u64> {
    let content = tokio::fs::read(&asset.build_path).await?;

    if let AssetAction::Update { asset_id } = asset.action {
        log::debug!("deleting existing asset {} (id {asset_id})", asset.filename);
        host.delete_asset(&config.target, asset_id).await?;
    }

    log::debug!(
        "uploading {} ({} bytes) to release {release_id}",
        asset.filename,
        content.len()
    );
    let uploaded = host
        .upload_asset(
            &config.target,
            release_id,
            &asset.filename,
            Bytes::from(content),
        )
        .await?;

    uploaded.id.ok_or_else(|| {
        AssetError::UploadFailed {
            filename: asset.filename.clone(),
        }
        .into()
    })
}
