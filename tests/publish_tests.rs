//! Pipeline behavior against an in-memory release host.

use std::sync::Mutex;

use bytes::Bytes;
use marlin_publish::config::{PublishConfig, ReleaseKind, RepoRef};
use marlin_publish::error::{AssetError, PublishError, ReleaseError, Result, VersionError};
use marlin_publish::github::{
    Branch, BranchCommit, NewRelease, Release, ReleaseAsset, ReleaseHost, UploadedAsset,
};
use marlin_publish::{assets, release, version};

#[derive(Default)]
struct FakeHost {
    state: Mutex<HostState>,
}

#[derive(Default)]
struct HostState {
    stable_tag: String,
    nightly_sha: String,
    releases: Vec<StoredRelease>,
    next_id: u64,
    create_calls: usize,
    fail_lookup: bool,
    omit_created_id: bool,
    omit_uploaded_id: bool,
    /// Mutating API calls, in order
    ops: Vec<String>,
}

#[derive(Clone)]
struct StoredRelease {
    id: u64,
    tag: String,
    name: String,
    body: String,
    prerelease: bool,
    assets: Vec<(u64, String)>,
}

impl FakeHost {
    fn with_stable(tag: &str) -> Self {
        let host = Self::default();
        host.state.lock().unwrap().stable_tag = tag.to_string();
        host
    }

    fn with_nightly(sha: &str) -> Self {
        let host = Self::default();
        host.state.lock().unwrap().nightly_sha = sha.to_string();
        host
    }

    fn seed_release(&self, id: u64, tag: &str, assets: &[(u64, &str)]) {
        self.state.lock().unwrap().releases.push(StoredRelease {
            id,
            tag: tag.to_string(),
            name: tag.to_string(),
            body: String::new(),
            prerelease: false,
            assets: assets
                .iter()
                .map(|(asset_id, name)| (*asset_id, name.to_string()))
                .collect(),
        });
    }

    fn stored(&self, tag: &str) -> StoredRelease {
        self.state
            .lock()
            .unwrap()
            .releases
            .iter()
            .find(|r| r.tag == tag)
            .cloned()
            .unwrap_or_else(|| panic!("no release stored under tag {tag}"))
    }

    fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    fn set(&self, f: impl FnOnce(&mut HostState)) {
        f(&mut self.state.lock().unwrap());
    }
}

impl ReleaseHost for FakeHost {
    async fn latest_release(&self, _repo: &RepoRef) -> Result<Release> {
        let state = self.state.lock().unwrap();
        Ok(Release {
            id: Some(1),
            tag_name: state.stable_tag.clone(),
            name: None,
            prerelease: false,
            assets: Vec::new(),
        })
    }

    async fn branch_head(&self, _repo: &RepoRef, branch: &str) -> Result<Branch> {
        let state = self.state.lock().unwrap();
        Ok(Branch {
            name: branch.to_string(),
            commit: BranchCommit {
                sha: state.nightly_sha.clone(),
            },
        })
    }

    async fn release_by_tag(&self, _repo: &RepoRef, tag: &str) -> Result<Option<Release>> {
        let state = self.state.lock().unwrap();
        if state.fail_lookup {
            return Err(PublishError::Io(std::io::Error::other("api outage")));
        }

        Ok(state.releases.iter().find(|r| r.tag == tag).map(|r| Release {
            id: Some(r.id),
            tag_name: r.tag.clone(),
            name: Some(r.name.clone()),
            prerelease: r.prerelease,
            assets: r
                .assets
                .iter()
                .map(|(id, name)| ReleaseAsset {
                    id: *id,
                    name: name.clone(),
                })
                .collect(),
        }))
    }

    async fn create_release(&self, _repo: &RepoRef, new: &NewRelease) -> Result<Release> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        state.ops.push(format!("create:{}", new.tag_name));

        if state.omit_created_id {
            return Ok(Release {
                id: None,
                tag_name: new.tag_name.clone(),
                name: Some(new.name.clone()),
                prerelease: new.prerelease,
                assets: Vec::new(),
            });
        }

        state.next_id += 1;
        let id = 100 + state.next_id;
        state.releases.push(StoredRelease {
            id,
            tag: new.tag_name.clone(),
            name: new.name.clone(),
            body: new.body.clone(),
            prerelease: new.prerelease,
            assets: Vec::new(),
        });

        Ok(Release {
            id: Some(id),
            tag_name: new.tag_name.clone(),
            name: Some(new.name.clone()),
            prerelease: new.prerelease,
            assets: Vec::new(),
        })
    }

    async fn delete_asset(&self, _repo: &RepoRef, asset_id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("delete:{asset_id}"));
        for release in &mut state.releases {
            release.assets.retain(|(id, _)| *id != asset_id);
        }
        Ok(())
    }

    async fn upload_asset(
        &self,
        _repo: &RepoRef,
        release_id: u64,
        filename: &str,
        content: Bytes,
    ) -> Result<UploadedAsset> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("upload:{filename}:{}", content.len()));

        if state.omit_uploaded_id {
            return Ok(UploadedAsset {
                id: None,
                name: Some(filename.to_string()),
            });
        }

        state.next_id += 1;
        let id = 100 + state.next_id;
        if let Some(release) = state.releases.iter_mut().find(|r| r.id == release_id) {
            release.assets.push((id, filename.to_string()));
        }

        Ok(UploadedAsset {
            id: Some(id),
            name: Some(filename.to_string()),
        })
    }
}

fn test_config() -> PublishConfig {
    PublishConfig {
        upstream: RepoRef::upstream(),
        target: RepoRef::parse("marlin-builds/firmware-nightlies").unwrap(),
    }
}

fn firmware_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// --- version resolution ---

#[tokio::test]
async fn stable_resolution_returns_tag() {
    let host = FakeHost::with_stable("2.1.2.4");
    let resolved = version::latest_stable(&host, &RepoRef::upstream()).await.unwrap();
    assert_eq!(resolved, "2.1.2.4");
}

#[tokio::test]
async fn stable_resolution_rejects_marlin_one() {
    let host = FakeHost::with_stable("1.1.9.1");
    let err = version::latest_stable(&host, &RepoRef::upstream())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PublishError::Version(VersionError::InvalidStableTag { ref tag }) if tag == "1.1.9.1"
    ));
}

#[tokio::test]
async fn nightly_resolution_returns_branch_head() {
    let host = FakeHost::with_nightly("4d32e9c1a6f0");
    let resolved = version::latest_nightly(&host, &RepoRef::upstream())
        .await
        .unwrap();
    assert_eq!(resolved, "4d32e9c1a6f0");
}

// --- release reconciliation ---

#[tokio::test]
async fn creates_stable_release_with_expected_shape() {
    let host = FakeHost::default();
    let config = test_config();

    let id = release::ensure_release(&host, &config, "v2.1.3", ReleaseKind::Stable, "2024-01-01T00:00")
        .await
        .unwrap();

    let stored = host.stored("stable-v2.1.3");
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, "stable-v2.1.3");
    assert!(!stored.prerelease);
    assert!(stored.body.ends_with("releases/tag/v2.1.3"));
}

#[tokio::test]
async fn creates_nightly_release_with_expected_shape() {
    let host = FakeHost::default();
    let config = test_config();

    let id = release::ensure_release(&host, &config, "abc123", ReleaseKind::Nightly, "2024-01-01T00:00")
        .await
        .unwrap();

    let stored = host.stored("nightly-abc123");
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, "nightly-2024-01-01T00:00");
    assert!(stored.prerelease);
    assert!(stored.body.ends_with("tree/abc123"));
}

#[tokio::test]
async fn repeated_runs_reuse_the_release() {
    let host = FakeHost::default();
    let config = test_config();

    let first = release::ensure_release(&host, &config, "2.1.2.4", ReleaseKind::Stable, "t0")
        .await
        .unwrap();
    let second = release::ensure_release(&host, &config, "2.1.2.4", ReleaseKind::Stable, "t1")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(host.create_calls(), 1);
}

#[tokio::test]
async fn preexisting_release_short_circuits_creation() {
    let host = FakeHost::default();
    host.seed_release(777, "nightly-abc123", &[]);
    let config = test_config();

    let id = release::ensure_release(&host, &config, "abc123", ReleaseKind::Nightly, "t0")
        .await
        .unwrap();

    assert_eq!(id, 777);
    assert_eq!(host.create_calls(), 0);
}

#[tokio::test]
async fn creation_without_id_is_an_error() {
    let host = FakeHost::default();
    host.set(|state| state.omit_created_id = true);
    let config = test_config();

    let err = release::ensure_release(&host, &config, "2.1.2.4", ReleaseKind::Stable, "t0")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::Release(ReleaseError::CreationFailed { .. })
    ));
}

#[tokio::test]
async fn lookup_failure_aborts_instead_of_creating() {
    let host = FakeHost::default();
    host.set(|state| state.fail_lookup = true);
    let config = test_config();

    let result =
        release::ensure_release(&host, &config, "2.1.2.4", ReleaseKind::Stable, "t0").await;

    assert!(result.is_err());
    assert_eq!(host.create_calls(), 0);
}

// --- asset publishing ---

#[tokio::test]
async fn create_action_uploads_without_deleting() {
    let host = FakeHost::default();
    host.seed_release(42, "nightly-abc123", &[]);
    let config = test_config();
    let dir = tempfile::tempdir().unwrap();

    let upload = assets::AssetUpload {
        filename: "firmware-ender3.bin".to_string(),
        build_path: firmware_file(&dir, "firmware-ender3.bin", b"firmware bytes"),
        action: assets::AssetAction::Create,
    };
    let asset_id = assets::upload_asset(&host, &config, 42, &upload).await.unwrap();

    assert!(asset_id > 0);
    assert_eq!(host.ops(), vec!["upload:firmware-ender3.bin:14".to_string()]);
    let stored = host.stored("nightly-abc123");
    assert_eq!(stored.assets.len(), 1);
    assert_eq!(stored.assets[0].1, "firmware-ender3.bin");
}

#[tokio::test]
async fn update_action_deletes_prior_asset_first() {
    let host = FakeHost::default();
    host.seed_release(42, "nightly-abc123", &[(7, "firmware-ender3.bin")]);
    let config = test_config();
    let dir = tempfile::tempdir().unwrap();

    let upload = assets::AssetUpload {
        filename: "firmware-ender3.bin".to_string(),
        build_path: firmware_file(&dir, "firmware-ender3.bin", b"rebuilt"),
        action: assets::AssetAction::Update { asset_id: 7 },
    };
    let asset_id = assets::upload_asset(&host, &config, 42, &upload).await.unwrap();

    assert_ne!(asset_id, 7);
    assert_eq!(
        host.ops(),
        vec![
            "delete:7".to_string(),
            "upload:firmware-ender3.bin:7".to_string()
        ]
    );
    // One asset under the name, the replacement
    let stored = host.stored("nightly-abc123");
    assert_eq!(stored.assets, vec![(asset_id, "firmware-ender3.bin".to_string())]);
}

#[tokio::test]
async fn upload_without_id_is_an_error() {
    let host = FakeHost::default();
    host.seed_release(42, "nightly-abc123", &[]);
    host.set(|state| state.omit_uploaded_id = true);
    let config = test_config();
    let dir = tempfile::tempdir().unwrap();

    let upload = assets::AssetUpload {
        filename: "firmware-ender3.bin".to_string(),
        build_path: firmware_file(&dir, "firmware-ender3.bin", b"firmware bytes"),
        action: assets::AssetAction::Create,
    };
    let err = assets::upload_asset(&host, &config, 42, &upload)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::Asset(AssetError::UploadFailed { ref filename }) if filename == "firmware-ender3.bin"
    ));
}

#[tokio::test]
async fn missing_build_file_is_an_io_error() {
    let host = FakeHost::default();
    host.seed_release(42, "nightly-abc123", &[]);
    let config = test_config();

    let upload = assets::AssetUpload {
        filename: "firmware-ender3.bin".to_string(),
        build_path: "does/not/exist.bin".into(),
        action: assets::AssetAction::Create,
    };
    let err = assets::upload_asset(&host, &config, 42, &upload)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Io(_)));
    assert!(host.ops().is_empty());
}

// --- full pipeline over the fake host ---

#[tokio::test]
async fn nightly_pipeline_end_to_end() {
    let host = FakeHost::with_nightly("abc123");
    let config = test_config();
    let dir = tempfile::tempdir().unwrap();

    let resolved = version::resolve(&host, &config.upstream, ReleaseKind::Nightly)
        .await
        .unwrap();
    let release_id =
        release::ensure_release(&host, &config, &resolved, ReleaseKind::Nightly, "2024-01-01T00:00")
            .await
            .unwrap();

    let upload = assets::AssetUpload {
        filename: "firmware-ender3.bin".to_string(),
        build_path: firmware_file(&dir, "firmware-ender3.bin", b"firmware bytes"),
        action: assets::AssetAction::Create,
    };
    assets::upload_asset(&host, &config, release_id, &upload)
        .await
        .unwrap();

    // A second run lands on the same release
    let rerun =
        release::ensure_release(&host, &config, &resolved, ReleaseKind::Nightly, "2024-01-02T00:00")
            .await
            .unwrap();
    assert_eq!(rerun, release_id);
    assert_eq!(host.create_calls(), 1);

    let stored = host.stored("nightly-abc123");
    assert!(stored.prerelease);
    assert_eq!(stored.assets.len(), 1);
}
