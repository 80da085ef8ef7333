//! GitHub REST client and the capability trait the pipeline is written
//! against.

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::types::{Branch, NewRelease, Release, UploadedAsset};
use crate::config::RepoRef;
use crate::error::{ApiError, CliError, Result};

const API_BASE: &str = "https://api.github.com";
const UPLOAD_BASE: &str = "https://uploads.github.com";

/// Narrow view of the release API: exactly the operations the publishing
/// pipeline needs. The reconciler and asset publisher are written against
/// this trait so they can be exercised with an in-memory host.
#[allow(async_fn_in_trait)]
pub trait ReleaseHost {
    /// Fetch the latest published release of `repo`.
    async fn latest_release(&self, repo: &RepoRef) -> Result<Release>;

    /// Fetch `branch` on `repo`, including its tip commit.
    async fn branch_head(&self, repo: &RepoRef, branch: &str) -> Result<Branch>;

    /// Fetch the release bound to `tag`, or `None` if no such release
    /// exists. Failures other than 404 are errors, not absence.
    async fn release_by_tag(&self, repo: &RepoRef, tag: &str) -> Result<Option<Release>>;

    /// Create a release on `repo`.
    async fn create_release(&self, repo: &RepoRef, new: &NewRelease) -> Result<Release>;

    /// Delete a release asset by id.
    async fn delete_asset(&self, repo: &RepoRef, asset_id: u64) -> Result<()>;

    /// Upload `content` as an asset named `filename` on a release.
    async fn upload_asset(
        &self,
        repo: &RepoRef,
        release_id: u64,
        filename: &str,
        content: Bytes,
    ) -> Result<UploadedAsset>;
}

/// Authenticated reqwest client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
}

impl GitHubClient {
    /// Build a client authenticated with `token`.
    pub fn new(token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            CliError::InvalidArguments {
                reason: "token contains characters not valid in an HTTP header".to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self { http })
    }

    /// Turn a non-success response into an [`ApiError::Status`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, url, body }.into())
    }
}

impl ReleaseHost for GitHubClient {
    async fn latest_release(&self, repo: &RepoRef) -> Result<Release> {
        let url = format!("{API_BASE}/repos/{}/{}/releases/latest", repo.owner, repo.name);
        let response = self.http.get(&url).send().await.map_err(ApiError::Http)?;
        let release = Self::check(response)
            .await?
            .json::<Release>()
            .await
            .map_err(ApiError::Http)?;
        Ok(release)
    }

    async fn branch_head(&self, repo: &RepoRef, branch: &str) -> Result<Branch> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/branches/{branch}",
            repo.owner, repo.name
        );
        let response = self.http.get(&url).send().await.map_err(ApiError::Http)?;
        let head = Self::check(response)
            .await?
            .json::<Branch>()
            .await
            .map_err(ApiError::Http)?;
        Ok(head)
    }

    async fn release_by_tag(&self, repo: &RepoRef, tag: &str) -> Result<Option<Release>> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/releases/tags/{tag}",
            repo.owner, repo.name
        );
        let response = self.http.get(&url).send().await.map_err(ApiError::Http)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let release = Self::check(response)
            .await?
            .json::<Release>()
            .await
            .map_err(ApiError::Http)?;
        Ok(Some(release))
    }

    async fn create_release(&self, repo: &RepoRef, new: &NewRelease) -> Result<Release> {
        let url = format!("{API_BASE}/repos/{}/{}/releases", repo.owner, repo.name);
        let response = self
            .http
            .post(&url)
            .json(new)
            .send()
            .await
            .map_err(ApiError::Http)?;
        let release = Self::check(response)
            .await?
            .json::<Release>()
            .await
            .map_err(ApiError::Http)?;
        Ok(release)
    }

    async fn delete_asset(&self, repo: &RepoRef, asset_id: u64) -> Result<()> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/releases/assets/{asset_id}",
            repo.owner, repo.name
        );
        let response = self.http.delete(&url).send().await.map_err(ApiError::Http)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upload_asset(
        &self,
        repo: &RepoRef,
        release_id: u64,
        filename: &str,
        content: Bytes,
    ) -> Result<UploadedAsset> {
        // Uploads go to a dedicated host, not the main API endpoint.
        let url = format!(
            "{UPLOAD_BASE}/repos/{}/{}/releases/{release_id}/assets",
            repo.owner, repo.name
        );
        let response = self
            .http
            .post(&url)
            .query(&[("name", filename)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await
            .map_err(ApiError::Http)?;
        let asset = Self::check(response)
            .await?
            .json::<UploadedAsset>()
            .await
            .map_err(ApiError::Http)?;
        Ok(asset)
    }
}
