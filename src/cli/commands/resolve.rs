//! Resolve and print the latest upstream version for a channel.

use crate::config::{ReleaseKind, RepoRef};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::version;

pub(super) async fn execute(kind: ReleaseKind, token: Option<String>, json: bool) -> Result<()> {
    let token = super::helpers::resolve_token(token)?;
    let client = GitHubClient::new(&token)?;
    let upstream = RepoRef::upstream();

    let version_id = version::resolve(&client, &upstream, kind).await?;

    // The resolved identifier is the command's product; print it even
    // under --quiet.
    if json {
        println!(
            "{}",
            serde_json::json!({ "kind": kind.as_str(), "version": version_id })
        );
    } else {
        println!("{version_id}");
    }

    Ok(())
}
