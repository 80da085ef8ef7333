//! Shared helper functions for command execution.

use std::path::PathBuf;

use crate::error::{CliError, Result};

/// Resolve the API token: the explicit flag (or GH_TOKEN, which clap
/// already folded in), then GITHUB_TOKEN.
pub(super) fn resolve_token(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .ok_or_else(|| CliError::MissingToken.into())
}

/// Parse a NAME=PATH asset argument. A bare PATH publishes under the
/// file's own name.
pub(super) fn parse_asset_arg(arg: &str) -> Result<(String, PathBuf)> {
    if let Some((name, path)) = arg.split_once('=') {
        if name.is_empty() || path.is_empty() {
            return Err(CliError::InvalidArguments {
                reason: format!("invalid asset '{arg}'. Expected: NAME=PATH"),
            }
            .into());
        }
        return Ok((name.to_string(), PathBuf::from(path)));
    }

    let path = PathBuf::from(arg);
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidArguments {
            reason: format!("cannot derive an asset name from path '{arg}'"),
        })?;
    Ok((name.to_string(), path))
}
