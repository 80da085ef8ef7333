//! Error types for publishing operations.
//!
//! All errors are fail-fast: a publishing run aborts on the first
//! irregularity so the CI driver can surface it plainly.

use thiserror::Error;

/// Result type alias for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all publishing operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Version resolution errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Release reconciliation errors
    #[error("Release error: {0}")]
    Release(#[from] ReleaseError),

    /// Asset publishing errors
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// GitHub API errors
    #[error("GitHub API error: {0}")]
    Api(#[from] ApiError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Version resolution errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// The latest upstream release tag is not a Marlin 2 version
    #[error("latest stable tag '{tag}' is not a Marlin 2 version")]
    InvalidStableTag {
        /// Tag returned by the upstream latest-release lookup
        tag: String,
    },
}

/// Release reconciliation errors
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// The creation response carried no release id
    #[error("GitHub returned no id for created release '{tag}'")]
    CreationFailed {
        /// Tag the release was created under
        tag: String,
    },
}

/// Asset publishing errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The upload response carried no asset id
    #[error("GitHub returned no id for uploaded asset '{filename}'")]
    UploadFailed {
        /// Name the asset was uploaded under
        filename: String,
    },
}

/// GitHub API transport and status errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub returned {status} for {url}: {body}")]
    Status {
        /// HTTP status code
        status: reqwest::StatusCode,
        /// Request URL
        url: String,
        /// Response body, as text
        body: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// No GitHub token available
    #[error("GitHub token not provided. Set GH_TOKEN or GITHUB_TOKEN, or pass --token")]
    MissingToken,
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::Cli(CliError::MissingToken) => vec![
                "Export a token: GH_TOKEN=... or GITHUB_TOKEN=...".to_string(),
                "Pass --token on the command line".to_string(),
            ],
            PublishError::Api(ApiError::Status { status, .. })
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN =>
            {
                vec![
                    "Verify the token is valid and not expired".to_string(),
                    "The token needs 'contents: write' permission on the target repository"
                        .to_string(),
                ]
            }
            PublishError::Version(VersionError::InvalidStableTag { .. }) => vec![
                "Inspect the latest release on MarlinFirmware/Marlin; upstream tagging may have changed"
                    .to_string(),
            ],
            PublishError::Io(_) => vec![
                "Check that the build artifact paths exist and are readable".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
