//! GitHub and npm collaborator error types

use thiserror::Error;

/// Error types for repository fetching and cloning
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Octocrab library error
    #[error("Octocrab error: {0}")]
    Octocrab(octocrab::Error),

    /// Generic GitHub API error
    #[error("GitHub API error: {0}")]
    Api(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Transport failure talking to GitHub or the npm registry
    #[error("Network error: {0}")]
    Network(String),

    /// URL that is neither a GitHub repository nor an npm package
    #[error("Invalid package URL: {0}")]
    InvalidUrl(String),

    /// Cloning the repository failed or timed out
    #[error("Clone failed: {0}")]
    Clone(String),

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => match source.status_code.as_u16() {
                404 => GitHubError::NotFound(source.message.clone()),
                429 => GitHubError::RateLimitExceeded,
                403 if source.message.to_lowercase().contains("rate limit") => {
                    GitHubError::RateLimitExceeded
                }
                _ => GitHubError::Octocrab(err),
            },
            octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. } => {
                GitHubError::Network(err.to_string())
            }
            _ => GitHubError::Octocrab(err),
        }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 404 => GitHubError::NotFound(err.to_string()),
            Some(status) if status.as_u16() == 429 => GitHubError::RateLimitExceeded,
            _ => GitHubError::Network(err.to_string()),
        }
    }
}

// Convenience conversions
impl From<String> for GitHubError {
    fn from(s: String) -> Self {
        GitHubError::Api(s)
    }
}

impl From<&str> for GitHubError {
    fn from(s: &str) -> Self {
        GitHubError::Api(s.to_string())
    }
}
