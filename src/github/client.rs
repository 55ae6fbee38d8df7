//! GitHub API client wrapper
//!
//! Provides the repository facts and working trees the scoring pipeline
//! consumes, without exposing Octocrab.
//!
//! # Examples
//!
//! ```rust,no_run
//! use trustscore::{GitHubClient, ScoringConfig, score_package};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!     let result = score_package(&gh, "lodash", "lodash", &ScoringConfig::default()).await?;
//!     println!("{}", serde_json::to_string(&result)?);
//!     Ok(())
//! }
//! ```

use crate::github::clone::{ClonedRepo, clone_repository};
use crate::github::config::FetchConfig;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::fetch::fetch_repo_details;
use crate::github::npm::resolve_npm_package;
use crate::github::url::{PackageUrl, classify_url};
use crate::github::util::spawn_task;
use crate::runtime::AsyncTask;
use crate::scoring::source::RepositorySource;
use crate::scoring::types::RepoDetails;
use octocrab::Octocrab;
use std::sync::Arc;

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    http: reqwest::Client,
    config: Arc<FetchConfig>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    #[must_use]
    pub fn fetch_config(&self) -> &FetchConfig {
        &self.config
    }

    /// Resolve a GitHub or npm URL to `(owner, repo)`.
    pub async fn resolve_url(&self, url: &str) -> GitHubResult<(String, String)> {
        match classify_url(url)? {
            PackageUrl::GitHub { owner, repo } => Ok((owner, repo)),
            PackageUrl::Npm { package } => {
                resolve_npm_package(&self.http, &self.config.registry_url, &package).await
            }
        }
    }

    /// Fetch the repository snapshot the scorers read.
    pub fn repo_details(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> AsyncTask<GitHubResult<RepoDetails>> {
        let (inner, config) = (Arc::clone(&self.inner), Arc::clone(&self.config));
        let (owner, repo) = (owner.into(), repo.into());
        spawn_task(async move { fetch_repo_details(inner, &owner, &repo, &config).await })
    }

    /// Clone the repository into a temporary working tree.
    pub async fn clone_repo(&self, owner: &str, repo: &str) -> GitHubResult<ClonedRepo> {
        let url = format!("https://github.com/{owner}/{repo}.git");
        clone_repository(&url, self.config.clone_timeout).await
    }
}

impl RepositorySource for GitHubClient {
    type Handle = ClonedRepo;
    type Error = GitHubError;

    async fn fetch_repo_details(&self, owner: &str, repo: &str) -> GitHubResult<RepoDetails> {
        self.repo_details(owner, repo)
            .await
            .map_err(|e| GitHubError::Api(format!("fetch task failed: {e}")))?
    }

    async fn materialize_repository(&self, owner: &str, repo: &str) -> GitHubResult<ClonedRepo> {
        self.clone_repo(owner, repo).await
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
    fetch_config: FetchConfig,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
            fetch_config: FetchConfig::default(),
        }
    }

    /// Set personal access token for authentication
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set base URI (for GitHub Enterprise)
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Set paging, lookback and clone limits
    pub fn fetch_config(mut self, config: FetchConfig) -> Self {
        self.fetch_config = config;
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        // Set base URI if provided
        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
            http,
            config: Arc::new(self.fetch_config),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
