//! npm registry lookup for a package's source repository

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::url::{normalize_repository_url, parse_github_url};
use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PackageDocument {
    repository: Option<RepositoryField>,
}

// `repository` is either a bare string or `{ "type": "git", "url": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Url(String),
    Object { url: Option<String> },
}

impl RepositoryField {
    fn url(&self) -> Option<&str> {
        match self {
            RepositoryField::Url(url) => Some(url),
            RepositoryField::Object { url } => url.as_deref(),
        }
    }
}

/// Resolve an npm package name to the `(owner, repo)` of its GitHub repository.
pub async fn resolve_npm_package(
    http: &reqwest::Client,
    registry_url: &str,
    package: &str,
) -> GitHubResult<(String, String)> {
    let endpoint = format!(
        "{}/{}",
        registry_url.trim_end_matches('/'),
        package.replace('/', "%2F")
    );
    debug!("Resolving npm package {package} via {endpoint}");

    let document: PackageDocument = http
        .get(&endpoint)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let url = document
        .repository
        .as_ref()
        .and_then(RepositoryField::url)
        .ok_or_else(|| GitHubError::NotFound(format!("no repository for npm package {package}")))?;

    let normalized = normalize_repository_url(url);
    parse_github_url(&normalized).ok_or_else(|| {
        GitHubError::InvalidUrl(format!(
            "npm package {package} is not hosted on GitHub: {normalized}"
        ))
    })
}
