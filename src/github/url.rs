//! Package URL classification and normalization

use crate::github::error::{GitHubError, GitHubResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref GITHUB_RE: Result<Regex, regex::Error> =
        Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([^/]+)/([^/#?]+)");
    static ref NPM_RE: Result<Regex, regex::Error> =
        Regex::new(r"^(?:https?://)?(?:www\.)?npmjs\.com/package/((?:@[^/]+/)?[^/#?]+)");
}

/// Where a package URL points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageUrl {
    GitHub { owner: String, repo: String },
    Npm { package: String },
}

/// Classify a URL as a GitHub repository or an npm package page.
pub fn classify_url(url: &str) -> GitHubResult<PackageUrl> {
    let url = url.trim();
    if let Some((owner, repo)) = parse_github_url(url) {
        return Ok(PackageUrl::GitHub { owner, repo });
    }

    let npm_re = NPM_RE
        .as_ref()
        .map_err(|e| GitHubError::InvalidUrl(e.to_string()))?;
    if let Some(caps) = npm_re.captures(url) {
        return Ok(PackageUrl::Npm {
            package: caps[1].to_string(),
        });
    }

    Err(GitHubError::InvalidUrl(url.to_string()))
}

/// Extract `(owner, repo)` from a GitHub URL in HTTPS, SSH or `git+` form.
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let normalized = normalize_repository_url(url);
    let caps = GITHUB_RE.as_ref().ok()?.captures(&normalized)?;
    let repo = caps[2].trim_end_matches(".git");
    if repo.is_empty() {
        return None;
    }
    Some((caps[1].to_string(), repo.to_string()))
}

/// Rewrite repository URLs from package metadata into plain HTTPS form.
///
/// Handles `git+https://`, `git://`, `git@github.com:` and `ssh://git@`
/// prefixes and drops a trailing `.git`.
#[must_use]
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);

    let https = if let Some(rest) = url.strip_prefix("git@") {
        format!("https://{}", rest.replacen(':', "/", 1))
    } else if let Some(rest) = url.strip_prefix("ssh://git@") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("git://") {
        format!("https://{rest}")
    } else {
        url.to_string()
    };

    https.trim_end_matches('/').trim_end_matches(".git").to_string()
}
