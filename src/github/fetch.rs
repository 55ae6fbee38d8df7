//! Assemble a `RepoDetails` snapshot from the GitHub API

use crate::github::config::FetchConfig;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::list_commits::{ListCommitsOptions, list_commits};
use crate::github::list_contributors::list_contributors;
use crate::github::list_issues::{ListIssuesRequest, list_issues};
use crate::scoring::metrics::license_from_text;
use crate::scoring::types::RepoDetails;
use chrono::{Months, Utc};
use futures::TryStreamExt;
use log::{debug, info};
use octocrab::Octocrab;
use octocrab::models::License;
use serde::Deserialize;
use std::sync::Arc;

// GitHub reports unrecognized license files under this name and id
const UNRECOGNIZED_LICENSE: &str = "Other";
const NO_ASSERTION: &str = "NOASSERTION";

/// Fetch license, contributors, issues and commits for one repository.
pub(crate) async fn fetch_repo_details(
    inner: Arc<Octocrab>,
    owner: &str,
    repo: &str,
    config: &FetchConfig,
) -> GitHubResult<RepoDetails> {
    info!("Fetching repository details for {owner}/{repo}");
    let since = Utc::now()
        .checked_sub_months(Months::new(config.lookback_months))
        .unwrap_or_else(Utc::now);

    let issues = list_issues(
        Arc::clone(&inner),
        ListIssuesRequest {
            owner: owner.to_string(),
            repo: repo.to_string(),
            since: Some(since),
            per_page: config.per_page,
            max_pages: config.max_pages,
        },
    )
    .try_collect::<Vec<_>>();
    let commits = list_commits(
        Arc::clone(&inner),
        owner,
        repo,
        ListCommitsOptions {
            since: Some(since),
            per_page: config.per_page,
            max_pages: config.max_pages,
        },
    )
    .try_collect::<Vec<_>>();
    let contributors =
        list_contributors(Arc::clone(&inner), owner, repo, config.per_page, config.max_pages)
            .try_collect::<Vec<_>>();

    let (license, issues_data, commits_data, contributors_data) = tokio::try_join!(
        fetch_license(&inner, owner, repo),
        issues,
        commits,
        contributors
    )?;

    debug!(
        "{owner}/{repo}: license {license:?}, {} contributors, {} issues, {} commits",
        contributors_data.len(),
        issues_data.len(),
        commits_data.len()
    );

    Ok(RepoDetails {
        owner: owner.to_string(),
        repo: repo.to_string(),
        license,
        contributors_data,
        issues_data,
        commits_data,
    })
}

/// Repository license SPDX id, falling back to the `license` field of a
/// top-level `package.json`, then to an id mentioned in the README.
async fn fetch_license(inner: &Octocrab, owner: &str, repo: &str) -> GitHubResult<Option<String>> {
    let repository = inner.repos(owner, repo).get().await?;
    if let Some(license) = repository.license.and_then(license_identifier) {
        return Ok(Some(license));
    }

    debug!("{owner}/{repo}: no detected license, checking package.json");
    if let Some(license) = package_json_license(inner, owner, repo).await? {
        return Ok(Some(license));
    }

    debug!("{owner}/{repo}: no package.json license, checking README");
    readme_license(inner, owner, repo).await
}

// SPDX id when GitHub recognized the license, display name otherwise
fn license_identifier(license: License) -> Option<String> {
    let id = license.spdx_id.trim();
    if !id.is_empty() && id != NO_ASSERTION {
        return Some(id.to_string());
    }
    Some(license.name).filter(|name| !name.is_empty() && name.as_str() != UNRECOGNIZED_LICENSE)
}

async fn readme_license(inner: &Octocrab, owner: &str, repo: &str) -> GitHubResult<Option<String>> {
    let readme = match inner
        .repos(owner, repo)
        .get_readme()
        .send()
        .await
        .map_err(GitHubError::from)
    {
        Ok(readme) => readme,
        Err(GitHubError::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    let Some(text) = readme.decoded_content() else {
        debug!("{owner}/{repo}: README is empty");
        return Ok(None);
    };
    Ok(license_from_text(&text).map(str::to_string))
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    license: Option<LicenseField>,
}

// Older manifests use `{ "type": "MIT", "url": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseField {
    Id(String),
    Object {
        #[serde(rename = "type")]
        kind: String,
    },
}

async fn package_json_license(
    inner: &Octocrab,
    owner: &str,
    repo: &str,
) -> GitHubResult<Option<String>> {
    let content = match inner
        .repos(owner, repo)
        .get_content()
        .path("package.json")
        .send()
        .await
        .map_err(GitHubError::from)
    {
        Ok(items) => items.items,
        Err(GitHubError::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    let Some(text) = content.first().and_then(|item| item.decoded_content()) else {
        return Ok(None);
    };
    let manifest: PackageManifest = match serde_json::from_str(&text) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("{owner}/{repo}: unreadable package.json: {e}");
            return Ok(None);
        }
    };

    Ok(manifest.license.map(|license| match license {
        LicenseField::Id(id) => id,
        LicenseField::Object { kind } => kind,
    }))
}
