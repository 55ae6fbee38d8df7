//! GitHub repository commits listing operation.

use crate::github::error::GitHubError;
use crate::runtime::{AsyncStream, EmitterBuilder};
use crate::scoring::types::CommitInfo;
use chrono::{DateTime, Utc};
use log::warn;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Options for listing commits in a repository.
#[derive(Debug, Clone)]
pub struct ListCommitsOptions {
    /// Only show commits after this date.
    pub since: Option<DateTime<Utc>>,
    /// Number of results per page (max 100).
    pub per_page: u8,
    /// Stop after this many pages.
    pub max_pages: u32,
}

#[derive(Serialize)]
struct CommitQuery {
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<String>,
}

// Only the fields the scorers read
#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
    commit: CommitBody,
}

#[derive(Debug, Deserialize)]
struct CommitBody {
    author: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: Option<DateTime<Utc>>,
}

/// List commits on the default branch, newest first.
pub(crate) fn list_commits(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    options: ListCommitsOptions,
) -> AsyncStream<Result<CommitInfo, GitHubError>> {
    let owner = owner.into();
    let repo = repo.into();

    let builder = EmitterBuilder::new(Box::new(move || {
        Box::pin(async move {
            let route = format!("/repos/{owner}/{repo}/commits");
            let query = CommitQuery {
                per_page: options.per_page,
                since: options.since.map(|dt| dt.to_rfc3339()),
            };

            let mut commits = Vec::new();
            let mut page_res: Page<CommitEntry> = inner
                .get(route, Some(&query))
                .await
                .map_err(GitHubError::from)?;
            let mut pages = 1;
            commits.extend(page_res.items.drain(..).map(to_commit_info));

            while pages < options.max_pages {
                let Some(next_page) = inner.get_page::<CommitEntry>(&page_res.next).await? else {
                    break;
                };
                page_res = next_page;
                pages += 1;
                commits.extend(page_res.items.drain(..).map(to_commit_info));
            }
            Ok(commits)
        })
    }));
    builder.emit(|e| warn!("Listing commits failed: {e}"))
}

fn to_commit_info(entry: CommitEntry) -> CommitInfo {
    CommitInfo {
        sha: entry.sha,
        authored_at: entry.commit.author.and_then(|a| a.date),
    }
}
