//! GitHub repository contributors listing operation.

use crate::github::error::GitHubError;
use crate::runtime::{AsyncStream, EmitterBuilder};
use crate::scoring::types::Contributor;
use log::warn;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
struct ContributorQuery {
    per_page: u8,
    anon: &'static str,
}

#[derive(Debug, Deserialize)]
struct ContributorEntry {
    login: Option<String>,
    // anonymous contributors carry a name or email instead of a login
    name: Option<String>,
    email: Option<String>,
    contributions: u64,
}

/// List contributors with their commit counts, most active first.
pub(crate) fn list_contributors(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    per_page: u8,
    max_pages: u32,
) -> AsyncStream<Result<Contributor, GitHubError>> {
    let owner = owner.into();
    let repo = repo.into();

    let builder = EmitterBuilder::new(Box::new(move || {
        Box::pin(async move {
            let route = format!("/repos/{owner}/{repo}/contributors");
            let query = ContributorQuery {
                per_page,
                anon: "true",
            };

            let mut contributors = Vec::new();
            let mut page_res: Page<ContributorEntry> = inner
                .get(route, Some(&query))
                .await
                .map_err(GitHubError::from)?;
            let mut pages = 1;
            contributors.extend(page_res.items.drain(..).map(to_contributor));

            while pages < max_pages {
                let Some(next_page) =
                    inner.get_page::<ContributorEntry>(&page_res.next).await?
                else {
                    break;
                };
                page_res = next_page;
                pages += 1;
                contributors.extend(page_res.items.drain(..).map(to_contributor));
            }
            Ok(contributors)
        })
    }));
    builder.emit(|e| warn!("Listing contributors failed: {e}"))
}

fn to_contributor(entry: ContributorEntry) -> Contributor {
    let author = entry
        .login
        .or(entry.name)
        .or(entry.email)
        .unwrap_or_else(|| "anonymous".to_string());
    Contributor::new(author, entry.contributions)
}
