//! GitHub Issues listing operation.

use crate::github::error::GitHubError;
use crate::runtime::{AsyncStream, EmitterBuilder};
use crate::scoring::types::{IssueInfo, IssueState};
use chrono::{DateTime, Utc};
use log::warn;
use octocrab::models::issues::Issue;
use octocrab::{Octocrab, Page, params};
use std::sync::Arc;

/// Request parameters for listing issues
#[derive(Debug, Clone)]
pub struct ListIssuesRequest {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Only issues updated after this time
    pub since: Option<DateTime<Utc>>,
    /// Results per page (max 100)
    pub per_page: u8,
    /// Stop after this many pages
    pub max_pages: u32,
}

/// List issues in every state, newest first, skipping pull requests.
pub(crate) fn list_issues(
    inner: Arc<Octocrab>,
    request: ListIssuesRequest,
) -> AsyncStream<Result<IssueInfo, GitHubError>> {
    let builder = EmitterBuilder::new(Box::new(move || {
        Box::pin(async move {
            let mut issues = Vec::new();
            let issues_handler = inner.issues(&request.owner, &request.repo);
            let mut req = issues_handler
                .list()
                .state(params::State::All)
                .sort(params::issues::Sort::Created)
                .direction(params::Direction::Descending)
                .per_page(request.per_page);
            if let Some(since) = request.since {
                req = req.since(since);
            }

            let mut page_res: Page<Issue> = req.send().await.map_err(GitHubError::from)?;
            let mut pages = 1;
            issues.extend(page_res.items.drain(..).filter_map(to_issue_info));

            while pages < request.max_pages {
                let Some(next_page) = inner.get_page::<Issue>(&page_res.next).await? else {
                    break;
                };
                page_res = next_page;
                pages += 1;
                issues.extend(page_res.items.drain(..).filter_map(to_issue_info));
            }
            Ok(issues)
        })
    }));
    builder.emit(|e| warn!("Listing issues failed: {e}"))
}

fn to_issue_info(issue: Issue) -> Option<IssueInfo> {
    if issue.pull_request.is_some() {
        return None;
    }
    let state = match issue.state {
        octocrab::models::IssueState::Closed => IssueState::Closed,
        _ => IssueState::Open,
    };
    Some(IssueInfo {
        created_at: issue.created_at,
        state,
        closed_at: issue.closed_at,
    })
}
