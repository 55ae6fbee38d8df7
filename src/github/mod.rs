//! GitHub and npm collaborators
//!
//! Fetch repository facts with octocrab and clone working trees with gix.

pub mod client;
pub mod clone;
pub mod config;
pub mod error;
pub mod npm;
pub mod url;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};
pub use clone::ClonedRepo;
pub use config::FetchConfig;

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use url::{PackageUrl, classify_url, normalize_repository_url, parse_github_url};
pub use util::spawn_task;

pub use list_commits::ListCommitsOptions;
pub use list_issues::ListIssuesRequest;

// GitHub API operations (internal)
pub(crate) mod fetch;
pub(crate) mod list_commits;
pub(crate) mod list_contributors;
pub(crate) mod list_issues;
