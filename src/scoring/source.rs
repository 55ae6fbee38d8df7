//! Collaborator seam: where repository facts and trees come from

use crate::scoring::config::ScoringConfig;
use crate::scoring::score_tree_at;
use crate::scoring::types::{NetScoreResult, RepoDetails, ScoringError, ScoringResult};
use chrono::Utc;
use log::info;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// Supplies the inputs of a scoring run.
///
/// The GitHub client is the production implementation; tests substitute
/// fixtures backed by temporary directories.
pub trait RepositorySource {
    /// Local copy of a repository. Dropping it releases the copy.
    type Handle: AsRef<Path> + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_repo_details(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<RepoDetails, Self::Error>> + Send;

    fn materialize_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Self::Handle, Self::Error>> + Send;
}

/// Fetch, materialize and score one repository.
///
/// The cloned copy is released once every scorer reading it has finished,
/// which may be after this returns if a scorer overran its timeout.
pub async fn score_package<S>(
    source: &S,
    owner: &str,
    repo: &str,
    config: &ScoringConfig,
) -> ScoringResult<NetScoreResult>
where
    S: RepositorySource + Sync,
{
    let details = source
        .fetch_repo_details(owner, repo)
        .await
        .map_err(|e| ScoringError::Source(Box::new(e)))?;
    let handle = source
        .materialize_repository(owner, repo)
        .await
        .map_err(|e| ScoringError::Source(Box::new(e)))?;

    info!("Scoring {owner}/{repo} from {}", handle.as_ref().display());
    score_tree_at(&details, Arc::new(handle), config, Utc::now()).await
}
