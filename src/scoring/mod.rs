//! Metric scoring pipeline
//!
//! Five independent scorers run concurrently over a [`RepoDetails`]
//! snapshot and a cloned tree, then the aggregator folds them into a net
//! score:
//!
//! ```text
//! RepoDetails + cloned tree -> run_metrics -> MetricScores -> aggregate -> NetScoreResult
//! ```

pub mod config;
pub mod executor;
pub(crate) mod helpers;
pub mod metrics;
pub mod net_score;
pub mod source;
pub mod types;

pub use config::{LicensePolicy, MetricWeights, ScoringConfig};
pub use executor::run_metrics;
pub use net_score::{aggregate, combine};
pub use source::{RepositorySource, score_package};
pub use types::{
    CommitInfo, Contributor, IssueInfo, IssueState, MetricKind, MetricResult, MetricScores,
    NetScoreReport, NetScoreResult, RepoDetails, ScoringError, ScoringResult,
};

use chrono::{DateTime, Utc};
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Score a repository from its fetched details and a local clone.
///
/// The caller owns `cloned_repo`. With a metric timeout configured, a
/// scorer that overran may still be reading the tree after this returns;
/// [`score_tree_at`] ties the tree's lifetime to the scorers instead.
pub async fn score_repository(
    details: &RepoDetails,
    cloned_repo: &Path,
    config: &ScoringConfig,
) -> ScoringResult<NetScoreResult> {
    score_repository_at(details, cloned_repo, config, Utc::now()).await
}

/// Like [`score_repository`], with the reference time for the trailing
/// windows given explicitly.
pub async fn score_repository_at(
    details: &RepoDetails,
    cloned_repo: &Path,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> ScoringResult<NetScoreResult> {
    score_tree_at(details, Arc::<Path>::from(cloned_repo), config, now).await
}

/// Score a repository whose local copy is shared with the scorers.
///
/// `tree` is released when the last scorer holding it finishes, so a
/// handle that deletes its directory on drop stays valid for every reader.
pub async fn score_tree_at<T>(
    details: &RepoDetails,
    tree: Arc<T>,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> ScoringResult<NetScoreResult>
where
    T: AsRef<Path> + Send + Sync + ?Sized + 'static,
{
    config.validate()?;

    let metrics = run_metrics(
        Arc::new(details.clone()),
        tree,
        Arc::new(config.clone()),
        now,
    )
    .await?;
    let result = aggregate(metrics, config);

    info!(
        "{}: net score {:.3}",
        details.full_name(),
        result.net_score.score
    );
    Ok(result)
}
