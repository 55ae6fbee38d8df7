//! `trustscore` - package trustworthiness scoring
//!
//! Scores a package's repository on bus factor, correctness, ramp-up time,
//! maintainer responsiveness and license compatibility, runs the scorers in
//! parallel with per-metric latency, and folds them into a single net score.
//! The `github` feature adds octocrab/gix collaborators that fetch the inputs.

// Module declarations
#[cfg(feature = "github")]
pub mod github;
pub mod runtime;
pub mod scoring;

// Re-export runtime types
pub use runtime::{AsyncStream, AsyncTask, EmitterBuilder, Timed};

// Re-export the scoring pipeline
pub use scoring::{
    CommitInfo, Contributor, IssueInfo, IssueState, LicensePolicy, MetricKind, MetricResult,
    MetricScores, MetricWeights, NetScoreReport, NetScoreResult, RepoDetails, RepositorySource,
    ScoringConfig, ScoringError, ScoringResult, aggregate, combine, run_metrics, score_package,
};
pub use scoring::{score_repository, score_repository_at, score_tree_at};

// Re-export GitHub collaborator types
#[cfg(feature = "github")]
pub use github::{
    ClonedRepo, FetchConfig, GitHubClient, GitHubClientBuilder, GitHubError, GitHubResult,
    PackageUrl, classify_url,
};
