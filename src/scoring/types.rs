//! Type definitions for the scoring pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error handling for the scoring pipeline.
///
/// "No data" conditions never show up here; they resolve to a score of 0
/// inside the owning metric.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Cloned repository path does not exist: {}", .0.display())]
    MissingClonedRepo(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metric task failed: {metric}: {details}")]
    TaskFailed { metric: MetricKind, details: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// The five metrics combined into the net score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    BusFactor,
    Correctness,
    RampUp,
    ResponsiveMaintainer,
    License,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::BusFactor,
        MetricKind::Correctness,
        MetricKind::RampUp,
        MetricKind::ResponsiveMaintainer,
        MetricKind::License,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::BusFactor => "BusFactor",
            MetricKind::Correctness => "Correctness",
            MetricKind::RampUp => "RampUp",
            MetricKind::ResponsiveMaintainer => "ResponsiveMaintainer",
            MetricKind::License => "License",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contributor and the number of commits attributed to them
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Contributor {
    pub author: String,
    pub total_commits: u64,
}

impl Contributor {
    pub fn new(author: impl Into<String>, total_commits: u64) -> Self {
        Self {
            author: author.into(),
            total_commits,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Timing facts of a single issue
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct IssueInfo {
    pub created_at: DateTime<Utc>,
    pub state: IssueState,
    pub closed_at: Option<DateTime<Utc>>,
}

impl IssueInfo {
    #[must_use]
    pub fn open(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            state: IssueState::Open,
            closed_at: None,
        }
    }

    #[must_use]
    pub fn closed(created_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            state: IssueState::Closed,
            closed_at: Some(closed_at),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}

/// A commit reduced to what the responsiveness metric needs
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct CommitInfo {
    pub sha: String,
    pub authored_at: Option<DateTime<Utc>>,
}

/// Snapshot of a repository's externally observable facts.
///
/// Built once per scoring run by a repository source and shared read-only
/// by every metric.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct RepoDetails {
    pub owner: String,
    pub repo: String,
    pub license: Option<String>,
    #[serde(default)]
    pub contributors_data: Vec<Contributor>,
    #[serde(default)]
    pub issues_data: Vec<IssueInfo>,
    #[serde(default)]
    pub commits_data: Vec<CommitInfo>,
}

impl RepoDetails {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Self::default()
        }
    }

    /// `owner/repo`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Score of one metric and the wall-clock time spent computing it
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct MetricResult {
    pub score: f64,
    pub latency_ms: f64,
}

impl MetricResult {
    /// Builds a result, clamping the score into `[0, 1]` and the latency to `>= 0`.
    #[must_use]
    pub fn new(score: f64, latency_ms: f64) -> Self {
        Self {
            score: clamp_unit(score),
            latency_ms: if latency_ms.is_finite() {
                latency_ms.max(0.0)
            } else {
                0.0
            },
        }
    }
}

/// The per-metric results the executor produces
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct MetricScores {
    pub bus_factor: MetricResult,
    pub correctness: MetricResult,
    pub ramp_up: MetricResult,
    pub responsive_maintainer: MetricResult,
    pub license: MetricResult,
}

impl MetricScores {
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> MetricResult {
        match kind {
            MetricKind::BusFactor => self.bus_factor,
            MetricKind::Correctness => self.correctness,
            MetricKind::RampUp => self.ramp_up,
            MetricKind::ResponsiveMaintainer => self.responsive_maintainer,
            MetricKind::License => self.license,
        }
    }
}

/// Terminal output of the pipeline.
///
/// Serializes to the flat report shape (`BusFactor`, `BusFactor_Latency`, ...).
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
#[serde(into = "NetScoreReport")]
pub struct NetScoreResult {
    pub metrics: MetricScores,
    pub net_score: MetricResult,
}

/// Flat wire form of [`NetScoreResult`]
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct NetScoreReport {
    #[serde(rename = "BusFactor")]
    pub bus_factor: f64,
    #[serde(rename = "Correctness")]
    pub correctness: f64,
    #[serde(rename = "RampUp")]
    pub ramp_up: f64,
    #[serde(rename = "ResponsiveMaintainer")]
    pub responsive_maintainer: f64,
    #[serde(rename = "License")]
    pub license: f64,
    #[serde(rename = "NetScore")]
    pub net_score: f64,
    #[serde(rename = "BusFactor_Latency")]
    pub bus_factor_latency: f64,
    #[serde(rename = "Correctness_Latency")]
    pub correctness_latency: f64,
    #[serde(rename = "RampUp_Latency")]
    pub ramp_up_latency: f64,
    #[serde(rename = "ResponsiveMaintainer_Latency")]
    pub responsive_maintainer_latency: f64,
    #[serde(rename = "License_Latency")]
    pub license_latency: f64,
    #[serde(rename = "NetScore_Latency")]
    pub net_score_latency: f64,
}

impl From<NetScoreResult> for NetScoreReport {
    fn from(result: NetScoreResult) -> Self {
        let m = result.metrics;
        Self {
            bus_factor: m.bus_factor.score,
            correctness: m.correctness.score,
            ramp_up: m.ramp_up.score,
            responsive_maintainer: m.responsive_maintainer.score,
            license: m.license.score,
            net_score: result.net_score.score,
            bus_factor_latency: m.bus_factor.latency_ms,
            correctness_latency: m.correctness.latency_ms,
            ramp_up_latency: m.ramp_up.latency_ms,
            responsive_maintainer_latency: m.responsive_maintainer.latency_ms,
            license_latency: m.license.latency_ms,
            net_score_latency: result.net_score.latency_ms,
        }
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
