//! Responsive maintainer: issue turnaround and commit cadence

use super::{issues_in_window, weeks_between, weeks_since, window_start};
use crate::scoring::config::ResponsivenessConfig;
use crate::scoring::types::{CommitInfo, IssueInfo, RepoDetails, clamp_unit};
use chrono::{DateTime, Utc};
use log::debug;

/// Score how actively the repository is maintained.
///
/// Blends the closed-issue ratio, how little of the window issues spend
/// waiting to be closed, and recent commit frequency.
pub fn calculate_responsiveness(
    details: &RepoDetails,
    config: &ResponsivenessConfig,
    now: DateTime<Utc>,
) -> f64 {
    let commit_frequency = commit_frequency(
        &details.commits_data,
        now,
        config.window_months,
        config.baseline_commits_per_week,
    );
    let (issue_ratio, weeks_not_lost) = issue_turnaround(&details.issues_data, now, config.window_months);

    let score = clamp_unit(
        config.issue_ratio_weight * issue_ratio
            + config.weeks_not_lost_weight * weeks_not_lost
            + config.commit_frequency_weight * commit_frequency,
    );
    debug!(
        "{}: issue ratio {issue_ratio:.3}, weeks not lost {weeks_not_lost:.3}, \
         commit frequency {commit_frequency:.3} => {score:.3}",
        details.full_name()
    );
    score
}

/// Commits per week inside the window relative to `baseline_per_week`, clamped.
///
/// Commits without an author date are ignored.
#[must_use]
pub fn commit_frequency(
    commits: &[CommitInfo],
    now: DateTime<Utc>,
    months: u32,
    baseline_per_week: f64,
) -> f64 {
    let dates: Vec<DateTime<Utc>> = commits.iter().filter_map(|c| c.authored_at).collect();
    let Some(earliest) = dates.iter().min().copied() else {
        return 0.0;
    };
    if baseline_per_week <= 0.0 {
        return 0.0;
    }

    let start = window_start(now, months, Some(earliest));
    let recent = dates.iter().filter(|d| **d >= start).count();
    let per_week = recent as f64 / weeks_since(now, start);
    clamp_unit(per_week / baseline_per_week)
}

// (closed/opened ratio, fraction of the window not spent waiting on a close)
fn issue_turnaround(issues: &[IssueInfo], now: DateTime<Utc>, months: u32) -> (f64, f64) {
    let (start, opened) = issues_in_window(issues, now, months);
    let closed: Vec<&IssueInfo> = opened.iter().copied().filter(|i| i.is_closed()).collect();
    if opened.is_empty() || closed.is_empty() {
        return (0.0, 0.0);
    }
    let ratio = closed.len() as f64 / opened.len() as f64;

    let close_times: Vec<f64> = closed
        .iter()
        .filter_map(|i| i.closed_at.map(|at| weeks_between(i.created_at, at)))
        .collect();
    if close_times.is_empty() {
        return (ratio, 0.0);
    }

    let avg_weeks_to_close = close_times.iter().sum::<f64>() / close_times.len() as f64;
    let window_weeks = weeks_since(now, start);
    (ratio, (window_weeks - avg_weeks_to_close) / window_weeks)
}
