//! Tests for the responsive maintainer scorer.

use super::fixtures::now;
use chrono::Duration;
use trustscore::scoring::config::ResponsivenessConfig;
use trustscore::scoring::metrics::calculate_responsiveness;
use trustscore::scoring::metrics::responsiveness::commit_frequency;
use trustscore::{CommitInfo, IssueInfo, RepoDetails};

fn commits_per_day(days: i64) -> Vec<CommitInfo> {
    (1..=days)
        .map(|d| CommitInfo {
            sha: format!("{d:040}"),
            authored_at: Some(now() - Duration::days(d)),
        })
        .collect()
}

#[test]
fn test_empty_repository_scores_zero() {
    let score = calculate_responsiveness(
        &RepoDetails::new("acme", "widget"),
        &ResponsivenessConfig::default(),
        now(),
    );
    assert_eq!(score, 0.0);
}

#[test]
fn test_commit_frequency_against_baseline() {
    // one commit a day over four weeks is 7 per week
    let freq = commit_frequency(&commits_per_day(28), now(), 6, 10.0);
    assert!((freq - 0.7).abs() < 1e-9, "got {freq}");
}

#[test]
fn test_all_issues_closed_quickly() {
    let mut details = RepoDetails::new("acme", "widget");
    details.issues_data = vec![
        IssueInfo::closed(now() - Duration::weeks(10), now() - Duration::weeks(10)),
        IssueInfo::closed(now() - Duration::weeks(5), now() - Duration::weeks(5)),
    ];
    details.commits_data = commits_per_day(70);
    let score = calculate_responsiveness(&details, &ResponsivenessConfig::default(), now());
    // ratio 1, nothing lost waiting, 7 commits per week
    let expected = 0.5 + 0.25 + 0.25 * 0.7;
    assert!((score - expected).abs() < 1e-9, "got {score}");
}

#[test]
fn test_score_within_unit_interval() {
    let mut details = RepoDetails::new("acme", "widget");
    details.issues_data = vec![IssueInfo::closed(
        now() - Duration::days(3),
        now() + Duration::weeks(52),
    )];
    let score = calculate_responsiveness(&details, &ResponsivenessConfig::default(), now());
    assert!((0.0..=1.0).contains(&score), "got {score}");
}
