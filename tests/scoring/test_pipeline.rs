//! End-to-end tests for the executor, aggregator and source seam.

use super::fixtures::{details_with_contributors, now, standard_tree};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use trustscore::{
    LicensePolicy, RepoDetails, RepositorySource, ScoringConfig, ScoringError, score_package,
    score_repository_at,
};

fn sample_details() -> RepoDetails {
    let mut details = details_with_contributors(&[("A", 90), ("B", 8), ("C", 2)]);
    details.license = Some("MIT".to_string());
    details
}

#[tokio::test]
async fn test_scores_and_latencies_are_well_formed() {
    let tree = standard_tree();
    let result = score_repository_at(&sample_details(), tree.path(), &ScoringConfig::default(), now())
        .await
        .expect("pipeline");

    let m = result.metrics;
    assert!((m.bus_factor.score - 0.952).abs() < 1e-3);
    assert!((m.correctness.score - 0.25).abs() < 1e-9);
    assert!((m.ramp_up.score - 0.5).abs() < 1e-9);
    assert_eq!(m.responsive_maintainer.score, 0.0);
    assert_eq!(m.license.score, 1.0);

    for r in [m.bus_factor, m.correctness, m.ramp_up, m.responsive_maintainer, m.license, result.net_score] {
        assert!((0.0..=1.0).contains(&r.score));
        assert!(r.latency_ms >= 0.0);
    }

    let behavioral = 0.25 * m.bus_factor.score + 0.25 * 0.25 + 0.2 * 0.5;
    assert!((result.net_score.score - behavioral).abs() < 1e-9);
}

#[tokio::test]
async fn test_repeated_runs_give_identical_scores() {
    let tree = standard_tree();
    let config = ScoringConfig::default();
    let first = score_repository_at(&sample_details(), tree.path(), &config, now())
        .await
        .expect("first run");
    let second = score_repository_at(&sample_details(), tree.path(), &config, now())
        .await
        .expect("second run");

    assert_eq!(first.metrics.bus_factor.score, second.metrics.bus_factor.score);
    assert_eq!(first.metrics.correctness.score, second.metrics.correctness.score);
    assert_eq!(first.metrics.ramp_up.score, second.metrics.ramp_up.score);
    assert_eq!(first.net_score.score, second.net_score.score);
}

#[tokio::test]
async fn test_unlicensed_package_is_gated_to_zero() {
    let tree = standard_tree();
    let mut details = sample_details();
    details.license = Some("GPL-3.0".to_string());

    let gated = score_repository_at(&details, tree.path(), &ScoringConfig::default(), now())
        .await
        .expect("pipeline");
    assert_eq!(gated.net_score.score, 0.0);

    let config = ScoringConfig {
        license_policy: LicensePolicy::Additive { weight: 0.2 },
        ..ScoringConfig::default()
    };
    let blended = score_repository_at(&details, tree.path(), &config, now())
        .await
        .expect("pipeline");
    assert!(blended.net_score.score > 0.0);
}

#[tokio::test]
async fn test_missing_clone_propagates() {
    let dir = TempDir::new().expect("tempdir");
    let err = score_repository_at(
        &sample_details(),
        &dir.path().join("missing"),
        &ScoringConfig::default(),
        now(),
    )
    .await
    .expect_err("missing clone must fail");
    assert!(matches!(err, ScoringError::MissingClonedRepo(_)));
}

#[tokio::test]
async fn test_report_uses_flat_field_names() {
    let tree = standard_tree();
    let result = score_repository_at(&sample_details(), tree.path(), &ScoringConfig::default(), now())
        .await
        .expect("pipeline");
    let json = serde_json::to_value(result).expect("serialize");

    for key in [
        "BusFactor",
        "Correctness",
        "RampUp",
        "ResponsiveMaintainer",
        "License",
        "NetScore",
        "BusFactor_Latency",
        "Correctness_Latency",
        "RampUp_Latency",
        "ResponsiveMaintainer_Latency",
        "License_Latency",
        "NetScore_Latency",
    ] {
        assert!(json.get(key).is_some_and(|v| v.is_number()), "missing {key}");
    }
    assert_eq!(json["License"], 1.0);
}

struct FixtureSource {
    tree: PathBuf,
    details: Option<RepoDetails>,
}

impl RepositorySource for FixtureSource {
    type Handle = PathBuf;
    type Error = io::Error;

    async fn fetch_repo_details(&self, _owner: &str, _repo: &str) -> io::Result<RepoDetails> {
        self.details
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such repository"))
    }

    async fn materialize_repository(&self, _owner: &str, _repo: &str) -> io::Result<PathBuf> {
        Ok(self.tree.clone())
    }
}

#[tokio::test]
async fn test_score_package_through_source() {
    let tree = standard_tree();
    let source = FixtureSource {
        tree: tree.path().to_path_buf(),
        details: Some(sample_details()),
    };
    let result = score_package(&source, "acme", "widget", &ScoringConfig::default())
        .await
        .expect("score package");
    assert_eq!(result.metrics.license.score, 1.0);
    assert!((result.metrics.ramp_up.score - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_source_failure_is_reported() {
    let tree = standard_tree();
    let source = FixtureSource {
        tree: tree.path().to_path_buf(),
        details: None,
    };
    let err = score_package(&source, "acme", "widget", &ScoringConfig::default())
        .await
        .expect_err("source failure");
    assert!(matches!(err, ScoringError::Source(_)));
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let tree = standard_tree();
    let mut config = ScoringConfig::default();
    config.weights.bus_factor = -1.0;
    let err = score_repository_at(&sample_details(), tree.path(), &config, now())
        .await
        .expect_err("negative weight");
    assert!(matches!(err, ScoringError::Config(_)));
}

/// Cloned tree whose path lookup is slow; records how many lookups were
/// still running when it was dropped.
struct SlowTree {
    dir: TempDir,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    dropped_with: Arc<Mutex<Option<usize>>>,
}

impl AsRef<Path> for SlowTree {
    fn as_ref(&self) -> &Path {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.dir.path()
    }
}

impl Drop for SlowTree {
    fn drop(&mut self) {
        let running = self.in_flight.load(Ordering::SeqCst);
        *self.dropped_with.lock().expect("lock") = Some(running);
    }
}

struct SlowSource {
    details: RepoDetails,
    dropped_with: Arc<Mutex<Option<usize>>>,
}

impl RepositorySource for SlowSource {
    type Handle = SlowTree;
    type Error = io::Error;

    async fn fetch_repo_details(&self, _owner: &str, _repo: &str) -> io::Result<RepoDetails> {
        Ok(self.details.clone())
    }

    async fn materialize_repository(&self, _owner: &str, _repo: &str) -> io::Result<SlowTree> {
        Ok(SlowTree {
            dir: standard_tree(),
            delay: Duration::from_millis(300),
            in_flight: Arc::new(AtomicUsize::new(0)),
            dropped_with: Arc::clone(&self.dropped_with),
        })
    }
}

#[tokio::test]
async fn test_timed_out_scorers_keep_the_clone_alive() {
    let dropped_with = Arc::new(Mutex::new(None));
    let source = SlowSource {
        details: sample_details(),
        dropped_with: Arc::clone(&dropped_with),
    };
    let config = ScoringConfig {
        metric_timeout_ms: Some(20),
        ..ScoringConfig::default()
    };

    let result = score_package(&source, "acme", "widget", &config)
        .await
        .expect("timeouts are not errors");

    for timed_out in [result.metrics.correctness, result.metrics.ramp_up] {
        assert_eq!(timed_out.score, 0.0);
        assert!(timed_out.latency_ms >= 20.0, "latency {}", timed_out.latency_ms);
    }
    assert!(
        dropped_with.lock().expect("lock").is_none(),
        "clone released while scorers were still reading it"
    );

    let mut waited = Duration::ZERO;
    while dropped_with.lock().expect("lock").is_none() && waited < Duration::from_secs(10) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        waited += Duration::from_millis(20);
    }
    assert_eq!(*dropped_with.lock().expect("lock"), Some(0));
}
