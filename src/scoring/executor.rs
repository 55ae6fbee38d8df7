//! Parallel metric execution with per-metric latency

use crate::runtime::{AsyncTask, Timed};
use crate::scoring::config::ScoringConfig;
use crate::scoring::metrics::{
    calculate_bus_factor, calculate_correctness, calculate_license, calculate_ramp_up,
    calculate_responsiveness,
};
use crate::scoring::types::{
    MetricKind, MetricResult, MetricScores, RepoDetails, ScoringError, ScoringResult,
};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

type MetricTask = AsyncTask<Timed<ScoringResult<f64>>>;

/// Run all five scorers concurrently on the blocking pool.
///
/// Each latency is measured inside the scorer's own execution window. The
/// first scorer error is returned; the other results are discarded.
///
/// The tree-reading scorers each hold a clone of `tree`, so whatever owns
/// the local copy is dropped only after the last of them has finished,
/// including scorers that outlived their timeout.
pub async fn run_metrics<T>(
    details: Arc<RepoDetails>,
    tree: Arc<T>,
    config: Arc<ScoringConfig>,
    now: DateTime<Utc>,
) -> ScoringResult<MetricScores>
where
    T: AsRef<Path> + Send + Sync + ?Sized + 'static,
{
    let bus_factor = {
        let details = Arc::clone(&details);
        let config = Arc::clone(&config);
        AsyncTask::spawn_timed(move || Ok(calculate_bus_factor(&details, &config.bus_factor)))
    };
    let correctness = {
        let details = Arc::clone(&details);
        let config = Arc::clone(&config);
        let tree = Arc::clone(&tree);
        AsyncTask::spawn_timed(move || {
            calculate_correctness(&details, AsRef::<Path>::as_ref(&*tree), &config, now)
        })
    };
    let ramp_up = {
        let config = Arc::clone(&config);
        AsyncTask::spawn_timed(move || {
            Ok(calculate_ramp_up(AsRef::<Path>::as_ref(&*tree), &config))
        })
    };
    let responsive_maintainer = {
        let details = Arc::clone(&details);
        let config = Arc::clone(&config);
        AsyncTask::spawn_timed(move || {
            Ok(calculate_responsiveness(&details, &config.responsiveness, now))
        })
    };
    let license = {
        let details = Arc::clone(&details);
        AsyncTask::spawn_timed(move || Ok(calculate_license(&details)))
    };

    let timeout = config.metric_timeout();
    let (bus_factor, correctness, ramp_up, responsive_maintainer, license) = tokio::join!(
        settle(MetricKind::BusFactor, bus_factor, timeout),
        settle(MetricKind::Correctness, correctness, timeout),
        settle(MetricKind::RampUp, ramp_up, timeout),
        settle(MetricKind::ResponsiveMaintainer, responsive_maintainer, timeout),
        settle(MetricKind::License, license, timeout),
    );

    Ok(MetricScores {
        bus_factor: bus_factor?,
        correctness: correctness?,
        ramp_up: ramp_up?,
        responsive_maintainer: responsive_maintainer?,
        license: license?,
    })
}

// Await one scorer. A timeout scores 0 with the time waited as latency;
// the blocking thread keeps running until the scorer returns.
async fn settle(
    kind: MetricKind,
    task: MetricTask,
    timeout: Option<Duration>,
) -> ScoringResult<MetricResult> {
    let started = Instant::now();
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("{kind} timed out after {limit:?}, scoring 0");
                return Ok(MetricResult::new(
                    0.0,
                    started.elapsed().as_secs_f64() * 1000.0,
                ));
            }
        },
        None => task.await,
    };

    let timed = outcome.map_err(|e| ScoringError::TaskFailed {
        metric: kind,
        details: e.to_string(),
    })?;
    let latency_ms = timed.elapsed_ms();
    let score = timed.value?;
    debug!("{kind}: {score:.3} in {latency_ms:.2}ms");
    Ok(MetricResult::new(score, latency_ms))
}
