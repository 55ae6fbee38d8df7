//! Correctness: test coverage proxy plus issue resolution

use super::issue_resolution_ratio;
use crate::scoring::config::{CorrectnessConfig, ScoringConfig};
use crate::scoring::helpers::{bfs_find, count_files};
use crate::scoring::types::{RepoDetails, ScoringError, ScoringResult, clamp_unit};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::io;
use std::path::Path;

const SOURCE_ROOTS: [&str; 8] = [
    "src", "source", "sources", "lib", "app", "package", "packages", "main",
];
const TEST_ROOTS: [&str; 5] = ["test", "tests", "spec", "__tests__", "__test__"];

lazy_static! {
    static ref CI_FILE_RE: Result<Regex, regex::Error> = Regex::new(
        r"^(\.travis\.yml|circle\.yml|Jenkinsfile|azure-pipelines\.yml|ci(-[a-z])*\.yml)$"
    );
}

/// Score correctness as `coverage_weight * coverage + issue_weight * issue_ratio`.
///
/// The only error is a cloned path that does not exist; a scan that fails
/// halfway through is logged and counts as zero coverage.
pub fn calculate_correctness(
    details: &RepoDetails,
    cloned_path: &Path,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> ScoringResult<f64> {
    if !cloned_path.exists() {
        return Err(ScoringError::MissingClonedRepo(cloned_path.to_path_buf()));
    }

    let coverage = match coverage_score(cloned_path, &config.correctness, config.max_search_depth)
    {
        Ok(score) => score,
        Err(e) => {
            warn!(
                "{}: coverage scan failed, using 0: {e}",
                details.full_name()
            );
            0.0
        }
    };
    let issue_ratio = issue_resolution_ratio(
        &details.issues_data,
        now,
        config.correctness.issue_window_months,
    );

    info!(
        "{} - coverage: {coverage:.3}, issue ratio: {issue_ratio:.3}",
        details.full_name()
    );
    Ok(clamp_unit(
        config.correctness.coverage_weight * coverage + config.correctness.issue_weight * issue_ratio,
    ))
}

/// Coverage proxy from CI configuration and the test-to-source file ratio.
pub fn coverage_score(root: &Path, config: &CorrectnessConfig, max_depth: usize) -> io::Result<f64> {
    let has_ci = has_ci_config(root, max_depth)?;
    debug!("CI configuration present: {has_ci}");

    let Some(source_root) = bfs_find(root, max_depth, |name, is_dir| {
        is_dir && SOURCE_ROOTS.contains(&name)
    })?
    else {
        debug!("No source folder found in {}", root.display());
        return Ok(0.0);
    };
    let Some(test_root) = bfs_find(root, max_depth, |name, is_dir| {
        is_dir && TEST_ROOTS.contains(&name)
    })?
    else {
        debug!("No test folder found in {}", root.display());
        return Ok(0.0);
    };

    let sources = count_files(&source_root)?;
    let tests = count_files(&test_root)?;
    debug!(
        "{} source files under {}, {} test files under {}",
        sources,
        source_root.display(),
        tests,
        test_root.display()
    );

    let partial = file_ratio_score(tests, sources, config.file_ratio_weight);
    let coverage = if has_ci {
        config.ci_score + partial
    } else if config.file_ratio_weight > 0.0 {
        partial / config.file_ratio_weight
    } else {
        0.0
    };
    Ok(clamp_unit(coverage))
}

/// Weighted test-to-source ratio.
///
/// Up to one test file per source file scales linearly; beyond that, the
/// surplus is penalized and more than twice as many tests as sources scores 0.
#[must_use]
pub fn file_ratio_score(tests: u64, sources: u64, weight: f64) -> f64 {
    if sources == 0 {
        return 0.0;
    }
    let tests = tests as f64;
    let sources = sources as f64;
    if tests <= sources {
        weight * (tests / sources)
    } else {
        let penalty = (tests - sources) / sources;
        if penalty > 1.0 {
            0.0
        } else {
            weight * (1.0 - penalty)
        }
    }
}

fn has_ci_config(root: &Path, max_depth: usize) -> io::Result<bool> {
    let ci_re = match CI_FILE_RE.as_ref() {
        Ok(re) => re,
        Err(e) => return Err(io::Error::other(e.to_string())),
    };
    Ok(bfs_find(root, max_depth, |name, is_dir| !is_dir && ci_re.is_match(name))?.is_some())
}
