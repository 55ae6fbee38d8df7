//! Bus factor: how concentrated the commit history is in a few people

use crate::scoring::config::BusFactorConfig;
use crate::scoring::types::{Contributor, RepoDetails, clamp_unit};
use log::debug;

/// Score contributor concentration risk.
///
/// Counts the smallest group of top contributors that together authored the
/// core share of commits, then normalizes that count against the number of
/// contributors remaining after tiny ones are dropped. Higher is healthier.
pub fn calculate_bus_factor(details: &RepoDetails, config: &BusFactorConfig) -> f64 {
    let contributors = &details.contributors_data;
    if contributors.len() <= 1 {
        debug!(
            "{}: {} contributor(s), bus factor is 0",
            details.full_name(),
            contributors.len()
        );
        return 0.0;
    }

    let total: u64 = contributors.iter().map(|c| c.total_commits).sum();
    if total == 0 {
        debug!("{}: no commits attributed to contributors", details.full_name());
        return 0.0;
    }

    let mut sorted: Vec<&Contributor> = contributors.iter().collect();
    sorted.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));

    let cutoff = config.outlier_share * total as f64;
    let filtered: Vec<&Contributor> = sorted
        .into_iter()
        .filter(|c| c.total_commits as f64 >= cutoff)
        .collect();
    let filtered_total: u64 = filtered.iter().map(|c| c.total_commits).sum();
    if filtered.is_empty() || filtered_total == 0 {
        return 0.0;
    }

    let mut cumulative = 0.0;
    let mut core = 0usize;
    for contributor in &filtered {
        cumulative += contributor.total_commits as f64 / filtered_total as f64;
        core += 1;
        if cumulative >= config.core_threshold {
            break;
        }
    }

    let denominator = config.normalization * filtered.len() as f64;
    if denominator <= 0.0 {
        return 0.0;
    }

    let score = clamp_unit(core as f64 / denominator);
    debug!(
        "{}: {core} core of {} contributors, bus factor {score:.3}",
        details.full_name(),
        filtered.len()
    );
    score
}
