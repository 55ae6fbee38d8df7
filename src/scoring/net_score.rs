//! Net score aggregation

use crate::runtime::Timed;
use crate::scoring::config::{LicensePolicy, MetricWeights, ScoringConfig};
use crate::scoring::types::{MetricKind, MetricResult, MetricScores, NetScoreResult, clamp_unit};
use log::debug;

const BEHAVIORAL: [MetricKind; 4] = [
    MetricKind::BusFactor,
    MetricKind::Correctness,
    MetricKind::RampUp,
    MetricKind::ResponsiveMaintainer,
];

/// Weighted mean of the four behavioral metrics.
///
/// Weights are normalized by their sum, so overrides need not add up to 1.
#[must_use]
pub fn behavioral_score(metrics: &MetricScores, weights: &MetricWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = BEHAVIORAL
        .iter()
        .map(|kind| weights.get(*kind) * metrics.get(*kind).score)
        .sum();
    clamp_unit(weighted / total)
}

/// Combine the behavioral score with the license term.
#[must_use]
pub fn combine(metrics: &MetricScores, weights: &MetricWeights, policy: LicensePolicy) -> f64 {
    let behavioral = behavioral_score(metrics, weights);
    let license = metrics.license.score;
    let net = match policy {
        LicensePolicy::Multiplicative => license * behavioral,
        LicensePolicy::Additive { weight } => weight * license + (1.0 - weight) * behavioral,
    };
    clamp_unit(net)
}

/// Produce the final result; the net score latency covers only this combination.
#[must_use]
pub fn aggregate(metrics: MetricScores, config: &ScoringConfig) -> NetScoreResult {
    let timed = Timed::measure(|| combine(&metrics, &config.weights, config.license_policy));
    debug!("Net score {:.3} ({:?})", timed.value, config.license_policy);
    NetScoreResult {
        metrics,
        net_score: MetricResult::new(timed.value, timed.elapsed_ms()),
    }
}
