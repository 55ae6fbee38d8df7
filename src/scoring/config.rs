//! Configuration for scoring operations

use crate::scoring::types::{MetricKind, ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const BUS_FACTOR_WEIGHT: f64 = 0.25;
pub const CORRECTNESS_WEIGHT: f64 = 0.25;
pub const RAMP_UP_WEIGHT: f64 = 0.2;
pub const RESPONSIVE_MAINTAINER_WEIGHT: f64 = 0.3;

pub const BUS_FACTOR_OUTLIER_SHARE: f64 = 0.005;
pub const BUS_FACTOR_CORE_THRESHOLD: f64 = 0.8;
pub const BUS_FACTOR_NORMALIZATION: f64 = 0.35;

pub const CORRECTNESS_COVERAGE_WEIGHT: f64 = 0.5;
pub const CORRECTNESS_ISSUE_WEIGHT: f64 = 0.5;
pub const CI_PRESENCE_SCORE: f64 = 0.8;
pub const FILE_RATIO_WEIGHT: f64 = 0.2;

pub const ISSUE_WINDOW_MONTHS: u32 = 6;
pub const MAX_SEARCH_DEPTH: usize = 2;

/// Configuration for a scoring run.
///
/// Every field has a default, so a TOML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: MetricWeights,
    pub license_policy: LicensePolicy,
    pub bus_factor: BusFactorConfig,
    pub correctness: CorrectnessConfig,
    pub ramp_up: RampUpConfig,
    pub responsiveness: ResponsivenessConfig,
    /// Depth cap for the CI, source-root and test-root searches
    pub max_search_depth: usize,
    /// Files larger than this are skipped when counting comment lines
    pub max_file_size: u64,
    /// Per-metric timeout; a metric that runs over scores 0
    pub metric_timeout_ms: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: MetricWeights::default(),
            license_policy: LicensePolicy::default(),
            bus_factor: BusFactorConfig::default(),
            correctness: CorrectnessConfig::default(),
            ramp_up: RampUpConfig::default(),
            responsiveness: ResponsivenessConfig::default(),
            max_search_depth: MAX_SEARCH_DEPTH,
            max_file_size: 10_485_760, // 10MB
            metric_timeout_ms: None,
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ScoringResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ScoringError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> ScoringResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoringError::Config(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    #[must_use]
    pub fn metric_timeout(&self) -> Option<Duration> {
        self.metric_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> ScoringResult<()> {
        for kind in [
            MetricKind::BusFactor,
            MetricKind::Correctness,
            MetricKind::RampUp,
            MetricKind::ResponsiveMaintainer,
        ] {
            let weight = self.weights.get(kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::Config(format!(
                    "weight for {kind} must be a non-negative number, got {weight}"
                )));
            }
        }
        if self.weights.total() <= 0.0 {
            return Err(ScoringError::Config(
                "behavioral metric weights must not all be zero".to_string(),
            ));
        }
        if let LicensePolicy::Additive { weight } = self.license_policy {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ScoringError::Config(format!(
                    "additive license weight must be within [0, 1], got {weight}"
                )));
            }
        }
        if self.bus_factor.normalization <= 0.0 {
            return Err(ScoringError::Config(
                "bus factor normalization must be positive".to_string(),
            ));
        }
        if self.ramp_up.lines_per_comment <= 0.0 {
            return Err(ScoringError::Config(
                "ramp-up lines_per_comment must be positive".to_string(),
            ));
        }
        if self.responsiveness.baseline_commits_per_week <= 0.0 {
            return Err(ScoringError::Config(
                "responsiveness baseline_commits_per_week must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Weights of the four behavioral metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub bus_factor: f64,
    pub correctness: f64,
    pub ramp_up: f64,
    pub responsive_maintainer: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            bus_factor: BUS_FACTOR_WEIGHT,
            correctness: CORRECTNESS_WEIGHT,
            ramp_up: RAMP_UP_WEIGHT,
            responsive_maintainer: RESPONSIVE_MAINTAINER_WEIGHT,
        }
    }
}

impl MetricWeights {
    /// License is not weighted here; see [`LicensePolicy`].
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::BusFactor => self.bus_factor,
            MetricKind::Correctness => self.correctness,
            MetricKind::RampUp => self.ramp_up,
            MetricKind::ResponsiveMaintainer => self.responsive_maintainer,
            MetricKind::License => 0.0,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.bus_factor + self.correctness + self.ramp_up + self.responsive_maintainer
    }
}

/// How the license score enters the net score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LicensePolicy {
    /// `net = license * behavioral`
    #[default]
    Multiplicative,
    /// `net = weight * license + (1 - weight) * behavioral`
    Additive { weight: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusFactorConfig {
    /// Contributors below this share of all commits are dropped as outliers
    pub outlier_share: f64,
    /// Cumulative commit share that defines the core contributors
    pub core_threshold: f64,
    /// Fraction of all contributors a healthy core is expected to reach
    pub normalization: f64,
}

impl Default for BusFactorConfig {
    fn default() -> Self {
        Self {
            outlier_share: BUS_FACTOR_OUTLIER_SHARE,
            core_threshold: BUS_FACTOR_CORE_THRESHOLD,
            normalization: BUS_FACTOR_NORMALIZATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectnessConfig {
    pub coverage_weight: f64,
    pub issue_weight: f64,
    pub ci_score: f64,
    pub file_ratio_weight: f64,
    pub issue_window_months: u32,
}

impl Default for CorrectnessConfig {
    fn default() -> Self {
        Self {
            coverage_weight: CORRECTNESS_COVERAGE_WEIGHT,
            issue_weight: CORRECTNESS_ISSUE_WEIGHT,
            ci_score: CI_PRESENCE_SCORE,
            file_ratio_weight: FILE_RATIO_WEIGHT,
            issue_window_months: ISSUE_WINDOW_MONTHS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampUpConfig {
    pub readme_score: f64,
    pub instructions_score: f64,
    pub comment_ratio_weight: f64,
    /// One comment line per this many lines counts as fully documented
    pub lines_per_comment: f64,
}

impl Default for RampUpConfig {
    fn default() -> Self {
        Self {
            readme_score: 0.1,
            instructions_score: 0.4,
            comment_ratio_weight: 0.5,
            lines_per_comment: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsivenessConfig {
    pub window_months: u32,
    pub baseline_commits_per_week: f64,
    pub issue_ratio_weight: f64,
    pub weeks_not_lost_weight: f64,
    pub commit_frequency_weight: f64,
}

impl Default for ResponsivenessConfig {
    fn default() -> Self {
        Self {
            window_months: ISSUE_WINDOW_MONTHS,
            baseline_commits_per_week: 10.0,
            issue_ratio_weight: 0.5,
            weeks_not_lost_weight: 0.25,
            commit_frequency_weight: 0.25,
        }
    }
}
