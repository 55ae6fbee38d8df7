//! Tests for the bus factor scorer.

use super::fixtures::details_with_contributors;
use trustscore::RepoDetails;
use trustscore::scoring::config::BusFactorConfig;
use trustscore::scoring::metrics::calculate_bus_factor;

#[test]
fn test_single_dominant_contributor() {
    let details = details_with_contributors(&[("A", 90), ("B", 8), ("C", 2)]);
    let score = calculate_bus_factor(&details, &BusFactorConfig::default());
    // one core contributor out of three: 1 / (0.35 * 3)
    assert!((score - 0.952).abs() < 1e-3, "got {score}");
}

#[test]
fn test_zero_or_one_contributor() {
    let config = BusFactorConfig::default();
    assert_eq!(calculate_bus_factor(&RepoDetails::new("a", "b"), &config), 0.0);
    assert_eq!(
        calculate_bus_factor(&details_with_contributors(&[("solo", 500)]), &config),
        0.0
    );
}

#[test]
fn test_evenly_spread_contributors() {
    let commits: Vec<(&str, u64)> = vec![
        ("a", 10),
        ("b", 10),
        ("c", 10),
        ("d", 10),
        ("e", 10),
        ("f", 10),
        ("g", 10),
        ("h", 10),
        ("i", 10),
        ("j", 10),
    ];
    let score = calculate_bus_factor(&details_with_contributors(&commits), &BusFactorConfig::default());
    // most of the team is needed to reach 80%, which clamps to 1
    assert_eq!(score, 1.0);
}

#[test]
fn test_score_stays_in_unit_interval() {
    let config = BusFactorConfig::default();
    for commits in [
        vec![("a", 1), ("b", 1)],
        vec![("a", 1000), ("b", 1)],
        vec![("a", 3), ("b", 2), ("c", 1)],
    ] {
        let score = calculate_bus_factor(&details_with_contributors(&commits), &config);
        assert!((0.0..=1.0).contains(&score), "{commits:?} scored {score}");
    }
}
