//! Tests for the license scorer.

use trustscore::RepoDetails;
use trustscore::scoring::metrics::{calculate_license, license_from_text, license_score};

#[test]
fn test_permissive_and_copyleft() {
    assert_eq!(license_score(Some("MIT")), 1.0);
    assert_eq!(license_score(Some("MIT License")), 1.0);
    assert_eq!(license_score(Some("GPL-3.0")), 0.0);
    assert_eq!(license_score(Some("Apache-2.0")), 0.5);
}

#[test]
fn test_unknown_or_missing_license() {
    assert_eq!(license_score(None), 0.0);
    assert_eq!(license_score(Some("Proprietary")), 0.0);
}

#[test]
fn test_reads_license_from_details() {
    let mut details = RepoDetails::new("acme", "widget");
    details.license = Some("ISC License".to_string());
    assert_eq!(calculate_license(&details), 1.0);
    // same input, same answer
    assert_eq!(calculate_license(&details), calculate_license(&details));
}

#[test]
fn test_license_named_in_readme_text() {
    let readme = "# widget\n\n## License\n\nDistributed under the zlib license.\n";
    let id = license_from_text(readme);
    assert_eq!(id, Some("Zlib"));
    assert_eq!(license_score(id), 1.0);
}
