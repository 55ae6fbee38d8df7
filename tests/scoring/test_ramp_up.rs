//! Tests for the ramp-up scorer.

use super::fixtures::{standard_tree, write_file};
use std::fs;
use tempfile::TempDir;
use trustscore::ScoringConfig;
use trustscore::scoring::metrics::calculate_ramp_up;
use trustscore::scoring::metrics::ramp_up::ramp_up_breakdown;

#[test]
fn test_readme_with_instructions() {
    let tree = standard_tree();
    let breakdown = ramp_up_breakdown(tree.path(), &ScoringConfig::default()).expect("ramp-up");
    assert_eq!(breakdown.readme, 0.1);
    assert_eq!(breakdown.instructions, 0.4);
    assert_eq!(breakdown.comments, 0.0);
    assert!((calculate_ramp_up(tree.path(), &ScoringConfig::default()) - 0.5).abs() < 1e-9);
}

#[test]
fn test_readme_without_keywords() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "readme.txt", "Hello world\n");
    let breakdown = ramp_up_breakdown(dir.path(), &ScoringConfig::default()).expect("ramp-up");
    assert_eq!(breakdown.readme, 0.1);
    assert_eq!(breakdown.instructions, 0.0);
}

#[test]
fn test_no_readme_scores_only_comments() {
    let dir = TempDir::new().expect("tempdir");
    // 8 lines, 1 comment: exactly one comment per eight lines
    write_file(dir.path(), "lib/a.js", "// entry\na\nb\nc\nd\ne\nf\ng");
    let score = calculate_ramp_up(dir.path(), &ScoringConfig::default());
    assert!((score - 0.5).abs() < 1e-9, "got {score}");
}

#[test]
fn test_comment_ratio_is_proportional() {
    let dir = TempDir::new().expect("tempdir");
    // 16 lines, 1 comment
    let body = format!("# note\n{}", vec!["x = 1"; 15].join("\n"));
    write_file(dir.path(), "tool.py", &body);
    let breakdown = ramp_up_breakdown(dir.path(), &ScoringConfig::default()).expect("ramp-up");
    assert!((breakdown.comments - 0.25).abs() < 1e-9, "got {}", breakdown.comments);
}

#[test]
fn test_non_code_files_are_ignored() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "notes.md", "// looks like a comment\n");
    write_file(dir.path(), "Makefile", "# also not code\n");
    assert_eq!(calculate_ramp_up(dir.path(), &ScoringConfig::default()), 0.0);
}

#[test]
fn test_readme_directory_does_not_count() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("README")).expect("mkdir");
    let breakdown = ramp_up_breakdown(dir.path(), &ScoringConfig::default()).expect("ramp-up");
    assert_eq!(breakdown.readme, 0.0);
}

#[test]
fn test_missing_tree_degrades_to_zero() {
    let dir = TempDir::new().expect("tempdir");
    assert_eq!(
        calculate_ramp_up(&dir.path().join("absent"), &ScoringConfig::default()),
        0.0
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_files_are_skipped() {
    let outside = TempDir::new().expect("tempdir");
    write_file(outside.path(), "real.js", "// only comments\n// here");

    let dir = TempDir::new().expect("tempdir");
    std::os::unix::fs::symlink(outside.path().join("real.js"), dir.path().join("link.js"))
        .expect("symlink");
    assert_eq!(calculate_ramp_up(dir.path(), &ScoringConfig::default()), 0.0);
}
