//! Tests for package URL classification and normalization.

use trustscore::github::{PackageUrl, classify_url, normalize_repository_url, parse_github_url};

#[test]
fn test_classify_github_url() {
    assert_eq!(
        classify_url("https://github.com/cloudinary/cloudinary_npm").expect("github url"),
        PackageUrl::GitHub {
            owner: "cloudinary".to_string(),
            repo: "cloudinary_npm".to_string(),
        }
    );
}

#[test]
fn test_classify_npm_url() {
    assert_eq!(
        classify_url("https://www.npmjs.com/package/express").expect("npm url"),
        PackageUrl::Npm {
            package: "express".to_string(),
        }
    );
}

#[test]
fn test_trailing_whitespace_is_ignored() {
    assert!(classify_url("  https://github.com/nullivex/nodist \n").is_ok());
}

#[test]
fn test_ssh_and_git_urls_become_https() {
    assert_eq!(
        normalize_repository_url("git@github.com:expressjs/express.git"),
        "https://github.com/expressjs/express"
    );
    assert_eq!(
        normalize_repository_url("git+ssh://git@github.com/expressjs/express.git"),
        "https://github.com/expressjs/express"
    );
    assert_eq!(
        normalize_repository_url("git://github.com/expressjs/express.git"),
        "https://github.com/expressjs/express"
    );
}

#[test]
fn test_repo_path_segments_are_ignored() {
    assert_eq!(
        parse_github_url("https://github.com/lodash/lodash/tree/main/src"),
        Some(("lodash".to_string(), "lodash".to_string()))
    );
}
