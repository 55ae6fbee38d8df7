//! Tests for GitHub client construction and URL resolution.

use std::time::Duration;
use trustscore::{FetchConfig, GitHubClient, GitHubError};

#[tokio::test]
async fn test_builder_applies_fetch_config() {
    let config = FetchConfig {
        max_pages: 2,
        clone_timeout: Duration::from_secs(5),
        ..FetchConfig::default()
    };
    let client = GitHubClient::builder()
        .fetch_config(config.clone())
        .build()
        .expect("client builds without a token");
    assert_eq!(client.fetch_config(), &config);
}

#[tokio::test]
async fn test_github_urls_resolve_without_network() {
    let client = GitHubClient::builder().build().expect("client");
    let (owner, repo) = client
        .resolve_url("https://github.com/lodash/lodash")
        .await
        .expect("resolve");
    assert_eq!((owner.as_str(), repo.as_str()), ("lodash", "lodash"));
}

#[tokio::test]
async fn test_unsupported_host_is_rejected() {
    let client = GitHubClient::builder().build().expect("client");
    let err = client
        .resolve_url("https://bitbucket.org/a/b")
        .await
        .expect_err("unsupported host");
    assert!(matches!(err, GitHubError::InvalidUrl(_)));
}

#[test]
fn test_fetch_config_defaults() {
    let config = FetchConfig::default();
    assert_eq!(config.per_page, 100);
    assert_eq!(config.max_pages, 5);
    assert_eq!(config.lookback_months, 12);
}
