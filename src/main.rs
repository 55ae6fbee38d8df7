// Score every package URL listed in a file and print one JSON line per URL.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;
use trustscore::{GitHubClient, NetScoreReport, ScoringConfig, score_package};

#[derive(Parser)]
#[command(
    name = "trustscore",
    version,
    about = "Score the trustworthiness of GitHub and npm packages"
)]
struct Cli {
    /// File with one GitHub or npm package URL per line
    url_file: PathBuf,

    /// TOML file overriding scoring weights and constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct UrlReport<'a> {
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(flatten)]
    report: NetScoreReport,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_file(path)
            .with_context(|| format!("loading scoring config {}", path.display()))?,
        None => ScoringConfig::default(),
    };

    let mut builder = GitHubClient::builder();
    if let Some(token) = cli.token {
        builder = builder.personal_token(token);
    }
    let client = builder.build().context("building GitHub client")?;

    let urls = tokio::fs::read_to_string(&cli.url_file)
        .await
        .with_context(|| format!("reading {}", cli.url_file.display()))?;

    let mut failures = 0usize;
    for url in urls.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match score_url(&client, url, &config).await {
            Ok(report) => {
                let line = serde_json::to_string(&UrlReport { url, report })?;
                println!("{line}");
            }
            Err(e) => {
                failures += 1;
                error!("{url}: {e:#}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} package(s) could not be scored");
    }
    info!("All packages scored");
    Ok(())
}

async fn score_url(client: &GitHubClient, url: &str, config: &ScoringConfig) -> Result<NetScoreReport> {
    let (owner, repo) = client
        .resolve_url(url)
        .await
        .with_context(|| format!("resolving {url}"))?;
    let result = score_package(client, &owner, &repo, config)
        .await
        .with_context(|| format!("scoring {owner}/{repo}"))?;
    Ok(result.into())
}
