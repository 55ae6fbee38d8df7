//! Materialize a repository by cloning it into a temporary directory

use crate::github::error::{GitHubError, GitHubResult};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tempfile::TempDir;

/// A checked-out working tree that is deleted when dropped.
#[derive(Debug)]
pub struct ClonedRepo {
    path: PathBuf,
    _dir: TempDir,
}

impl ClonedRepo {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for ClonedRepo {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Clone `url` with gix into a fresh temporary directory.
pub(crate) async fn clone_repository(url: &str, timeout: Duration) -> GitHubResult<ClonedRepo> {
    let temp_dir = TempDir::new().map_err(|e| GitHubError::Clone(format!("Temp dir: {e}")))?;
    let repo_path = temp_dir.path().join("repo");

    let url_owned = url.to_string();
    let repo_path_owned = repo_path.clone();

    let clone_result = tokio::time::timeout(
        timeout,
        tokio::task::spawn_blocking(move || {
            let parsed_url = gix::url::parse(url_owned.as_str().into())
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

            let mut prep = gix::prepare_clone(parsed_url, &repo_path_owned)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            let (mut checkout, _) = prep
                .fetch_then_checkout(gix::progress::Discard, &AtomicBool::new(false))
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            checkout
                .main_worktree(gix::progress::Discard, &AtomicBool::new(false))
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
        }),
    )
    .await;

    match clone_result {
        // Timeout occurred
        Err(_) => {
            warn!("Clone timeout for {url} after {timeout:?}");
            Err(GitHubError::Clone(format!("timed out after {timeout:?}")))
        }
        // spawn_blocking panicked or was cancelled
        Ok(Err(e)) => Err(GitHubError::Clone(format!("clone task failed: {e}"))),
        Ok(Ok(Err(e))) => Err(GitHubError::Clone(e.to_string())),
        Ok(Ok(Ok(()))) => {
            info!("Cloned {url} into {}", repo_path.display());
            Ok(ClonedRepo {
                path: repo_path,
                _dir: temp_dir,
            })
        }
    }
}
