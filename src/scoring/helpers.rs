//! Filesystem helpers shared by the tree-reading metrics

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Breadth-first search for the first entry whose name satisfies `matches`.
///
/// `root` itself sits at depth 0; entries directly below it are at depth 1.
/// Directories are expanded only while their depth is below `max_depth`, and
/// symlinked directories are never followed. Entries inside a directory are
/// visited in name order so the result is stable across platforms.
pub(crate) fn bfs_find<F>(root: &Path, max_depth: usize, matches: F) -> io::Result<Option<PathBuf>>
where
    F: Fn(&str, bool) -> bool,
{
    let mut queue = VecDeque::from([(root.to_path_buf(), 0usize)]);

    while let Some((dir, depth)) = queue.pop_front() {
        let mut entries = fs::read_dir(&dir)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let file_type = entry.file_type()?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if matches(name, file_type.is_dir()) {
                return Ok(Some(entry.path()));
            }
            if file_type.is_dir() && depth + 1 < max_depth {
                queue.push_back((entry.path(), depth + 1));
            }
        }
    }

    Ok(None)
}

/// Count regular files below `dir`, recursively, without following symlinks.
pub(crate) fn count_files(dir: &Path) -> io::Result<u64> {
    let mut count = 0;
    for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::other)?;
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Check if entry is the .git directory
pub(crate) fn is_git_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str() == Some(".git")
}

/// Check that a file is no larger than `max_size` bytes
pub(crate) fn check_file_size(path: &Path, max_size: u64) -> Result<(), String> {
    let metadata = fs::metadata(path).map_err(|e| format!("Failed to get file metadata: {e}"))?;

    if metadata.len() > max_size {
        return Err(format!(
            "File too large: {} bytes (max: {} bytes)",
            metadata.len(),
            max_size
        ));
    }

    Ok(())
}
