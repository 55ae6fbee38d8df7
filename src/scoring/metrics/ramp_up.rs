//! Ramp-up: how quickly a newcomer can get productive with the code

use crate::scoring::config::{RampUpConfig, ScoringConfig};
use crate::scoring::helpers::{check_file_size, is_git_dir};
use crate::scoring::types::{ScoringResult, clamp_unit};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const INSTRUCTION_KEYWORDS: [&str; 5] = ["install", "test", "launch", "run", "example"];

const CODE_EXTENSIONS: [&str; 13] = [
    "js", "ts", "py", "java", "c", "cpp", "cs", "rb", "go", "php", "swift", "kt", "kts",
];

lazy_static! {
    static ref README_RE: Result<Regex, regex::Error> = Regex::new(r"(?i)^README(\.md|\.txt)?$");
}

/// The three additive parts of the ramp-up score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RampUpBreakdown {
    pub readme: f64,
    pub instructions: f64,
    pub comments: f64,
}

impl RampUpBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        clamp_unit(self.readme + self.instructions + self.comments)
    }
}

/// Comment markers for one language family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub single: &'static str,
    pub block_start: &'static str,
    pub block_end: &'static str,
}

impl CommentSyntax {
    const C_LIKE: Self = Self {
        single: "//",
        block_start: "/*",
        block_end: "*/",
    };
    const PYTHON: Self = Self {
        single: "#",
        block_start: "'''",
        block_end: "'''",
    };
    const RUBY: Self = Self {
        single: "#",
        block_start: "=begin",
        block_end: "=end",
    };

    /// Syntax for a lowercase file extension (without the dot)
    #[must_use]
    pub fn for_extension(ext: &str) -> Self {
        match ext {
            "py" => Self::PYTHON,
            "rb" => Self::RUBY,
            _ => Self::C_LIKE,
        }
    }
}

/// Score ramp-up time for the tree at `root`.
///
/// Never fails: anything unexpected is logged and the whole score becomes 0.
pub fn calculate_ramp_up(root: &Path, config: &ScoringConfig) -> f64 {
    match ramp_up_breakdown(root, config) {
        Ok(breakdown) => {
            let score = breakdown.total();
            info!(
                "Ramp-up for {}: readme {}, instructions {}, comments {:.3} => {score:.3}",
                root.display(),
                breakdown.readme,
                breakdown.instructions,
                breakdown.comments
            );
            score
        }
        Err(e) => {
            warn!("Error calculating ramp-up time for {}: {e}", root.display());
            0.0
        }
    }
}

/// Compute each part of the ramp-up score separately.
pub fn ramp_up_breakdown(root: &Path, config: &ScoringConfig) -> ScoringResult<RampUpBreakdown> {
    let weights = &config.ramp_up;
    let readmes = find_readmes(root)?;
    debug!("README files found: {}", readmes.len());

    let readme = if readmes.is_empty() {
        0.0
    } else {
        weights.readme_score
    };
    let instructions = if has_instructions(&readmes, config.max_file_size)? {
        weights.instructions_score
    } else {
        0.0
    };
    let comments = comment_ratio_score(root, weights, config.max_file_size)?;

    Ok(RampUpBreakdown {
        readme,
        instructions,
        comments,
    })
}

/// Count comment lines using the per-line rules for `syntax`.
///
/// A line inside a block comment always counts and closes the block when it
/// is exactly the end marker. Otherwise a line counts when it starts with
/// the single-line marker or contains the block start; the latter opens a
/// block unless the end marker is on the same line.
#[must_use]
pub fn count_comment_lines<'a, I>(lines: I, syntax: CommentSyntax) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let mut in_block = false;
    let mut count = 0;

    for line in lines {
        let trimmed = line.trim();
        if in_block {
            count += 1;
            if trimmed == syntax.block_end {
                in_block = false;
            }
        } else if trimmed.starts_with(syntax.single) {
            count += 1;
        } else if trimmed == syntax.block_start {
            count += 1;
            in_block = true;
        } else if trimmed.contains(syntax.block_start) {
            count += 1;
            if !trimmed.contains(syntax.block_end) {
                in_block = true;
            }
        }
    }

    count
}

fn find_readmes(root: &Path) -> ScoringResult<Vec<PathBuf>> {
    let readme_re = README_RE
        .as_ref()
        .map_err(|e| io::Error::other(e.to_string()))?;

    let mut readmes = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|name| readme_re.is_match(name)) {
            readmes.push(entry.path());
        }
    }
    readmes.sort();
    Ok(readmes)
}

fn has_instructions(readmes: &[PathBuf], max_file_size: u64) -> ScoringResult<bool> {
    for readme in readmes {
        if let Err(e) = check_file_size(readme, max_file_size) {
            warn!("README file skipped: {e}");
            continue;
        }
        let content = String::from_utf8_lossy(&fs::read(readme)?).to_lowercase();
        if let Some(keyword) = INSTRUCTION_KEYWORDS.iter().find(|k| content.contains(*k)) {
            debug!(
                "Instructions found in {} with keyword: {keyword}",
                readme.display()
            );
            return Ok(true);
        }
    }
    Ok(false)
}

fn comment_ratio_score(root: &Path, config: &RampUpConfig, max_file_size: u64) -> ScoringResult<f64> {
    let mut visited = HashSet::new();
    let mut total_lines = 0usize;
    let mut total_comments = 0usize;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_git_dir(e))
    {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() || !visited.insert(entry.path().to_path_buf()) {
            continue;
        }

        let path = entry.path();
        let Some(ext) = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
        else {
            continue;
        };
        if !CODE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        if let Err(e) = check_file_size(path, max_file_size) {
            warn!("Code file skipped: {e}");
            continue;
        }

        let content = String::from_utf8_lossy(&fs::read(path)?).into_owned();
        let lines: Vec<&str> = content.split('\n').collect();
        let comments = count_comment_lines(lines.iter().copied(), CommentSyntax::for_extension(&ext));
        total_lines += lines.len();
        total_comments += comments;
    }

    if total_lines == 0 {
        debug!("No lines of code found under {}", root.display());
        return Ok(0.0);
    }

    let ratio = total_comments as f64 / (total_lines as f64 / config.lines_per_comment);
    debug!("Total lines: {total_lines}, total comments: {total_comments}, ratio: {ratio:.3}");
    Ok(ratio.min(1.0) * config.comment_ratio_weight)
}
