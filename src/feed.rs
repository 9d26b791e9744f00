use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::scoring::Post;

/// A feed line that could not be parsed as a post.
#[derive(Debug, Clone)]
pub struct SkippedLine {
    pub line: usize, // 1-based
    pub error: String,
}

/// Posts read from one JSONL file, plus any lines that were skipped.
#[derive(Debug, Default)]
pub struct FeedReport {
    pub posts: Vec<Post>,
    pub skipped: Vec<SkippedLine>,
}

/// Expand input arguments as glob patterns.
///
/// Arguments that match nothing are kept as-is so reading them reports a
/// clear "not found" error. Duplicates are removed, first occurrence wins.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for pattern in patterns {
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("Invalid input pattern '{}'", pattern))?
            .filter_map(|entry| entry.ok())
            .collect();

        let expanded = if matches.is_empty() {
            vec![PathBuf::from(pattern)]
        } else {
            matches
        };

        for path in expanded {
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
    }

    Ok(paths)
}

/// Read one JSON post per line. Blank lines are ignored; malformed lines
/// are collected in the report instead of aborting the read.
pub fn read_posts(path: &Path) -> Result<FeedReport> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file at {}", path.display()))?;

    let mut report = FeedReport::default();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Post>(&line) {
            Ok(post) => report.posts.push(post),
            Err(e) => report.skipped.push(SkippedLine {
                line: i + 1,
                error: e.to_string(),
            }),
        }
    }

    Ok(report)
}
