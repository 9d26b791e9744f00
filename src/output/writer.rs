use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::ScoreRecord;

/// Score card path for a post: `<out_dir>/<post_id>.json`.
///
/// `position` (1-based, across the whole run) names cards for posts whose
/// id is missing or unusable as a file name.
pub fn card_path(out_dir: &Path, post_id: &Value, position: usize) -> PathBuf {
    let raw = match post_id {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let name: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let name = if name.trim_matches('.').is_empty() {
        format!("post-{}", position)
    } else {
        name
    };

    out_dir.join(format!("{}.json", name))
}

/// Write a score card as pretty JSON, atomically.
/// Creates the parent directory if it doesn't exist.
pub fn write_card(path: &Path, record: &ScoreRecord) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory at {}", dir.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, record).context("Failed to serialize score card")?;

    file.commit()
        .with_context(|| format!("Failed to save score card at {}", path.display()))?;

    Ok(())
}
