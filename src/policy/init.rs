use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::schema::Policy;

/// Write the built-in policy to `path` as pretty JSON.
///
/// Refuses to overwrite an existing file unless `force` is set. Parent
/// directories are created as needed.
pub fn write_default_policy(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Policy file already exists at {}. Use --force to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &Policy::default())
        .context("Failed to serialize default policy")?;
    file.write_all(b"\n").context("Failed to write policy")?;

    file.commit().context("Failed to save policy")?;

    Ok(())
}
