//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Recursively copy the files under `src` into `dst`, preserving relative
/// paths and overwriting existing files.
///
/// Entries for which `skip` returns true are not copied; skipped directories
/// are not descended into. Returns the destination paths written, sorted.
pub fn copy_tree(src: &Path, dst: &Path, skip: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let walker = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !skip(e.path()));

    for entry in walker {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} escapes {}", entry.path().display(), src.display()))?;
        let dst_path = dst.join(rel);

        if let Some(parent) = dst_path.parent() {
            ensure_dir(parent)?;
        }
        fs::copy(entry.path(), &dst_path).with_context(|| {
            format!(
                "failed to copy {} to {}",
                entry.path().display(),
                dst_path.display()
            )
        })?;
        written.push(dst_path);
    }

    written.sort();
    Ok(written)
}
