//! Versioned tool cache.
//!
//! Layout follows the runner's hosted tool cache so entries are shared with
//! other setup steps: `<root>/<tool>/<version>/<arch>/` holds the files and a
//! sibling `<arch>.complete` marker is written last. An entry without its
//! marker is treated as absent.

use crate::config::{Settings, TOOL_NAME};
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn version_dir(settings: &Settings, version: &str) -> PathBuf {
    settings.tool_cache_dir.join(TOOL_NAME).join(version)
}

fn marker_path(settings: &Settings, version: &str) -> PathBuf {
    version_dir(settings, version).join(format!("{}.complete", settings.arch))
}

/// Cached directory for `version`, if a completed entry exists.
pub fn find(settings: &Settings, version: &str) -> Option<PathBuf> {
    let dir = version_dir(settings, version).join(&settings.arch);
    let marker = marker_path(settings, version);
    tracing::debug!("Looking for cached {} {} in {}", TOOL_NAME, version, dir.display());

    if dir.is_dir() && marker.is_file() {
        Some(dir)
    } else {
        None
    }
}

/// Copies the contents of `source` into the cache entry for `version` and
/// returns the cached directory.
pub fn cache_dir(settings: &Settings, source: &Path, version: &str) -> Result<PathBuf> {
    let dest = version_dir(settings, version).join(&settings.arch);
    let marker = marker_path(settings, version);

    // Leftovers from an interrupted run
    if marker.exists() {
        fs::remove_file(&marker)
            .with_context(|| format!("Could not remove {}", marker.display()))?;
    }
    if dest.exists() {
        fs::remove_dir_all(&dest)
            .with_context(|| format!("Could not clear {}", dest.display()))?;
    }
    fs::create_dir_all(&dest)
        .with_context(|| format!("Could not create {}", dest.display()))?;

    copy_tree(source, &dest)?;

    fs::write(&marker, Utc::now().to_rfc3339())
        .with_context(|| format!("Could not write {}", marker.display()))?;

    tracing::info!("Cached {} {} at {}", TOOL_NAME, version, dest.display());
    Ok(dest)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            // fs::copy keeps permission bits
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Could not copy {} into the tool cache", entry.path().display())
            })?;
        }
    }
    Ok(())
}
