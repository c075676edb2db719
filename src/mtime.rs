//! File modification timestamp resolution.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

/// Last-modification time of a file, formatted as `YYYY-MM-DD HH:MM:SS`
/// in local time.
///
/// Fails when the file no longer exists at call time. The driver reads the
/// source before this stat, so a file removed in between surfaces here.
pub fn last_modified(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?;
    let modified = metadata
        .modified()
        .with_context(|| format!("no modification time for {}", path.display()))?;
    let local: DateTime<Local> = modified.into();
    Ok(local.format("%Y-%m-%d %H:%M:%S").to_string())
}
