use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dexboard_core::RosterEntry;

/// Overwrite `path` with the roster as an indented JSON array.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn write_roster(path: &Path, entries: &[RosterEntry]) -> Result<()> {
    ensure_parent_dir(path)?;
    let payload = serde_json::to_string_pretty(entries).context("serializing roster")?;
    fs::write(path, payload).with_context(|| format!("failed to write {}", path.display()))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}
