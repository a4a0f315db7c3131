//! Walking `cobblemonplayerdata`: one subdirectory per player.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dexboard_core::PlayerSaveRecord;

/// A player folder under the save directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDir {
    pub folder: String,
    pub path: PathBuf,
}

/// List player folders in name order.
///
/// Plain files next to the folders are ignored.
///
/// # Errors
///
/// Returns an error if the base directory cannot be read.
pub fn player_dirs(base: &Path) -> Result<Vec<PlayerDir>> {
    let entries = fs::read_dir(base)
        .with_context(|| format!("failed to read player data dir {}", base.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to list player data dir {}", base.display()))?;
        let path = entry.path();
        let folder = entry.file_name().to_string_lossy().into_owned();
        if !path.is_dir() {
            log::debug!("Ignoring {folder}: not a player directory");
            continue;
        }
        dirs.push(PlayerDir { folder, path });
    }
    dirs.sort_by(|a, b| a.folder.cmp(&b.folder));
    Ok(dirs)
}

/// Pick the player's stat file: the first file, by name, ending in `suffix`.
///
/// # Errors
///
/// Returns an error if the player directory cannot be read.
pub fn find_stat_file(dir: &Path, suffix: &str) -> std::io::Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {err}", dir.display());
                None
            }
        })
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(suffix))
        })
        .collect();
    candidates.sort();

    if candidates.len() > 1 {
        log::warn!(
            "{} stat files in {}, using {}",
            candidates.len(),
            dir.display(),
            candidates[0].display()
        );
    }
    Ok(candidates.into_iter().next())
}

/// Read and parse one save document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a player record.
pub fn read_save(path: &Path) -> Result<PlayerSaveRecord> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read save {}", path.display()))?;
    PlayerSaveRecord::from_json(&raw)
        .with_context(|| format!("failed to parse save {}", path.display()))
}
