//! Run configuration: defaults, optional JSON file, CLI overrides.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dexboard_core::ExclusionPolicy;
use serde::{Deserialize, Serialize};

/// Mojang profile lookup endpoint; the player identifier is appended as a path segment.
pub const DEFAULT_LOOKUP_URL: &str = "https://api.minecraftservices.com/minecraft/profile/lookup";

/// Everything a leaderboard run needs to know.
///
/// Defaults match the layout of a server directory, so running the binary
/// from the server root with no flags just works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub identity_cache: PathBuf,
    pub player_data: PathBuf,
    pub stat_suffix: String,
    pub roster_out: PathBuf,
    pub image_out: PathBuf,
    pub exclude: ExclusionPolicy,
    pub lookup_url: String,
    pub lookup_timeout_secs: Option<u64>,
    pub utc_offset_hours: i32,
    pub render_image: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            identity_cache: PathBuf::from("usercache.json"),
            player_data: PathBuf::from("world/cobblemonplayerdata"),
            stat_suffix: ".json".to_string(),
            roster_out: PathBuf::from("users.json"),
            image_out: PathBuf::from("images/leaderboard.png"),
            exclude: ExclusionPolicy::default(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            lookup_timeout_secs: None,
            utc_offset_hours: 1,
            render_image: true,
        }
    }
}

impl BoardConfig {
    /// Load a configuration file; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    #[must_use]
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_secs.map(Duration::from_secs)
    }
}
