//! Sequential pass over every player folder.
use std::path::Path;

use anyhow::Result;
use dexboard_core::{IdentityLookup, IngestOutcome, Resolver, Roster};
use serde::Serialize;

use crate::scanner::{find_stat_file, player_dirs, read_save};

/// What happened to a player folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectoryOutcome {
    Ingested(IngestOutcome),
    MissingStatFile,
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryReport {
    pub folder: String,
    #[serde(flatten)]
    pub outcome: DirectoryOutcome,
}

/// Fold every player folder under `base` into `roster`.
///
/// Folders are handled one at a time and each profile lookup is awaited
/// before the next folder is read. Per-folder problems are logged and
/// reported; only an unreadable `base` aborts the pass.
///
/// # Errors
///
/// Returns an error if `base` cannot be listed.
pub async fn collect_player_stats<L>(
    base: &Path,
    suffix: &str,
    roster: &mut Roster,
    resolver: &Resolver<'_, L>,
) -> Result<Vec<DirectoryReport>>
where
    L: IdentityLookup,
{
    let mut reports = Vec::new();
    for dir in player_dirs(base)? {
        let outcome = match find_stat_file(&dir.path, suffix) {
            Ok(Some(stat_file)) => match read_save(&stat_file) {
                Ok(record) => DirectoryOutcome::Ingested(resolver.ingest(roster, &record).await),
                Err(err) => {
                    log::error!("Skipping {}: {err:#}", dir.folder);
                    DirectoryOutcome::Unreadable {
                        reason: format!("{err:#}"),
                    }
                }
            },
            Ok(None) => {
                log::warn!("No stat file found for {}", dir.folder);
                DirectoryOutcome::MissingStatFile
            }
            Err(err) => {
                log::error!("Skipping {}: cannot list folder: {err}", dir.folder);
                DirectoryOutcome::Unreadable {
                    reason: err.to_string(),
                }
            }
        };
        reports.push(DirectoryReport {
            folder: dir.folder,
            outcome,
        });
    }
    Ok(reports)
}
