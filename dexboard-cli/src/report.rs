use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dexboard_core::IngestOutcome;
use serde::Serialize;

use crate::pipeline::{DirectoryOutcome, DirectoryReport};

/// Tally of a whole leaderboard run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub directories: usize,
    pub updated: usize,
    pub appended: usize,
    pub excluded: usize,
    pub lookup_failed: usize,
    pub missing_stat_file: usize,
    pub unreadable: usize,
    pub roster_size: usize,
    pub roster_path: PathBuf,
    pub image_path: Option<PathBuf>,
    pub reports: Vec<DirectoryReport>,
}

impl RunSummary {
    #[must_use]
    pub fn new(
        reports: Vec<DirectoryReport>,
        roster_size: usize,
        roster_path: PathBuf,
        image_path: Option<PathBuf>,
    ) -> Self {
        let mut summary = Self {
            directories: reports.len(),
            roster_size,
            roster_path,
            image_path,
            ..Self::default()
        };
        for report in &reports {
            match &report.outcome {
                DirectoryOutcome::Ingested(IngestOutcome::Updated { .. }) => summary.updated += 1,
                DirectoryOutcome::Ingested(IngestOutcome::Appended { .. }) => {
                    summary.appended += 1;
                }
                DirectoryOutcome::Ingested(IngestOutcome::Excluded { .. }) => {
                    summary.excluded += 1;
                }
                DirectoryOutcome::Ingested(IngestOutcome::LookupFailed { .. }) => {
                    summary.lookup_failed += 1;
                }
                DirectoryOutcome::MissingStatFile => summary.missing_stat_file += 1,
                DirectoryOutcome::Unreadable { .. } => summary.unreadable += 1,
            }
        }
        summary.reports = reports;
        summary
    }

    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.excluded + self.lookup_failed + self.missing_stat_file + self.unreadable
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    summary: &RunSummary,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Leaderboard Run Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;

    writeln!(out, "Player folders: {}", summary.directories)?;
    writeln!(out, "Updated: {}", summary.updated.to_string().green())?;
    writeln!(out, "Added from lookup: {}", summary.appended.to_string().green())?;
    writeln!(out, "Excluded: {}", summary.excluded)?;
    writeln!(
        out,
        "Lookup failures: {}",
        summary.lookup_failed.to_string().red()
    )?;
    writeln!(
        out,
        "Missing stat file: {}",
        summary.missing_stat_file.to_string().yellow()
    )?;
    writeln!(out, "Unreadable: {}", summary.unreadable.to_string().red())?;
    writeln!(out, "Skipped in total: {}", summary.skipped())?;
    writeln!(out, "Roster size: {}", summary.roster_size)?;
    writeln!(out)?;

    for report in &summary.reports {
        let line = match &report.outcome {
            DirectoryOutcome::Ingested(
                IngestOutcome::Updated {
                    username, tally, ..
                }
                | IngestOutcome::Appended {
                    username, tally, ..
                },
            ) => format!(
                "✅ {} {} ({} caught, {} shiny)",
                report.folder,
                username.bold(),
                tally.caught,
                tally.shiny
            ),
            DirectoryOutcome::Ingested(IngestOutcome::Excluded { uuid, .. }) => {
                format!("🚫 {} excluded ({uuid})", report.folder)
            }
            DirectoryOutcome::Ingested(IngestOutcome::LookupFailed { uuid, reason }) => format!(
                "❌ {} lookup failed for {uuid}: {}",
                report.folder,
                reason.red()
            ),
            DirectoryOutcome::MissingStatFile => {
                format!("⚠️  {} has no stat file", report.folder.yellow())
            }
            DirectoryOutcome::Unreadable { reason } => {
                format!("❌ {} unreadable: {}", report.folder, reason.red())
            }
        };
        writeln!(out, "{line}")?;
    }

    writeln!(out)?;
    writeln!(out, "💾 Roster: {}", summary.roster_path.display())?;
    match &summary.image_path {
        Some(path) => writeln!(out, "🖼️  Leaderboard image: {}", path.display())?,
        None => writeln!(out, "🖼️  Leaderboard image: skipped")?,
    }
    writeln!(out, "🏁 Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}
