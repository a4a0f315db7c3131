mod config;
mod lookup;
mod persist;
mod pipeline;
mod render;
mod report;
mod scanner;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use config::BoardConfig;
use dexboard_core::{
    ExclusionPolicy, IdentityLookup, Resolver, Roster, parse_identity_cache, rank_by_caught,
};
use lookup::ProfileLookupClient;
use report::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Machine-readable run summary
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "dexboard", version)]
#[command(
    about = "Builds the Cobblemon Pokédex leaderboard from player saves: users.json plus a PNG"
)]
struct Args {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Server identity cache (usercache.json)
    #[arg(long)]
    identity_cache: Option<PathBuf>,

    /// Directory holding one folder per player
    #[arg(long)]
    player_data: Option<PathBuf>,

    /// File name suffix of a player's stat file
    #[arg(long)]
    stat_suffix: Option<String>,

    /// Where to write the merged roster
    #[arg(long)]
    roster_out: Option<PathBuf>,

    /// Where to write the leaderboard PNG
    #[arg(long)]
    image_out: Option<PathBuf>,

    /// Player name to leave off the leaderboard (repeatable, replaces the configured list)
    #[arg(long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Profile lookup endpoint; the player UUID is appended as a path segment
    #[arg(long)]
    lookup_url: Option<String>,

    /// Abort a profile lookup after this many seconds
    #[arg(long)]
    lookup_timeout_secs: Option<u64>,

    /// Hours added to UTC for the image timestamp
    #[arg(long, allow_hyphen_values = true)]
    utc_offset_hours: Option<i32>,

    /// Skip rendering the leaderboard image
    #[arg(long)]
    no_image: bool,

    /// Run summary format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the run summary instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    if args.report == ReportFormat::Console && args.output.is_none() {
        announce_banner();
    }

    let start_time = Instant::now();
    let lookup = ProfileLookupClient::new(&config.lookup_url, config.lookup_timeout())?;
    let summary = run(&config, &lookup, Utc::now()).await?;

    write_reports(&args, &summary, start_time.elapsed())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    println!("{}", "🏆 Dexboard".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn build_config(args: &Args) -> Result<BoardConfig> {
    let mut config = match &args.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };

    if let Some(path) = &args.identity_cache {
        config.identity_cache.clone_from(path);
    }
    if let Some(path) = &args.player_data {
        config.player_data.clone_from(path);
    }
    if let Some(suffix) = &args.stat_suffix {
        config.stat_suffix.clone_from(suffix);
    }
    if let Some(path) = &args.roster_out {
        config.roster_out.clone_from(path);
    }
    if let Some(path) = &args.image_out {
        config.image_out.clone_from(path);
    }
    if !args.exclude.is_empty() {
        config.exclude = ExclusionPolicy::new(args.exclude.iter().cloned());
    }
    if let Some(url) = &args.lookup_url {
        config.lookup_url.clone_from(url);
    }
    if args.lookup_timeout_secs.is_some() {
        config.lookup_timeout_secs = args.lookup_timeout_secs;
    }
    if let Some(offset) = args.utc_offset_hours {
        config.utc_offset_hours = offset;
    }
    if args.no_image {
        config.render_image = false;
    }

    Ok(config)
}

/// Load the roster, fold every player folder into it, then write both outputs.
async fn run<L>(config: &BoardConfig, lookup: &L, now: DateTime<Utc>) -> Result<RunSummary>
where
    L: IdentityLookup,
{
    let cache_json = fs::read_to_string(&config.identity_cache).with_context(|| {
        format!(
            "failed to read identity cache {}",
            config.identity_cache.display()
        )
    })?;
    let records = parse_identity_cache(&cache_json).with_context(|| {
        format!(
            "failed to parse identity cache {}",
            config.identity_cache.display()
        )
    })?;
    let mut roster = Roster::from_identity_cache(&records, &config.exclude);
    log::info!("Loaded {} players from identity cache", roster.len());

    let resolver = Resolver::new(lookup, &config.exclude);
    let reports = pipeline::collect_player_stats(
        &config.player_data,
        &config.stat_suffix,
        &mut roster,
        &resolver,
    )
    .await?;

    persist::write_roster(&config.roster_out, roster.entries())?;
    log::info!("Roster written to {}", config.roster_out.display());

    let image_path = if config.render_image {
        let ranked = rank_by_caught(roster.entries());
        let timestamp = render::footer_timestamp(now, config.utc_offset_hours);
        let canvas = render::render_leaderboard(&ranked, &timestamp);
        render::write_png(&canvas, &config.image_out)?;
        log::info!("Leaderboard image saved to {}", config.image_out.display());
        Some(config.image_out.clone())
    } else {
        None
    };

    Ok(RunSummary::new(
        reports,
        roster.len(),
        config.roster_out.clone(),
        image_path,
    ))
}

fn write_reports(args: &Args, summary: &RunSummary, duration: Duration) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => report::generate_json_report(output_target.writer(), summary)?,
        ReportFormat::Console => {
            report::generate_console_report(output_target.writer(), summary, duration)?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            persist::ensure_parent_dir(&path)?;
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{save_json, scratch_dir, write_json};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use dexboard_core::Profile;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, thiserror::Error)]
    #[error("no profile for {0}")]
    struct NoProfile(String);

    struct StaticLookup(HashMap<String, String>);

    impl StaticLookup {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(uuid, name)| ((*uuid).to_string(), (*name).to_string()))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl IdentityLookup for StaticLookup {
        type Error = NoProfile;

        async fn lookup(&self, uuid: &str) -> Result<Profile, Self::Error> {
            self.0
                .get(uuid)
                .map(|name| Profile {
                    name: name.clone(),
                    id: Some(uuid.to_string()),
                })
                .ok_or_else(|| NoProfile(uuid.to_string()))
        }
    }

    fn base_args() -> Args {
        Args {
            config: None,
            identity_cache: None,
            player_data: None,
            stat_suffix: None,
            roster_out: None,
            image_out: None,
            exclude: Vec::new(),
            lookup_url: None,
            lookup_timeout_secs: None,
            utc_offset_hours: None,
            no_image: false,
            report: ReportFormat::Console,
            output: None,
            verbose: false,
        }
    }

    fn server_dir(label: &str) -> (PathBuf, BoardConfig) {
        let root = scratch_dir(label);
        write_json(
            &root.join("usercache.json"),
            &json!([
                {"name": "A", "uuid": "u1", "expiresOn": "2026-11-01 10:00:00 +0000"},
                {"name": "ImShogeki", "uuid": "u0", "expiresOn": "2026-11-01 10:00:00 +0000"}
            ]),
        );
        let saves = root.join("world/cobblemonplayerdata");
        write_json(
            &saves.join("aa/u1.json"),
            &save_json("u1", &[("pikachu", "CAUGHT", false)]),
        );
        write_json(
            &saves.join("bb/u2.json"),
            &save_json("u2", &[("eevee", "CAUGHT", true), ("mew", "CAUGHT", false)]),
        );
        write_json(&saves.join("cc/u3.json"), &save_json("u3", &[("ditto", "CAUGHT", true)]));
        write_json(&saves.join("dd/u0.json"), &save_json("u0", &[("arceus", "CAUGHT", true)]));
        fs::create_dir_all(saves.join("ee")).unwrap();

        let config = BoardConfig {
            identity_cache: root.join("usercache.json"),
            player_data: saves,
            roster_out: root.join("users.json"),
            image_out: root.join("images/leaderboard.png"),
            ..BoardConfig::default()
        };
        (root, config)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn build_config_uses_defaults_without_flags() {
        let config = build_config(&base_args()).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn build_config_applies_flag_overrides() {
        let args = Args {
            player_data: Some(PathBuf::from("/srv/mc/world/cobblemonplayerdata")),
            exclude: vec!["Op".to_string(), "Bot".to_string()],
            lookup_timeout_secs: Some(7),
            utc_offset_hours: Some(-3),
            no_image: true,
            ..base_args()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(
            config.player_data,
            PathBuf::from("/srv/mc/world/cobblemonplayerdata")
        );
        assert!(config.exclude.is_excluded("Bot"));
        assert!(!config.exclude.is_excluded("ImShogeki"));
        assert_eq!(config.lookup_timeout(), Some(Duration::from_secs(7)));
        assert_eq!(config.utc_offset_hours, -3);
        assert!(!config.render_image);
    }

    #[test]
    fn build_config_flags_override_config_file() {
        let dir = scratch_dir("main-config");
        let path = dir.join("dexboard.json");
        fs::write(&path, r#"{"roster_out": "from-file.json", "stat_suffix": ".dat"}"#).unwrap();
        let args = Args {
            config: Some(path),
            roster_out: Some(PathBuf::from("from-flag.json")),
            ..base_args()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.roster_out, PathBuf::from("from-flag.json"));
        assert_eq!(config.stat_suffix, ".dat");
    }

    #[test]
    fn run_writes_roster_and_image() {
        let (_root, config) = server_dir("main-run");
        let lookup = StaticLookup::new(&[("u2", "B"), ("u0", "ImShogeki")]);

        let summary = tokio_test::block_on(run(&config, &lookup, now())).unwrap();

        let users: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&config.roster_out).unwrap()).unwrap();
        assert_eq!(
            users,
            json!([
                {"username": "A", "uuid": "u1", "caught": 1, "shiny": 0},
                {"username": "B", "uuid": "u2", "caught": 2, "shiny": 1}
            ])
        );
        assert_eq!(
            image::image_dimensions(&config.image_out).unwrap(),
            (render::WIDTH, render::HEIGHT)
        );

        assert_eq!(summary.directories, 5);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.appended, 1);
        assert_eq!(summary.lookup_failed, 1);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.missing_stat_file, 1);
        assert_eq!(summary.roster_size, 2);
        assert_eq!(summary.image_path.as_deref(), Some(config.image_out.as_path()));
    }

    #[test]
    fn run_without_image_leaves_no_png() {
        let (_root, mut config) = server_dir("main-noimage");
        config.render_image = false;
        let lookup = StaticLookup::new(&[]);

        let summary = tokio_test::block_on(run(&config, &lookup, now())).unwrap();
        assert!(summary.image_path.is_none());
        assert!(!config.image_out.exists());
        assert!(config.roster_out.exists());
    }

    #[test]
    fn run_fails_on_malformed_identity_cache() {
        let (_root, config) = server_dir("main-badcache");
        fs::write(&config.identity_cache, "{\"name\": \"A\"}").unwrap();
        let lookup = StaticLookup::new(&[]);

        let err = tokio_test::block_on(run(&config, &lookup, now())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse identity cache"));
        assert!(!config.roster_out.exists());
    }

    #[test]
    fn run_fails_when_player_data_is_missing() {
        let (root, mut config) = server_dir("main-nodata");
        config.player_data = root.join("missing");
        let lookup = StaticLookup::new(&[]);

        assert!(tokio_test::block_on(run(&config, &lookup, now())).is_err());
    }

    #[test]
    fn write_reports_emits_json_summary() {
        let temp = scratch_dir("main-report").join("summary.json");
        let args = Args {
            report: ReportFormat::Json,
            output: Some(temp.clone()),
            ..base_args()
        };
        let summary = RunSummary::new(Vec::new(), 0, PathBuf::from("users.json"), None);
        write_reports(&args, &summary, Duration::ZERO).unwrap();
        let content = fs::read_to_string(temp).unwrap();
        assert!(content.contains("\"roster_size\": 0"));
    }

    #[test]
    fn write_reports_emits_console_summary() {
        let temp = scratch_dir("main-report-console").join("summary.txt");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        let summary = RunSummary::new(Vec::new(), 3, PathBuf::from("users.json"), None);
        write_reports(&args, &summary, Duration::ZERO).unwrap();
        let content = fs::read_to_string(temp).unwrap();
        assert!(content.contains("Roster size: 3"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.writer().write_all(b"ok").unwrap();
        target.flush_inner().unwrap();
    }
}
