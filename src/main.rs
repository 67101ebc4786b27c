use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hero_stats::calculate::{
    self, decode_badge, filter_window_at, kill_feed, percentile_rank, positions_at, scale_color,
    scale_color_inverted, TimeWindow,
};
use hero_stats::config::AppConfig;
use hero_stats::dashboard::build_dashboard;
use hero_stats::fetch::{read_json_file, ApiClient, StatsSource};
use hero_stats::models::{HeroAsset, MatchRecord, MatchReplay, MetricSample, RankAsset};
use hero_stats::playback::PlaybackController;
use hero_stats::state::Selection;

#[derive(Parser)]
#[command(name = "hero-stats")]
#[command(about = "Match history statistics, rank badges and replay positions")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./hero-stats.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a match history file
    Summary {
        /// JSON array of match records
        #[arg(long)]
        matches: PathBuf,

        /// Lookback window ("7d", "30d", "90d", "all", or any duration)
        #[arg(long)]
        window: Option<TimeWindow>,

        /// Evaluate the window at this unix time instead of now
        #[arg(long)]
        now: Option<i64>,
    },

    /// Per-hero breakdown of a match history file
    Heroes {
        #[arg(long)]
        matches: PathBuf,

        #[arg(long)]
        window: Option<TimeWindow>,

        #[arg(long)]
        now: Option<i64>,

        /// Hero assets JSON, for names
        #[arg(long)]
        assets: Option<PathBuf>,
    },

    /// Decode a rank badge
    Badge {
        badge: i64,

        /// Rank assets JSON
        #[arg(long)]
        ranks: PathBuf,
    },

    /// Percentile of a value against a community metric table
    Percentile {
        #[arg(long, allow_hyphen_values = true)]
        value: f64,

        /// JSON object of metric name -> summary
        #[arg(long)]
        community: PathBuf,

        #[arg(long)]
        metric: String,

        #[arg(long)]
        lower_is_better: bool,
    },

    /// Red/green colour for a value in a range
    Color {
        #[arg(long, allow_hyphen_values = true)]
        value: f64,

        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        #[arg(long, allow_hyphen_values = true)]
        max: f64,

        #[arg(long)]
        inverted: bool,
    },

    /// Player positions and kill feed at a replay time
    Replay {
        /// Match metadata JSON
        #[arg(long, required_unless_present = "match_id", conflicts_with = "match_id")]
        metadata: Option<PathBuf>,

        /// Fetch match metadata from the stats service instead
        #[arg(long)]
        match_id: Option<u64>,

        /// Playback time in sample intervals
        #[arg(long)]
        time: f64,
    },

    /// Play a replay back, printing positions as it advances
    Play {
        #[arg(long, required_unless_present = "match_id", conflicts_with = "match_id")]
        metadata: Option<PathBuf>,

        #[arg(long)]
        match_id: Option<u64>,

        /// -10..=10
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        speed: i32,

        /// Start time in sample intervals
        #[arg(long, default_value = "0")]
        start: f64,

        /// Stop after this many wall-clock seconds
        #[arg(long, default_value = "10")]
        seconds: u64,
    },

    /// Build a player dashboard from the remote services
    Dashboard {
        #[arg(long)]
        account: u32,

        #[arg(long)]
        window: Option<TimeWindow>,

        /// Rank badge to decode
        #[arg(long)]
        badge: Option<i64>,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn load_records(path: &Path, window: TimeWindow, now: i64) -> Result<Vec<MatchRecord>> {
    let history: Vec<MatchRecord> = read_json_file(path)
        .await
        .with_context(|| format!("Failed to read match history from {}", path.display()))?;
    let records = filter_window_at(&history, window.lookback_seconds(), now);
    tracing::info!(
        "{} of {} matches within window {}",
        records.len(),
        history.len(),
        window
    );
    Ok(records)
}

async fn load_replay(
    config: &AppConfig,
    metadata: Option<&Path>,
    match_id: Option<u64>,
) -> Result<MatchReplay> {
    match (metadata, match_id) {
        (Some(path), _) => read_json_file(path)
            .await
            .with_context(|| format!("Failed to read match metadata from {}", path.display())),
        (None, Some(match_id)) => {
            let client = ApiClient::new(config)?;
            client
                .match_replay(match_id)
                .await
                .with_context(|| format!("Failed to fetch metadata for match {}", match_id))
        }
        (None, None) => anyhow::bail!("Either --metadata or --match-id is required"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Invalid config {}", cli.config.display()))?;
    let log_level = cli.log_level.clone().unwrap_or(config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting hero-stats v{}", env!("CARGO_PKG_VERSION"));

    let now = chrono::Utc::now().timestamp();

    match cli.command {
        Commands::Summary {
            matches,
            window,
            now: at,
        } => {
            let window = window.unwrap_or(config.default_window);
            let records = load_records(&matches, window, at.unwrap_or(now)).await?;
            let summary = calculate::summarize(&records);

            println!("\n=== Summary ({}) ===", window);
            println!("Matches:        {}", summary.matches);
            println!(
                "Record:         {}W {}L ({}%)",
                summary.wins, summary.losses, summary.win_rate
            );
            println!(
                "KDA:            {}/{}/{} ({})",
                summary.kda.kills, summary.kda.deaths, summary.kda.assists, summary.kda.ratio
            );
            println!("Avg net worth:  {}", summary.average_net_worth);
            println!("Net worth/min:  {}", summary.net_worth_per_minute);
            println!("Avg duration:   {} min", summary.average_duration_minutes);
            println!("Avg last hits:  {}", summary.average_last_hits);
            println!("Avg denies:     {}", summary.average_denies);
            println!("Streak:         {}", summary.streak);
        }
        Commands::Heroes {
            matches,
            window,
            now: at,
            assets,
        } => {
            let window = window.unwrap_or(config.default_window);
            let records = load_records(&matches, window, at.unwrap_or(now)).await?;
            let heroes: Vec<HeroAsset> = match assets {
                Some(path) => read_json_file(&path).await?,
                None => Vec::new(),
            };

            let mut stats = calculate::hero_stats(&records);
            calculate::aggregate::sort_by_play_count(&mut stats);

            println!("\n=== Heroes ({}) ===", window);
            for hero in &stats {
                let name = calculate::find_hero(&heroes, hero.hero_id)
                    .map(|h| h.name.clone())
                    .unwrap_or_else(|| format!("#{}", hero.hero_id));
                println!(
                    "{:<16} {:>4} played  {:>3}% won  {}",
                    name,
                    hero.play_count,
                    hero.win_rate,
                    hero_stats::dashboard::win_rate_color(hero.win_rate)
                );
            }
        }
        Commands::Badge { badge, ranks } => {
            let ranks: Vec<RankAsset> = read_json_file(&ranks).await?;
            match decode_badge(Some(badge), &ranks) {
                Some(info) => {
                    println!(
                        "{} (tier {}, subtier {})",
                        info.display_name(),
                        info.tier,
                        info.subtier
                    );
                    if let Some(image) = info.image() {
                        println!("{}", image);
                    }
                }
                None => println!("Unranked"),
            }
        }
        Commands::Percentile {
            value,
            community,
            metric,
            lower_is_better,
        } => {
            let tables: std::collections::HashMap<String, MetricSample> =
                read_json_file(&community).await?;
            let table = tables
                .get(&metric)
                .with_context(|| format!("No community table for metric {}", metric))?;
            let percentile = percentile_rank(value, table, lower_is_better);
            println!(
                "{}: {:.1} percentile ({})",
                metric,
                percentile,
                scale_color(percentile, 0.0, 100.0)
            );
        }
        Commands::Color {
            value,
            min,
            max,
            inverted,
        } => {
            let color = if inverted {
                scale_color_inverted(value, min, max)
            } else {
                scale_color(value, min, max)
            };
            println!("{}", color);
        }
        Commands::Replay {
            metadata,
            match_id,
            time,
        } => {
            let replay = load_replay(&config, metadata.as_deref(), match_id).await?;
            print_json(&serde_json::json!({
                "time": time,
                "positions": positions_at(&replay, time),
                "kill_feed": kill_feed(&replay, time),
            }))?;
        }
        Commands::Play {
            metadata,
            match_id,
            speed,
            start,
            seconds,
        } => {
            let replay = load_replay(&config, metadata.as_deref(), match_id).await?;
            let mut controller = PlaybackController::new(replay.duration_s);
            controller.seek(start).await;
            controller.set_speed(speed).await;

            let deadline = tokio::time::Instant::now() + Duration::from_secs(seconds);
            let mut frames = tokio::time::interval(Duration::from_secs(1));
            loop {
                tokio::select! {
                    _ = frames.tick() => {
                        let state = controller.state().await;
                        let alive = positions_at(&replay, state.time).len();
                        let kills = kill_feed(&replay, state.time).len();
                        println!(
                            "t={:>7.2}  speed={:>3}  alive={:>2}  kills={}",
                            state.time, state.speed, alive, kills
                        );
                        if state.speed == 0 || tokio::time::Instant::now() >= deadline {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted");
                        break;
                    }
                }
            }
            controller.stop().await;
        }
        Commands::Dashboard {
            account,
            window,
            badge,
        } => {
            let selection =
                Selection::new(Some(account), window.unwrap_or(config.default_window));
            let client = ApiClient::new(&config)?;
            let source: &dyn StatsSource = &client;
            let dashboard = build_dashboard(source, &selection, badge, now).await?;
            print_json(&dashboard)?;
        }
    }

    Ok(())
}
