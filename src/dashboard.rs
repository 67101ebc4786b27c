//! Player dashboard assembly.
//!
//! Pulls match history, metrics and assets from a [`StatsSource`] and runs
//! them through the calculation engine into a colour-annotated view model.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::calculate::{
    aggregate, decode_badge, filter_window_at, find_hero, hero_stats, percentile_report,
    scale_color, Rgb, TimeWindow,
};
use crate::fetch::{FetchError, StatsSource};
use crate::models::{HeroAggregate, MatchSummary, MetricPercentile};
use crate::state::Selection;

/// Win rates are coloured from red at this value...
pub const WIN_RATE_COLOR_MIN: f64 = 40.0;
/// ...to green at this one.
pub const WIN_RATE_COLOR_MAX: f64 = 60.0;

/// Metrics where a smaller value ranks higher.
pub const LOWER_IS_BETTER_METRICS: &[&str] =
    &["deaths", "deaths_per_min", "damage_taken_per_min"];

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No player selected")]
    NoAccount,

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroRow {
    /// Hero name from assets, `None` when the id is unknown
    pub name: Option<String>,
    #[serde(flatten)]
    pub stats: HeroAggregate,
    pub win_rate_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankView {
    pub name: String,
    pub tier: u32,
    pub subtier: u8,
    pub image: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentileRow {
    #[serde(flatten)]
    pub metric: MetricPercentile,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub account_id: u32,
    pub window: TimeWindow,
    pub summary: MatchSummary,
    pub win_rate_color: String,
    pub heroes: Vec<HeroRow>,

    /// `None` renders as unranked
    pub rank: Option<RankView>,

    pub percentiles: Vec<PercentileRow>,
}

pub fn win_rate_color(win_rate: u32) -> Rgb {
    scale_color(win_rate as f64, WIN_RATE_COLOR_MIN, WIN_RATE_COLOR_MAX)
}

/// Build the dashboard for the selected player at `now_unix`.
pub async fn build_dashboard(
    source: &dyn StatsSource,
    selection: &Selection,
    badge: Option<i64>,
    now_unix: i64,
) -> Result<Dashboard, DashboardError> {
    let account_id = selection.account_id().ok_or(DashboardError::NoAccount)?;
    let window = selection.window();

    let history = source.match_history(account_id).await?;
    let records = filter_window_at(&history, window.lookback_seconds(), now_unix);
    info!(
        "Building dashboard for {} ({} of {} matches in {})",
        account_id,
        records.len(),
        history.len(),
        window
    );

    let summary = aggregate::summarize(&records);

    let hero_assets = source.heroes().await.unwrap_or_else(|e| {
        warn!("Hero assets unavailable: {}", e);
        Vec::new()
    });

    let mut aggregates = hero_stats(&records);
    aggregate::sort_by_play_count(&mut aggregates);
    let heroes = aggregates
        .into_iter()
        .map(|stats| HeroRow {
            name: find_hero(&hero_assets, stats.hero_id).map(|h| h.name.clone()),
            win_rate_color: win_rate_color(stats.win_rate).to_string(),
            stats,
        })
        .collect();

    let ranks = source.ranks().await.unwrap_or_else(|e| {
        warn!("Rank assets unavailable: {}", e);
        Vec::new()
    });
    let rank = decode_badge(badge, &ranks).map(|info| RankView {
        name: info.display_name(),
        tier: info.tier,
        subtier: info.subtier,
        image: info.image().map(str::to_string),
        color: info.rank.color.clone(),
    });

    let percentiles = match (
        source.player_metrics(account_id).await,
        source.community_metrics().await,
    ) {
        (Ok(player), Ok(community)) => {
            percentile_report(&player, &community, LOWER_IS_BETTER_METRICS)
                .into_iter()
                .map(|metric| PercentileRow {
                    color: scale_color(metric.percentile, 0.0, 100.0).to_string(),
                    metric,
                })
                .collect()
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Metrics unavailable: {}", e);
            Vec::new()
        }
    };

    Ok(Dashboard {
        account_id,
        window,
        win_rate_color: win_rate_color(summary.win_rate).to_string(),
        summary,
        heroes,
        rank,
        percentiles,
    })
}
