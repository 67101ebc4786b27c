//! Statistics calculation engine.
//!
//! Pure functions deriving view data from already-fetched API records:
//! - Lookback window filtering
//! - Win rate, KDA and per-hero aggregation
//! - Rank badge decoding
//! - Percentile interpolation against community tables
//! - Red/green colour scaling
//! - Minimap replay interpolation and kill feed

pub mod aggregate;
pub mod badge;
pub mod color;
pub mod percentile;
pub mod replay;
pub mod window;

pub use aggregate::{
    average_duration_minutes, average_net_worth, hero_stats, kda, summarize, win_rate,
};
pub use badge::{decode_badge, find_hero};
pub use color::{scale_color, scale_color_inverted, Rgb};
pub use percentile::{percentile_rank, percentile_report};
pub use replay::{kill_feed, positions_at, ArenaBounds};
pub use window::{filter_window, filter_window_at, TimeWindow};
