//! # Hero Stats
//!
//! Derived statistics for a multiplayer game's match history.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, assets, metrics, replay data)
//! - **calculate**: Pure aggregation, badge, percentile, colour and replay math
//! - **playback**: Replay playback timer
//! - **state**: Selected player and time window
//! - **fetch**: Cached HTTP access to the stats and assets services
//! - **dashboard**: View model assembly on top of the above
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod models;
pub mod playback;
pub mod state;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "2w", "30d", "6h", "90s").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('w') {
        (n, 7 * 86400)
    } else if let Some(n) = s.strip_suffix('d') {
        (n, 86400)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    Some(Duration::from_secs(num.checked_mul(multiplier)?))
}
