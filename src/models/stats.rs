//! Derived statistics models.

use serde::{Deserialize, Serialize};

/// Kill/death/assist totals with the derived ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KdaSummary {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,

    /// (kills + assists) / deaths rounded to 2 decimals, or kills + assists
    /// when there are no deaths
    pub ratio: f64,
}

/// Per-hero breakdown of a match history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroAggregate {
    pub hero_id: u32,

    /// Matches played on this hero (always > 0)
    pub play_count: u32,

    /// Matches won on this hero
    pub win_count: u32,

    /// Rounded percentage, 0 to 100
    pub win_rate: u32,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,

    pub average_net_worth: u64,
}

/// Current run of consecutive wins or losses, newest match first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub wins: bool,
    pub length: u32,
}

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.length == 0 {
            return write!(f, "-");
        }
        let kind = if self.wins { "W" } else { "L" };
        write!(f, "{}{}", self.length, kind)
    }
}

/// Everything the overview card shows for a match history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: u32,
    pub kda: KdaSummary,
    pub average_net_worth: u64,
    pub average_duration_minutes: f64,
    pub average_last_hits: u64,
    pub average_denies: u64,
    pub net_worth_per_minute: u64,
    pub streak: Streak,
}
