//! Match metadata used by the minimap replay.

use serde::{Deserialize, Serialize};

/// A single death, recorded on the victim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathDetail {
    pub game_time_s: f64,
    pub killer_player_slot: u8,
}

/// A player in the match metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub account_id: u32,
    pub player_slot: u8,

    /// Team index (0 or 1)
    pub team: u8,

    pub hero_id: u32,

    #[serde(default)]
    pub death_details: Vec<DeathDetail>,
}

/// Sampled movement of one player.
///
/// `x_pos`/`y_pos` are in source resolution units (`0..x_resolution`), which
/// map onto this path's own bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPathSample {
    pub player_slot: u8,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_pos: Vec<f64>,
    pub y_pos: Vec<f64>,
    pub health: Vec<f64>,
}

/// Movement data for every player in a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPaths {
    /// Seconds between samples
    pub interval_s: f64,
    pub x_resolution: u32,
    pub y_resolution: u32,
    pub paths: Vec<PlayerPathSample>,
}

/// The parts of a match's metadata the replay needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReplay {
    pub match_id: u64,
    pub duration_s: u32,
    pub players: Vec<MatchPlayer>,
    pub match_paths: MatchPaths,
}

impl MatchReplay {
    pub fn player_by_slot(&self, slot: u8) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| p.player_slot == slot)
    }
}

/// Interpolated position of a live player, normalized to the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayPosition {
    pub player_slot: u8,
    pub account_id: Option<u32>,
    pub team: Option<u8>,

    /// 0.0 to 1.0 across the arena
    pub x: f64,
    pub y: f64,

    pub health: f64,
}

/// A kill derived from death details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub game_time_s: f64,
    pub killer_slot: u8,
    pub victim_slot: u8,
    pub killer_account_id: u32,
    pub victim_account_id: u32,
    pub killer_is_team1: bool,
}
