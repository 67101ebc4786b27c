//! Minimap replay: player positions and kill feed at a playback time.
//!
//! Path samples are indexed by playback time `t`, so `t = 12.5` sits
//! halfway between the 13th and 14th samples of every path. The kill feed
//! compares the same `t` directly against death times in game seconds.

use tracing::debug;

use crate::models::{KillEvent, MatchReplay, PlayerPathSample, ReplayPosition};

/// Samples at or below this value are treated as not yet populated.
pub const SAMPLE_SENTINEL: f64 = 0.01;

/// Horizontal correction applied before normalizing against the arena box,
/// aligning positions with the minimap artwork.
pub const MINIMAP_X_OFFSET: f64 = -2300.0;

/// Union of every path's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ArenaBounds {
    pub fn from_paths(paths: &[PlayerPathSample]) -> Option<Self> {
        let first = paths.first()?;
        let init = ArenaBounds {
            x_min: first.x_min,
            x_max: first.x_max,
            y_min: first.y_min,
            y_max: first.y_max,
        };

        Some(paths.iter().skip(1).fold(init, |b, p| ArenaBounds {
            x_min: b.x_min.min(p.x_min),
            x_max: b.x_max.max(p.x_max),
            y_min: b.y_min.min(p.y_min),
            y_max: b.y_max.max(p.y_max),
        }))
    }

    /// Normalize an absolute arena coordinate to 0.0..=1.0. A degenerate
    /// axis maps to 0.0.
    pub fn normalize(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            unit(world_x + MINIMAP_X_OFFSET, self.x_min, self.x_max),
            unit(world_y, self.y_min, self.y_max),
        )
    }
}

fn unit(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Linear interpolation between the samples bracketing `t`.
///
/// If either bracketing sample is missing or at/below [`SAMPLE_SENTINEL`],
/// the result is exactly 0.
pub fn sample_at(samples: &[f64], t: f64) -> f64 {
    let t = t.max(0.0);
    let lower = t.floor();
    let fraction = t - lower;

    let a = samples.get(lower as usize).copied().unwrap_or(0.0);
    let b = samples.get(t.ceil() as usize).copied().unwrap_or(0.0);

    if a <= SAMPLE_SENTINEL || b <= SAMPLE_SENTINEL {
        return 0.0;
    }
    a + (b - a) * fraction
}

/// Map a sampled coordinate from source resolution into the path's own box.
fn to_world(raw: f64, resolution: u32, min: f64, max: f64) -> f64 {
    if resolution == 0 {
        return min;
    }
    min + raw / resolution as f64 * (max - min)
}

/// Positions of every living player at `t`.
pub fn positions_at(replay: &MatchReplay, t: f64) -> Vec<ReplayPosition> {
    let paths = &replay.match_paths;
    let Some(bounds) = ArenaBounds::from_paths(&paths.paths) else {
        return Vec::new();
    };

    paths
        .paths
        .iter()
        .filter_map(|path| {
            let health = sample_at(&path.health, t);
            if health <= 0.0 {
                return None;
            }

            let raw_x = sample_at(&path.x_pos, t);
            let raw_y = sample_at(&path.y_pos, t);
            let world_x = to_world(raw_x, paths.x_resolution, path.x_min, path.x_max);
            let world_y = to_world(raw_y, paths.y_resolution, path.y_min, path.y_max);
            let (x, y) = bounds.normalize(world_x, world_y);

            let player = replay.player_by_slot(path.player_slot);
            Some(ReplayPosition {
                player_slot: path.player_slot,
                account_id: player.map(|p| p.account_id),
                team: player.map(|p| p.team),
                x,
                y,
                health,
            })
        })
        .collect()
}

/// Every kill with `game_time_s <= t`, most recent first.
///
/// Deaths whose killer slot does not resolve to a player are dropped.
pub fn kill_feed(replay: &MatchReplay, t: f64) -> Vec<KillEvent> {
    let mut events: Vec<KillEvent> = replay
        .players
        .iter()
        .flat_map(|victim| {
            victim.death_details.iter().filter_map(move |death| {
                let Some(killer) = replay.player_by_slot(death.killer_player_slot) else {
                    debug!(
                        "Dropping death of slot {} with unknown killer slot {}",
                        victim.player_slot, death.killer_player_slot
                    );
                    return None;
                };
                Some(KillEvent {
                    game_time_s: death.game_time_s,
                    killer_slot: killer.player_slot,
                    victim_slot: victim.player_slot,
                    killer_account_id: killer.account_id,
                    victim_account_id: victim.account_id,
                    killer_is_team1: killer.team == 1,
                })
            })
        })
        .filter(|e| e.game_time_s <= t)
        .collect();

    events.sort_by(|a, b| b.game_time_s.total_cmp(&a.game_time_s));
    events
}
