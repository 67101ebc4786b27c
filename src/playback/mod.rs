//! Replay playback controller.
//!
//! Playback time advances by `1 / SMOOTHING_FACTOR` sample intervals per tick,
//! forwards or backwards depending on the sign of the speed, with ticks every
//! `1000 / (SMOOTHING_FACTOR * |speed|)` milliseconds. A controller owns at
//! most one tick task; changing speed, stopping, or dropping the controller
//! aborts it.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

pub const SMOOTHING_FACTOR: f64 = 3.0;

/// Fastest playback in either direction.
pub const MAX_SPEED: i32 = 10;

/// Result of advancing playback by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub time: f64,
    pub paused: bool,
}

/// Advance `time` one tick at `speed`, clamped to `[0, duration]`. Reaching
/// the bound in the direction of travel pauses.
pub fn step(time: f64, speed: i32, duration: f64) -> Step {
    if speed == 0 {
        return Step { time, paused: true };
    }

    let next = (time + speed.signum() as f64 / SMOOTHING_FACTOR).clamp(0.0, duration);
    let paused = (speed > 0 && next >= duration) || (speed < 0 && next <= 0.0);

    Step { time: next, paused }
}

/// Wall-clock interval between ticks, `None` when paused.
pub fn tick_period(speed: i32) -> Option<Duration> {
    if speed == 0 {
        return None;
    }
    let ticks_per_second = SMOOTHING_FACTOR * speed.unsigned_abs() as f64;
    Some(Duration::from_secs_f64(1.0 / ticks_per_second))
}

/// Snapshot of the playback position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub time: f64,

    /// -10..=10, 0 is paused
    pub speed: i32,
}

/// Drives playback time for one replay view.
pub struct PlaybackController {
    duration: f64,
    state: Arc<RwLock<PlaybackState>>,
    ticker: Option<JoinHandle<()>>,
}

impl PlaybackController {
    pub fn new(duration_s: u32) -> Self {
        Self {
            duration: duration_s as f64,
            state: Arc::new(RwLock::new(PlaybackState::default())),
            ticker: None,
        }
    }

    pub async fn state(&self) -> PlaybackState {
        *self.state.read().await
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether a tick task is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Change speed, replacing any running tick task. Must be called from
    /// within a tokio runtime.
    pub async fn set_speed(&mut self, speed: i32) {
        self.cancel_ticker();

        let speed = speed.clamp(-MAX_SPEED, MAX_SPEED);
        self.state.write().await.speed = speed;

        let Some(period) = tick_period(speed) else {
            debug!("Playback paused");
            return;
        };

        info!("Playback speed {} (tick every {:?})", speed, period);

        let state = Arc::clone(&self.state);
        let duration = self.duration;
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;

                let mut current = state.write().await;
                let next = step(current.time, speed, duration);
                current.time = next.time;

                if next.paused {
                    current.speed = 0;
                    debug!("Playback reached {:.2}, pausing", next.time);
                    break;
                }
            }
        }));
    }

    /// Pause and cancel the tick task.
    pub async fn stop(&mut self) {
        self.cancel_ticker();
        self.state.write().await.speed = 0;
    }

    /// Jump to `time`, clamped to the match duration. Speed is unchanged.
    pub async fn seek(&mut self, time: f64) {
        self.state.write().await.time = time.clamp(0.0, self.duration);
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_step_forward_and_back() {
        let forward = step(3.0, 4, 100.0);
        assert!(close(forward.time, 3.0 + 1.0 / 3.0));
        assert!(!forward.paused);

        let back = step(3.0, -1, 100.0);
        assert!(close(back.time, 3.0 - 1.0 / 3.0));
        assert!(!back.paused);
    }

    #[test]
    fn test_step_pauses_at_bounds() {
        let end = step(99.9, 2, 100.0);
        assert_eq!(end, Step { time: 100.0, paused: true });

        let start = step(0.1, -5, 100.0);
        assert_eq!(start, Step { time: 0.0, paused: true });

        // rewinding away from the end is fine
        assert!(!step(100.0, -1, 100.0).paused);
    }

    #[test]
    fn test_step_zero_speed() {
        assert_eq!(step(7.0, 0, 100.0), Step { time: 7.0, paused: true });
    }

    #[test]
    fn test_tick_period() {
        assert_eq!(tick_period(0), None);
        assert_eq!(tick_period(1), Some(Duration::from_secs_f64(1.0 / 3.0)));
        assert_eq!(tick_period(-10), Some(Duration::from_secs_f64(1.0 / 30.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_advances() {
        let mut controller = PlaybackController::new(600);
        controller.set_speed(1).await;

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let state = controller.state().await;
        assert!(close(state.time, 1.0), "time = {}", state.time);
        assert_eq!(state.speed, 1);
        assert!(controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_speed_replaces_ticker() {
        let mut controller = PlaybackController::new(600);
        controller.set_speed(1).await;
        controller.set_speed(1).await;

        tokio::time::sleep(Duration::from_millis(1100)).await;

        // a leftover ticker would have doubled the advance
        let state = controller.state().await;
        assert!(close(state.time, 1.0), "time = {}", state.time);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_is_clamped() {
        let mut controller = PlaybackController::new(600);
        controller.set_speed(25).await;
        assert_eq!(controller.state().await.speed, MAX_SPEED);

        controller.set_speed(-25).await;
        assert_eq!(controller.state().await.speed, -MAX_SPEED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_pause_at_end() {
        let mut controller = PlaybackController::new(2);
        controller.set_speed(10).await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        let state = controller.state().await;
        assert_eq!(state.time, 2.0);
        assert_eq!(state.speed, 0);
        assert!(!controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewind_pauses_at_start() {
        let mut controller = PlaybackController::new(60);
        controller.seek(1.0).await;
        controller.set_speed(-3).await;

        tokio::time::sleep(Duration::from_secs(1)).await;

        let state = controller.state().await;
        assert_eq!(state.time, 0.0);
        assert_eq!(state.speed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_time() {
        let mut controller = PlaybackController::new(600);
        controller.set_speed(2).await;
        tokio::time::sleep(Duration::from_millis(600)).await;

        controller.stop().await;
        let frozen = controller.state().await;
        assert!(!controller.is_ticking());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(controller.state().await, frozen);
        assert_eq!(frozen.speed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_clamps() {
        let mut controller = PlaybackController::new(100);
        controller.seek(250.0).await;
        assert_eq!(controller.state().await.time, 100.0);
        controller.seek(-4.0).await;
        assert_eq!(controller.state().await.time, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_bound_matches_kill_feed_clock() {
        use crate::calculate::kill_feed;
        use crate::models::{DeathDetail, MatchPaths, MatchPlayer, MatchReplay};

        let player = |slot: u8, team: u8, deaths: Vec<DeathDetail>| MatchPlayer {
            account_id: 100 + slot as u32,
            player_slot: slot,
            team,
            hero_id: 1,
            death_details: deaths,
        };
        let replay = MatchReplay {
            match_id: 1,
            duration_s: 600,
            players: vec![
                player(
                    0,
                    0,
                    vec![DeathDetail {
                        game_time_s: 590.0,
                        killer_player_slot: 6,
                    }],
                ),
                player(6, 1, vec![]),
            ],
            match_paths: MatchPaths {
                interval_s: 2.0,
                x_resolution: 100,
                y_resolution: 100,
                paths: vec![],
            },
        };

        let mut controller = PlaybackController::new(replay.duration_s);
        controller.seek(10_000.0).await;
        let end = controller.state().await.time;
        assert_eq!(end, 600.0);
        assert_eq!(kill_feed(&replay, end).len(), 1);

        controller.seek(589.0).await;
        assert!(kill_feed(&replay, controller.state().await.time).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticker() {
        let mut controller = PlaybackController::new(600);
        controller.set_speed(5).await;
        let state = Arc::clone(&controller.state);
        drop(controller);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(state.read().await.time, 0.0);
    }
}
