//! Match history aggregation: win rate, KDA, averages and per-hero breakdowns.

use std::collections::HashMap;

use crate::models::{HeroAggregate, KdaSummary, MatchRecord, MatchSummary, Streak};

/// Rounded percentage of `part` over `total`, 0 when `total` is 0.
pub fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (100.0 * part as f64 / total as f64).round() as u32
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn mean_rounded(total: u64, count: usize) -> u64 {
    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as u64
    }
}

pub fn win_count(records: &[MatchRecord]) -> u32 {
    records.iter().filter(|r| r.is_win()).count() as u32
}

/// Win rate as a rounded percentage, 0 for an empty history.
pub fn win_rate(records: &[MatchRecord]) -> u32 {
    percentage(win_count(records), records.len() as u32)
}

/// KDA ratio: (kills + assists) / deaths to 2 decimals, or kills + assists
/// when deaths is 0.
pub fn kda_ratio(kills: u32, deaths: u32, assists: u32) -> f64 {
    let takedowns = (kills + assists) as f64;
    if deaths == 0 {
        takedowns
    } else {
        round_to(takedowns / deaths as f64, 2)
    }
}

pub fn kda(records: &[MatchRecord]) -> KdaSummary {
    let (kills, deaths, assists) = records.iter().fold((0, 0, 0), |(k, d, a), r| {
        (k + r.kills, d + r.deaths, a + r.assists)
    });

    KdaSummary {
        kills,
        deaths,
        assists,
        ratio: kda_ratio(kills, deaths, assists),
    }
}

pub fn average_net_worth(records: &[MatchRecord]) -> u64 {
    let total: u64 = records.iter().map(|r| r.net_worth as u64).sum();
    mean_rounded(total, records.len())
}

/// Mean match length in minutes, 1 decimal.
pub fn average_duration_minutes(records: &[MatchRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: u64 = records.iter().map(|r| r.duration_seconds as u64).sum();
    let mean_seconds = total as f64 / records.len() as f64;
    round_to(mean_seconds / 60.0, 1)
}

pub fn average_last_hits(records: &[MatchRecord]) -> u64 {
    let total: u64 = records.iter().map(|r| r.last_hits as u64).sum();
    mean_rounded(total, records.len())
}

pub fn average_denies(records: &[MatchRecord]) -> u64 {
    let total: u64 = records.iter().map(|r| r.denies as u64).sum();
    mean_rounded(total, records.len())
}

/// Total net worth over total minutes played.
pub fn net_worth_per_minute(records: &[MatchRecord]) -> u64 {
    let seconds: u64 = records.iter().map(|r| r.duration_seconds as u64).sum();
    if seconds == 0 {
        return 0;
    }
    let net_worth: u64 = records.iter().map(|r| r.net_worth as u64).sum();
    (net_worth as f64 / (seconds as f64 / 60.0)).round() as u64
}

/// Run of identical results starting from the most recent match.
pub fn current_streak(records: &[MatchRecord]) -> Streak {
    let mut newest_first: Vec<&MatchRecord> = records.iter().collect();
    newest_first.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let Some(latest) = newest_first.first() else {
        return Streak::default();
    };

    let wins = latest.is_win();
    let length = newest_first
        .iter()
        .take_while(|r| r.is_win() == wins)
        .count() as u32;

    Streak { wins, length }
}

/// Per-hero breakdown in order of each hero's first appearance.
pub fn hero_stats(records: &[MatchRecord]) -> Vec<HeroAggregate> {
    let mut order: Vec<u32> = Vec::new();
    let mut groups: HashMap<u32, Vec<&MatchRecord>> = HashMap::new();

    for record in records {
        groups
            .entry(record.hero_id)
            .or_insert_with(|| {
                order.push(record.hero_id);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .filter_map(|hero_id| {
            let matches = groups.remove(&hero_id)?;
            let play_count = matches.len() as u32;
            let win_count = matches.iter().filter(|r| r.is_win()).count() as u32;
            let net_worth: u64 = matches.iter().map(|r| r.net_worth as u64).sum();

            Some(HeroAggregate {
                hero_id,
                play_count,
                win_count,
                win_rate: percentage(win_count, play_count),
                kills: matches.iter().map(|r| r.kills).sum(),
                deaths: matches.iter().map(|r| r.deaths).sum(),
                assists: matches.iter().map(|r| r.assists).sum(),
                average_net_worth: mean_rounded(net_worth, matches.len()),
            })
        })
        .collect()
}

/// Most played first; ties keep their original order.
pub fn sort_by_play_count(heroes: &mut [HeroAggregate]) {
    heroes.sort_by(|a, b| b.play_count.cmp(&a.play_count));
}

pub fn summarize(records: &[MatchRecord]) -> MatchSummary {
    let matches = records.len() as u32;
    let wins = win_count(records);

    MatchSummary {
        matches,
        wins,
        losses: matches - wins,
        win_rate: win_rate(records),
        kda: kda(records),
        average_net_worth: average_net_worth(records),
        average_duration_minutes: average_duration_minutes(records),
        average_last_hits: average_last_hits(records),
        average_denies: average_denies(records),
        net_worth_per_minute: net_worth_per_minute(records),
        streak: current_streak(records),
    }
}
