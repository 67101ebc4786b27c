//! Match history records as returned by the stats API.

use serde::{Deserialize, Serialize};

/// One player's participation in one completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: u64,

    pub account_id: u32,

    pub hero_id: u32,

    /// Match start, unix seconds
    pub start_time: i64,

    #[serde(rename = "match_duration_s")]
    pub duration_seconds: u32,

    /// Team the subject played on (0 or 1)
    pub player_team: u8,

    /// Winning team (0 or 1)
    pub match_result: u8,

    #[serde(rename = "player_kills")]
    pub kills: u32,

    #[serde(rename = "player_deaths")]
    pub deaths: u32,

    #[serde(rename = "player_assists")]
    pub assists: u32,

    pub net_worth: u32,

    #[serde(default)]
    pub last_hits: u32,

    #[serde(default)]
    pub denies: u32,
}

impl MatchRecord {
    /// True when the subject's team won the match.
    pub fn is_win(&self) -> bool {
        self.player_team == self.match_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player_team: u8, match_result: u8) -> MatchRecord {
        MatchRecord {
            match_id: 1,
            account_id: 42,
            hero_id: 7,
            start_time: 1_700_000_000,
            duration_seconds: 1800,
            player_team,
            match_result,
            kills: 5,
            deaths: 3,
            assists: 9,
            net_worth: 30_000,
            last_hits: 150,
            denies: 12,
        }
    }

    #[test]
    fn test_is_win() {
        assert!(record(0, 0).is_win());
        assert!(record(1, 1).is_win());
        assert!(!record(1, 0).is_win());
        assert!(!record(0, 1).is_win());
    }

    #[test]
    fn test_deserialize_api_field_names() {
        let json = r#"{
            "match_id": 31000000,
            "account_id": 42,
            "hero_id": 7,
            "start_time": 1700000000,
            "match_duration_s": 1800,
            "player_team": 1,
            "match_result": 1,
            "player_kills": 5,
            "player_deaths": 3,
            "player_assists": 9,
            "net_worth": 30000
        }"#;

        let parsed: MatchRecord = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.duration_seconds, 1800);
        assert_eq!(parsed.kills, 5);
        assert_eq!(parsed.last_hits, 0); // absent fields default
        assert!(parsed.is_win());
    }

    #[test]
    fn test_serialization_uses_api_names() {
        let json = serde_json::to_string(&record(0, 0)).unwrap();
        assert!(json.contains("\"match_duration_s\":1800"));
        assert!(json.contains("\"player_assists\":9"));
    }
}
