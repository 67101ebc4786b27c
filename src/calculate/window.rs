//! Lookback windows over match history.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::MatchRecord;
use crate::parse_duration;

const DAY: i64 = 24 * 3600;

/// Time range selected for aggregation. Serializes with the same names the
/// CLI accepts ("7d", "all", "12h", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeWindow {
    Week,
    #[default]
    Month,
    Quarter,
    AllTime,
    Custom(i64),
}

impl TimeWindow {
    /// Lookback in seconds, `None` for all time.
    pub fn lookback_seconds(&self) -> Option<i64> {
        match self {
            TimeWindow::Week => Some(7 * DAY),
            TimeWindow::Month => Some(30 * DAY),
            TimeWindow::Quarter => Some(90 * DAY),
            TimeWindow::AllTime => None,
            TimeWindow::Custom(secs) => Some(*secs),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Week => write!(f, "7d"),
            TimeWindow::Month => write!(f, "30d"),
            TimeWindow::Quarter => write!(f, "90d"),
            TimeWindow::AllTime => write!(f, "all"),
            TimeWindow::Custom(secs) => write!(f, "{}s", secs),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" | "week" => Ok(TimeWindow::Week),
            "30d" | "month" => Ok(TimeWindow::Month),
            "90d" | "quarter" => Ok(TimeWindow::Quarter),
            "all" | "all-time" | "alltime" => Ok(TimeWindow::AllTime),
            other => parse_duration(other)
                .and_then(|d| i64::try_from(d.as_secs()).ok())
                .map(TimeWindow::Custom)
                .ok_or_else(|| format!("invalid time window: {}", s)),
        }
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeWindow> for String {
    fn from(window: TimeWindow) -> Self {
        window.to_string()
    }
}

/// Keep records whose start time is within `lookback_seconds` of `now_unix`.
/// `None` keeps everything.
pub fn filter_window_at(
    records: &[MatchRecord],
    lookback_seconds: Option<i64>,
    now_unix: i64,
) -> Vec<MatchRecord> {
    match lookback_seconds {
        None => records.to_vec(),
        Some(lookback) => {
            let cutoff = now_unix.saturating_sub(lookback);
            records
                .iter()
                .filter(|r| r.start_time >= cutoff)
                .cloned()
                .collect()
        }
    }
}

/// [`filter_window_at`] against the current wall clock.
pub fn filter_window(records: &[MatchRecord], lookback_seconds: Option<i64>) -> Vec<MatchRecord> {
    filter_window_at(records, lookback_seconds, Utc::now().timestamp())
}
