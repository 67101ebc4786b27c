//! Typed access to the stats and assets services.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{FetchError, Fetcher, FetcherConfig};
use crate::config::AppConfig;
use crate::models::{HeroAsset, MatchRecord, MatchReplay, MetricSample, RankAsset};

/// Everything the dashboard and replay views read from the remote services.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn match_history(&self, account_id: u32) -> Result<Vec<MatchRecord>, FetchError>;

    /// Metric summaries over one player's matches, keyed by metric name.
    async fn player_metrics(
        &self,
        account_id: u32,
    ) -> Result<HashMap<String, MetricSample>, FetchError>;

    /// Community-wide metric summaries, keyed by metric name.
    async fn community_metrics(&self) -> Result<HashMap<String, MetricSample>, FetchError>;

    async fn ranks(&self) -> Result<Vec<RankAsset>, FetchError>;

    async fn heroes(&self) -> Result<Vec<HeroAsset>, FetchError>;

    async fn match_replay(&self, match_id: u64) -> Result<MatchReplay, FetchError>;
}

/// [`StatsSource`] over HTTP.
pub struct ApiClient {
    fetcher: Fetcher,
    stats_base: Url,
    assets_base: Url,
    assets_ttl: Duration,
    history_ttl: Duration,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(FetcherConfig {
            cache_dir: config.cache_dir.clone(),
            timeout: Duration::from_secs(config.api.timeout_seconds),
            ..Default::default()
        })?;

        Ok(Self {
            fetcher,
            stats_base: Url::parse(&config.api.stats_base_url)?,
            assets_base: Url::parse(&config.api.assets_base_url)?,
            assets_ttl: Duration::from_secs(config.api.assets_cache_ttl_seconds),
            history_ttl: Duration::from_secs(config.api.history_cache_ttl_seconds),
        })
    }

    fn stats_url(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.stats_base.join(path)?)
    }

    fn assets_url(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.assets_base.join(path)?)
    }
}

#[async_trait]
impl StatsSource for ApiClient {
    async fn match_history(&self, account_id: u32) -> Result<Vec<MatchRecord>, FetchError> {
        let url = self.stats_url(&format!("/v1/players/{}/match-history", account_id))?;
        self.fetcher.fetch_json(&url, self.history_ttl).await
    }

    async fn player_metrics(
        &self,
        account_id: u32,
    ) -> Result<HashMap<String, MetricSample>, FetchError> {
        let mut url = self.stats_url("/v1/analytics/player-stats/metrics")?;
        url.query_pairs_mut()
            .append_pair("account_ids", &account_id.to_string());
        self.fetcher.fetch_json(&url, self.history_ttl).await
    }

    async fn community_metrics(&self) -> Result<HashMap<String, MetricSample>, FetchError> {
        let url = self.stats_url("/v1/analytics/player-stats/metrics")?;
        self.fetcher.fetch_json(&url, self.assets_ttl).await
    }

    async fn ranks(&self) -> Result<Vec<RankAsset>, FetchError> {
        let url = self.assets_url("/v2/ranks")?;
        self.fetcher.fetch_json(&url, self.assets_ttl).await
    }

    async fn heroes(&self) -> Result<Vec<HeroAsset>, FetchError> {
        let url = self.assets_url("/v2/heroes")?;
        self.fetcher.fetch_json(&url, self.assets_ttl).await
    }

    async fn match_replay(&self, match_id: u64) -> Result<MatchReplay, FetchError> {
        // finished matches never change
        let url = self.stats_url(&format!("/v1/matches/{}/metadata", match_id))?;
        self.fetcher.fetch_json(&url, Duration::MAX).await
    }
}
