//! HTTP fetching with caching.
//!
//! Fetches JSON from the stats and assets services and caches responses on
//! disk. Each request carries its own freshness window: static assets are
//! kept for at least an hour, match history for much less.

mod source;

pub use source::{ApiClient, StatsSource};

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Content too large: {size} bytes (max {max_size})")]
    ContentTooLarge { size: usize, max_size: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

/// Metadata stored alongside cached content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub content_length: usize,
    pub etag: Option<String>,
}

impl CacheMetadata {
    /// Whether an entry fetched at `fetched_at` is still within `ttl` at `now`.
    pub fn is_fresh_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.fetched_at);
        age.num_seconds() <= i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Directory to cache responses
    pub cache_dir: PathBuf,

    /// Maximum response size (default 20MB)
    pub max_content_size: usize,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./cache"),
            max_content_size: 20 * 1024 * 1024,
            timeout: Duration::from_secs(30),
            user_agent: format!("hero-stats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP JSON fetcher with local caching.
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("hero-stats")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and decode JSON, serving from cache while younger than `ttl`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        ttl: Duration,
    ) -> Result<T, FetchError> {
        let cache_path = self.cache_path_for_url(url);
        let meta_path = self.meta_path_for_url(url);

        let body = match self.read_cache(url, &cache_path, &meta_path, ttl).await? {
            Some(body) => body,
            None => self.fetch_and_cache(url, &cache_path, &meta_path).await?,
        };

        Ok(serde_json::from_str(&body)?)
    }

    /// Return cached content if present and fresh.
    async fn read_cache(
        &self,
        url: &Url,
        cache_path: &Path,
        meta_path: &Path,
        ttl: Duration,
    ) -> Result<Option<String>, FetchError> {
        if !cache_path.exists() || !meta_path.exists() {
            return Ok(None);
        }

        let meta_content = fs::read_to_string(meta_path).await?;
        let meta: CacheMetadata = match serde_json::from_str(&meta_content) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        };

        if !meta.is_fresh_at(ttl, Utc::now()) {
            debug!("Cache expired for {}", url);
            return Ok(None);
        }

        debug!("Serving {} from cache", url);
        Ok(Some(fs::read_to_string(cache_path).await?))
    }

    /// Fetch from network and cache the result.
    async fn fetch_and_cache(
        &self,
        url: &Url,
        cache_path: &Path,
        meta_path: &Path,
    ) -> Result<String, FetchError> {
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await?;

        if body.len() > self.config.max_content_size {
            return Err(FetchError::ContentTooLarge {
                size: body.len(),
                max_size: self.config.max_content_size,
            });
        }

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(cache_path, &body).await?;

        let meta = CacheMetadata {
            url: url.to_string(),
            fetched_at: Utc::now(),
            content_length: body.len(),
            etag,
        };
        fs::write(meta_path, serde_json::to_string_pretty(&meta)?).await?;

        Ok(body)
    }

    /// Generate a cache path for a URL.
    fn cache_path_for_url(&self, url: &Url) -> PathBuf {
        let hash = Self::url_hash(url);
        let host = url.host_str().unwrap_or("unknown");

        self.config
            .cache_dir
            .join(host)
            .join(format!("{}.json", hash))
    }

    /// Generate a metadata path for a URL.
    fn meta_path_for_url(&self, url: &Url) -> PathBuf {
        let hash = Self::url_hash(url);
        let host = url.host_str().unwrap_or("unknown");

        self.config
            .cache_dir
            .join(host)
            .join(format!("{}.meta.json", hash))
    }

    /// Hash a URL to a short string.
    fn url_hash(url: &Url) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..8])
    }
}

/// Read a JSON document from disk (exported API responses, fixtures).
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, FetchError> {
    let contents = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}
