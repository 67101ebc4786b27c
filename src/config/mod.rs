//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::calculate::TimeWindow;

/// Minimum staleness tolerance for static asset data.
pub const MIN_ASSET_TTL_SECONDS: u64 = 3600;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Gameplay stats service
    #[serde(default = "default_stats_base_url")]
    pub stats_base_url: String,

    /// Static assets service (heroes, ranks)
    #[serde(default = "default_assets_base_url")]
    pub assets_base_url: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// How long hero/rank assets stay fresh
    #[serde(default = "default_assets_ttl")]
    pub assets_cache_ttl_seconds: u64,

    /// How long match history and metrics stay fresh
    #[serde(default = "default_history_ttl")]
    pub history_cache_ttl_seconds: u64,
}

fn default_stats_base_url() -> String {
    "https://api.deadlock-api.com".to_string()
}

fn default_assets_base_url() -> String {
    "https://assets.deadlock-api.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_assets_ttl() -> u64 {
    MIN_ASSET_TTL_SECONDS
}

fn default_history_ttl() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            stats_base_url: default_stats_base_url(),
            assets_base_url: default_assets_base_url(),
            timeout_seconds: default_timeout(),
            assets_cache_ttl_seconds: default_assets_ttl(),
            history_cache_ttl_seconds: default_history_ttl(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where cached API responses are kept
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub default_window: TimeWindow,

    #[serde(default)]
    pub api: ApiConfig,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            log_level: default_log_level(),
            default_window: TimeWindow::default(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if self.api.assets_cache_ttl_seconds < MIN_ASSET_TTL_SECONDS {
            return Err(ConfigError::ValidationError(format!(
                "Asset cache TTL must be at least {} seconds",
                MIN_ASSET_TTL_SECONDS
            )));
        }

        for (name, value) in [
            ("stats_base_url", &self.api.stats_base_url),
            ("assets_base_url", &self.api.assets_base_url),
        ] {
            Url::parse(value).map_err(|e| {
                ConfigError::ValidationError(format!("Invalid {}: {}", name, e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.cache_dir, PathBuf::from("./cache"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_window, TimeWindow::Month);
        assert_eq!(config.api.assets_cache_ttl_seconds, 3600);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_short_asset_ttl() {
        let mut config = AppConfig::default();
        config.api.assets_cache_ttl_seconds = 600;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = AppConfig::default();
        config.api.stats_base_url = "not a url".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stats_base_url"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.cache_dir, parsed.cache_dir);
        assert_eq!(config.default_window, parsed.default_window);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"
default_window = "week"

[api]
assets_cache_ttl_seconds = 7200
"#
        )
        .unwrap();

        let config = AppConfig::from_file(&file.path().to_path_buf()).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_window, TimeWindow::Week);
        assert_eq!(config.api.assets_cache_ttl_seconds, 7200);
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_default_window_accepts_cli_names() {
        let config: AppConfig = toml::from_str(r#"default_window = "7d""#).unwrap();
        assert_eq!(config.default_window, TimeWindow::Week);

        let config: AppConfig = toml::from_str(r#"default_window = "2w""#).unwrap();
        assert_eq!(config.default_window, TimeWindow::Custom(1_209_600));

        assert!(toml::from_str::<AppConfig>(r#"default_window = "soon""#).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }
}
