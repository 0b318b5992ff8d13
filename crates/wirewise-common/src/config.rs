//! ---
//! ww_section: "01-shared-runtime"
//! ww_subsection: "module"
//! ww_type: "source"
//! ww_scope: "code"
//! ww_description: "Shared primitives and utilities for the service runtime."
//! ww_version: "v0.1.0"
//! ww_owner: "tbd"
//! ---
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_api_enabled() -> bool {
    true
}

fn default_api_listen() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default api address")
}

fn default_market_enabled() -> bool {
    true
}

fn default_feed_url() -> String {
    "http://hq.sinajs.cn/list=shfe_cu0".to_owned()
}

fn default_rate_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/USD".to_owned()
}

fn default_refresh_interval() -> Duration {
    Duration::from_secs(300)
}

fn default_fallback_rate() -> f64 {
    7.25
}

/// Primary configuration object for the WireWise service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "WIREWISE_CONFIG";

    /// Load configuration from disk, respecting the `WIREWISE_CONFIG`
    /// override. Every section has sane defaults, so a missing file falls
    /// back to `AppConfig::default()` rather than refusing to start.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(path.clone())?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(path.clone())?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using built-in defaults");
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    fn from_path(path: PathBuf) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.market.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

/// The Prometheus registry is scraped through the API router, so there is
/// no separate listener to configure here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_enabled")]
    pub enabled: bool,
    #[serde(default = "default_api_listen")]
    pub listen: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: default_api_enabled(),
            listen: default_api_listen(),
        }
    }
}

/// Copper market quote feed. A single fetch attempt per refresh; anything
/// that fails falls back to a simulated quote.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_market_enabled")]
    pub enabled: bool,
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_rate_url")]
    pub rate_url: String,
    #[serde(default = "default_refresh_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub refresh_interval: Duration,
    /// USD/CNY rate used when the rate endpoint is unreachable.
    #[serde(default = "default_fallback_rate")]
    pub fallback_usd_cny: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            enabled: default_market_enabled(),
            feed_url: default_feed_url(),
            rate_url: default_rate_url(),
            refresh_interval: default_refresh_interval(),
            fallback_usd_cny: default_fallback_rate(),
        }
    }
}

impl MarketConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if self.feed_url.trim().is_empty() {
                return Err(anyhow!("market feed_url must not be empty when enabled"));
            }
            if !(self.fallback_usd_cny > 0.0) {
                return Err(anyhow!(
                    "market fallback_usd_cny must be positive, got {}",
                    self.fallback_usd_cny
                ));
            }
            if self.refresh_interval < Duration::from_secs(1) {
                return Err(anyhow!("market refresh_interval must be at least 1 second"));
            }
        }
        Ok(())
    }
}

/// Optional catalog file overriding the built-in seed tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if !path.is_file() {
                return Err(anyhow!(
                    "catalog path {} does not exist or is not a file",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = "".parse().unwrap();
        assert!(config.api.enabled);
        assert_eq!(config.api.listen.port(), 8080);
        assert_eq!(config.market.refresh_interval, Duration::from_secs(300));
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn sections_override_individually() {
        let config: AppConfig = r#"
[api]
listen = "127.0.0.1:9000"

[market]
enabled = false

[logging]
format = "pretty"
"#
        .parse()
        .unwrap();
        assert_eq!(config.api.listen.port(), 9000);
        assert!(!config.market.enabled);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn invalid_market_section_is_rejected() {
        let result = r#"
[market]
feed_url = ""
"#
        .parse::<AppConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        let loaded = AppConfig::load_with_source(&["definitely/not/here.toml"]).unwrap();
        assert!(loaded.source.is_none());
    }

    #[test]
    fn file_candidate_wins_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nlisten = \"127.0.0.1:1234\"").unwrap();
        let loaded = AppConfig::load_with_source(&[file.path()]).unwrap();
        assert_eq!(loaded.config.api.listen.port(), 1234);
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
    }
}
