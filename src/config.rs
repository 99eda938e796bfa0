//! Scraper configuration.
//!
//! Settings come from an optional YAML file; every field has a default, so
//! an empty file (or no file) is valid. CLI flags override the file.
//!
//! ```yaml
//! mode: live
//! timeout_secs: 15
//! max_attempts: 3
//! base_delay_secs: 1.0
//! status_retry_total: 3
//! status_backoff_secs: 1.0
//! ```

use crate::error::ConfigError;
use crate::transport::StatusRetry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Where articles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Synthetic feeds, no network traffic.
    #[default]
    Mock,
    /// Fetch and parse the real sites.
    Live,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub mode: FetchMode,
    pub timeout_secs: u64,
    /// Attempts made by the outer backoff loop.
    pub max_attempts: u32,
    pub base_delay_secs: f64,
    /// Requests made per attempt when the server answers a transient status.
    pub status_retry_total: u32,
    pub status_backoff_secs: f64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            mode: FetchMode::Mock,
            timeout_secs: 10,
            max_attempts: 3,
            base_delay_secs: 1.0,
            status_retry_total: 3,
            status_backoff_secs: 1.0,
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_delay(&self) -> Duration {
        secs_f64(self.base_delay_secs)
    }

    pub fn status_retry(&self) -> StatusRetry {
        StatusRetry {
            total: self.status_retry_total,
            backoff_factor: secs_f64(self.status_backoff_secs),
        }
    }
}

/// Negative or non-finite values collapse to zero.
fn secs_f64(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

/// Load configuration from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config(path: impl AsRef<Path>) -> Result<ScraperConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    let config = parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })?;
    info!(mode = ?config.mode, timeout_secs = config.timeout_secs, "Loaded configuration");
    Ok(config)
}

fn parse_config(raw: &str) -> Result<ScraperConfig, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(ScraperConfig::default());
    }
    serde_yaml::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.mode, FetchMode::Mock);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.base_delay(), Duration::from_secs(1));
        assert_eq!(config.status_retry().total, 3);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = parse_config("mode: live\ntimeout_secs: 30\n").unwrap();
        assert_eq!(config.mode, FetchMode::Live);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(parse_config("  \n").unwrap(), ScraperConfig::default());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(parse_config("mode: turbo").is_err());
    }

    #[test]
    fn test_negative_delay_is_zero() {
        let config = ScraperConfig {
            base_delay_secs: -2.0,
            ..ScraperConfig::default()
        };
        assert_eq!(config.base_delay(), Duration::ZERO);
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("news_scrapers_cfg_{}.yaml", std::process::id()));
        std::fs::write(&path, "max_attempts: 5\nstatus_backoff_secs: 0.5\n").unwrap();

        let config = load_config(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.status_retry().backoff_factor, Duration::from_millis(500));
    }
}
