use std::{env, time::Duration};

use thiserror::Error;

use eventhub_core::catalog::DEFAULT_PAGE_SIZE;

use crate::storage::StoreLocation;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to SQLite database file, or `:memory:` (default: "eventhub.db")
    pub db_path: String,
    /// Base URL of the remote catalog API (default: "http://localhost:3000")
    pub api_url: String,
    /// Remote request timeout in seconds (default: 45)
    pub remote_timeout_seconds: u64,
    /// Events per catalog page (default: 10)
    pub page_size: u32,
    /// Retention window for stale eviction in days (default: 7)
    pub retention_days: u32,
    /// Interval for background eviction in seconds (default: unset, startup only)
    pub eviction_interval_seconds: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EVENTHUB_DB_PATH` - SQLite database path (default: "eventhub.db")
    /// - `EVENTHUB_API_URL` - Remote catalog base URL (default: "http://localhost:3000")
    /// - `EVENTHUB_REMOTE_TIMEOUT_SECS` - Remote timeout in seconds (default: 45)
    /// - `EVENTHUB_PAGE_SIZE` - Catalog page size (default: 10)
    /// - `EVENTHUB_RETENTION_DAYS` - Stale eviction window in days (default: 7)
    /// - `EVENTHUB_EVICTION_INTERVAL_SECS` - Background eviction interval (default: unset)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_size: u32 = parse_or(&lookup, "EVENTHUB_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "EVENTHUB_PAGE_SIZE",
                value: page_size.to_string(),
            });
        }

        Ok(Self {
            db_path: lookup("EVENTHUB_DB_PATH").unwrap_or(defaults.db_path),
            api_url: lookup("EVENTHUB_API_URL").unwrap_or(defaults.api_url),
            remote_timeout_seconds: parse_or(
                &lookup,
                "EVENTHUB_REMOTE_TIMEOUT_SECS",
                defaults.remote_timeout_seconds,
            )?,
            page_size,
            retention_days: parse_or(&lookup, "EVENTHUB_RETENTION_DAYS", defaults.retention_days)?,
            eviction_interval_seconds: parse_optional(&lookup, "EVENTHUB_EVICTION_INTERVAL_SECS")?,
        })
    }

    /// Where the event store lives.
    pub fn store_location(&self) -> StoreLocation {
        StoreLocation::from_path(&self.db_path)
    }

    /// Get the remote timeout as a Duration.
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_seconds)
    }

    /// Get the retention window as a chrono Duration.
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }

    /// Background eviction interval, if enabled.
    pub fn eviction_interval(&self) -> Option<Duration> {
        self.eviction_interval_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "eventhub.db".to_string(),
            api_url: "http://localhost:3000".to_string(),
            remote_timeout_seconds: 45,
            page_size: DEFAULT_PAGE_SIZE,
            retention_days: 7,
            eviction_interval_seconds: None,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

fn parse_optional<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.db_path, "eventhub.db");
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.remote_timeout(), Duration::from_secs(45));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.retention(), chrono::Duration::days(7));
        assert_eq!(config.eviction_interval(), None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("EVENTHUB_DB_PATH", ":memory:"),
            ("EVENTHUB_API_URL", "https://api.example.com"),
            ("EVENTHUB_REMOTE_TIMEOUT_SECS", "5"),
            ("EVENTHUB_PAGE_SIZE", "25"),
            ("EVENTHUB_RETENTION_DAYS", "30"),
            ("EVENTHUB_EVICTION_INTERVAL_SECS", "3600"),
        ]))
        .unwrap();

        assert_eq!(config.store_location(), StoreLocation::Memory);
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.remote_timeout(), Duration::from_secs(5));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.retention(), chrono::Duration::days(30));
        assert_eq!(config.eviction_interval(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = Config::from_lookup(lookup(&[("EVENTHUB_RETENTION_DAYS", "a week")]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key: "EVENTHUB_RETENTION_DAYS",
                value: "a week".to_string(),
            })
        );
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = Config::from_lookup(lookup(&[("EVENTHUB_PAGE_SIZE", "0")]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "EVENTHUB_PAGE_SIZE", .. })
        ));
    }

    #[test]
    fn test_zero_interval_disables_background_eviction() {
        let config =
            Config::from_lookup(lookup(&[("EVENTHUB_EVICTION_INTERVAL_SECS", "0")])).unwrap();

        assert_eq!(config.eviction_interval(), None);
    }
}
