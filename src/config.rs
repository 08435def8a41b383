//! Configuration Module
//!
//! Cache parameters and server settings, loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

// == Defaults ==
pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_VERSION: &str = "1";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// == Cache Config ==
/// Parameters fixed at cache construction.
///
/// Only `version` may change afterwards, through `Cache::set_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of stored entries
    pub capacity: usize,
    /// Age after which an entry is stale
    pub ttl: Duration,
    /// Initial version tag
    pub version: String,
    /// Delay between background sweeps
    pub sweep_interval: Duration,
}

impl CacheConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: DEFAULT_TTL,
            version: DEFAULT_VERSION.to_string(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

// == Server Config ==
/// Process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cache entries
    pub capacity: usize,
    /// Entry TTL in seconds
    pub ttl_secs: u64,
    /// Initial cache version tag
    pub version: String,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 300)
    /// - `CACHE_VERSION` - Initial version tag (default: "1")
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Zero or unparsable TTL and sweep interval values fall back to the
    /// defaults, since both must be positive.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            ttl_secs: parse_var::<u64>("CACHE_TTL_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.ttl_secs),
            version: env::var("CACHE_VERSION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.version),
            sweep_interval_secs: parse_var::<u64>("SWEEP_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval_secs),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    // == Cache Config ==
    /// Cache construction parameters derived from this config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.capacity,
            ttl: Duration::from_secs(self.ttl_secs),
            version: self.version.clone(),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_secs: DEFAULT_TTL.as_secs(),
            version: DEFAULT_VERSION.to_string(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.ttl_secs, 300);
        assert_eq!(config.version, "1");
        assert_eq!(config.sweep_interval_secs, 300);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("CACHE_VERSION");
        env::remove_var("SWEEP_INTERVAL_SECS");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.ttl_secs, 300);
        assert_eq!(config.version, "1");
        assert_eq!(config.sweep_interval_secs, 300);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_cache_config_from_config() {
        let config = Config {
            capacity: 7,
            ttl_secs: 2,
            version: "v9".to_string(),
            sweep_interval_secs: 11,
            server_port: 8080,
        };

        let cache_config = config.cache_config();
        assert_eq!(cache_config.capacity, 7);
        assert_eq!(cache_config.ttl, Duration::from_secs(2));
        assert_eq!(cache_config.version, "v9");
        assert_eq!(cache_config.sweep_interval, Duration::from_secs(11));
    }

    #[test]
    fn test_cache_config_default_matches_server_default() {
        assert_eq!(Config::default().cache_config(), CacheConfig::default());
    }

    #[test]
    fn test_cache_config_builders() {
        let config = CacheConfig::default()
            .with_capacity(3)
            .with_ttl(Duration::from_millis(1000))
            .with_version("projects-v2")
            .with_sweep_interval(Duration::from_millis(50));

        assert_eq!(config.capacity, 3);
        assert_eq!(config.ttl, Duration::from_millis(1000));
        assert_eq!(config.version, "projects-v2");
        assert_eq!(config.sweep_interval, Duration::from_millis(50));
    }
}
