//! Configuration Module
//!
//! Handles loading and managing cache and server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CacheConfig, DEFAULT_MAX_SIZE, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget for cached values
    pub max_size: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Byte budget (default: 52428800, i.e. 50 MiB)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            default_ttl: env_or("CACHE_DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CACHE_CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Store parameters derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_size: self.max_size,
            default_ttl: Duration::from_secs(self.default_ttl),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: DEFAULT_TTL.as_secs(),
            server_port: 3000,
            cleanup_interval: DEFAULT_SWEEP_INTERVAL.as_secs(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_size, 50 * 1024 * 1024);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 300);
    }

    #[test]
    fn test_config_from_env() {
        // Kept in a single test so parallel tests never race on these variables
        env::remove_var("CACHE_MAX_SIZE");
        env::remove_var("CACHE_DEFAULT_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.max_size, 50 * 1024 * 1024);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 300);

        env::set_var("CACHE_MAX_SIZE", "1024");
        env::set_var("CACHE_DEFAULT_TTL", "not a number");
        let config = Config::from_env();
        assert_eq!(config.max_size, 1024);
        assert_eq!(config.default_ttl, 3600);

        env::remove_var("CACHE_MAX_SIZE");
        env::remove_var("CACHE_DEFAULT_TTL");
    }

    #[test]
    fn test_cache_config() {
        let config = Config {
            max_size: 2048,
            default_ttl: 60,
            server_port: 3000,
            cleanup_interval: 5,
        };

        let cache = config.cache_config();
        assert_eq!(cache.max_size, 2048);
        assert_eq!(cache.default_ttl, Duration::from_secs(60));
        assert_eq!(config.sweep_interval(), Duration::from_secs(5));
    }
}
