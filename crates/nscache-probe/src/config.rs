//! # Probe Configuration
//!
//! Environment-based configuration for the cache probe.

use std::env;
use std::time::Duration;

use nscache::RedisConfig;

/// Probe configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis store configuration
    pub redis: RedisConfig,

    /// Expiry of the probe value
    pub probe_ttl: Duration,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| lookup(name).is_some_and(|v| v == "true" || v == "1");

        Self {
            redis: RedisConfig {
                address: lookup("REDIS_ADDRESS").unwrap_or_else(|| "127.0.0.1:6379".to_string()),
                password: lookup("REDIS_PASSWORD").filter(|p| !p.is_empty()),
                namespace: lookup("REDIS_NAMESPACE").unwrap_or_default(),
                disable_cluster_mode: flag("REDIS_DISABLE_CLUSTER_MODE"),
                disable_tls: flag("REDIS_DISABLE_TLS"),
            },

            probe_ttl: lookup("PROBE_TTL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map_or(Duration::from_secs(30), Duration::from_secs),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_in(&[]));

        assert_eq!(config.redis.address, "127.0.0.1:6379");
        assert_eq!(config.redis.password, None);
        assert!(config.redis.namespace.is_empty());
        assert!(!config.redis.disable_cluster_mode);
        assert!(!config.redis.disable_tls);
        assert_eq!(config.probe_ttl, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_in(&[
            ("REDIS_ADDRESS", "cache:6380"),
            ("REDIS_PASSWORD", "secret"),
            ("REDIS_NAMESPACE", "probe"),
            ("REDIS_DISABLE_CLUSTER_MODE", "1"),
            ("REDIS_DISABLE_TLS", "true"),
            ("PROBE_TTL_SECS", "5"),
            ("LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.redis.address, "cache:6380");
        assert_eq!(config.redis.password.as_deref(), Some("secret"));
        assert_eq!(config.redis.namespace, "probe");
        assert!(config.redis.disable_cluster_mode);
        assert!(config.redis.disable_tls);
        assert_eq!(config.probe_ttl, Duration::from_secs(5));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_in(&[
            ("REDIS_DISABLE_TLS", "yes"),
            ("PROBE_TTL_SECS", "0"),
            ("REDIS_PASSWORD", ""),
        ]));

        assert!(!config.redis.disable_tls);
        assert_eq!(config.probe_ttl, Duration::from_secs(30));
        assert_eq!(config.redis.password, None);
    }
}
