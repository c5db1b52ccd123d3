//! Runtime configuration with environment overrides

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Portal upload limit for a single return file (5 MB)
pub const DEFAULT_PORTAL_MAX_SIZE_BYTES: usize = 5 * 1024 * 1024;
/// Time a provider call may take before it counts as a miss
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 5_000;
/// How long a provider keeps a classification in its cache
pub const DEFAULT_PROVIDER_CACHE_TTL_SECS: u64 = 3_600;

/// Settings shared by the provider chain and the portal exporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstConfig {
    /// Largest export payload accepted by the portal, in bytes
    pub portal_max_size_bytes: usize,
    /// Per-provider call timeout
    pub provider_timeout: Duration,
    /// Per-provider cache entry lifetime
    pub provider_cache_ttl: Duration,
    /// Pretty-print exported JSON
    pub pretty_export: bool,
}

impl Default for GstConfig {
    fn default() -> Self {
        Self {
            portal_max_size_bytes: DEFAULT_PORTAL_MAX_SIZE_BYTES,
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            provider_cache_ttl: Duration::from_secs(DEFAULT_PROVIDER_CACHE_TTL_SECS),
            pretty_export: false,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|val| val.trim().parse::<T>().ok())
}

impl GstConfig {
    /// Build a configuration from defaults overridden by environment variables.
    ///
    /// Reads `GST_PORTAL_MAX_BYTES`, `GST_PROVIDER_TIMEOUT_MS`,
    /// `GST_PROVIDER_CACHE_TTL_SECS` and `GST_PRETTY_EXPORT`. Unparseable
    /// values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            portal_max_size_bytes: env_parse("GST_PORTAL_MAX_BYTES")
                .unwrap_or(defaults.portal_max_size_bytes),
            provider_timeout: env_parse("GST_PROVIDER_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.provider_timeout),
            provider_cache_ttl: env_parse("GST_PROVIDER_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.provider_cache_ttl),
            pretty_export: env_parse("GST_PRETTY_EXPORT").unwrap_or(defaults.pretty_export),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GstConfig::default();
        assert_eq!(config.portal_max_size_bytes, 5_242_880);
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert_eq!(config.provider_cache_ttl, Duration::from_secs(3600));
        assert!(!config.pretty_export);
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("GST_PROVIDER_TIMEOUT_MS", "250");
        env::set_var("GST_PORTAL_MAX_BYTES", "not-a-number");
        let config = GstConfig::from_env();
        env::remove_var("GST_PROVIDER_TIMEOUT_MS");
        env::remove_var("GST_PORTAL_MAX_BYTES");

        assert_eq!(config.provider_timeout, Duration::from_millis(250));
        assert_eq!(config.portal_max_size_bytes, DEFAULT_PORTAL_MAX_SIZE_BYTES);
    }
}
