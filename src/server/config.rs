//! Configuration loading for rotomd.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.rotom/config.toml` (user)
//! 3. `/etc/rotom/config.toml` (system)
//! 4. Built-in defaults
//!
//! PokeAPI needs no credentials, so there is no secrets file; a missing
//! config file is not an error.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Result, RotomError};

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000).
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            limits: LimitsConfig::default(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Resource limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum concurrent requests (default: 100).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_max_concurrent() -> usize {
    100
}

fn default_request_timeout() -> u64 {
    30
}

/// Upstream data service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the Pokémon data service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-fetch timeout in seconds (default: 10).
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_upstream_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_upstream_timeout() -> u64 {
    10
}

/// Enrichment cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Entry time-to-live in seconds (default: 120).
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    /// Maximum number of cached entries (default: 10,000).
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_cache_ttl() -> u64 {
    120
}

fn default_cache_max_entries() -> u64 {
    10_000
}

impl CacheSettings {
    /// Convert to the cache construction config.
    pub fn to_cache_config(&self) -> crate::CacheConfig {
        crate::CacheConfig::new()
            .max_entries(self.max_entries)
            .ttl(Duration::from_secs(self.ttl_secs))
    }
}

/// Team database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path (default: `pokedex.db`).
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("pokedex.db")
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided — must exist)
    /// 2. `~/.rotom/config.toml`
    /// 3. `/etc/rotom/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit_path)? else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            RotomError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            RotomError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, `None` meaning "use defaults".
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(RotomError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".rotom").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/rotom/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.server.address, "127.0.0.1:3000");
        assert_eq!(config.server.limits.max_concurrent_requests, 100);
        assert_eq!(config.server.limits.request_timeout_secs, 30);
        assert_eq!(config.upstream.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.storage.path, PathBuf::from("pokedex.db"));
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [server]
            address = "0.0.0.0:8080"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.address, "0.0.0.0:8080");
        // Defaults preserved
        assert_eq!(config.server.limits.max_concurrent_requests, 100);
        assert_eq!(config.cache.max_entries, 10_000);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [server]
            address = "127.0.0.1:3000"

            [server.limits]
            max_concurrent_requests = 50
            request_timeout_secs = 60

            [upstream]
            base_url = "http://localhost:9090/api/v2"
            timeout_secs = 5

            [cache]
            ttl_secs = 300
            max_entries = 500

            [storage]
            path = "/var/lib/rotom/teams.db"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.limits.max_concurrent_requests, 50);
        assert_eq!(config.server.limits.request_timeout_secs, 60);
        assert_eq!(config.upstream.base_url, "http://localhost:9090/api/v2");
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.max_entries, 500);
        assert_eq!(config.storage.path, PathBuf::from("/var/lib/rotom/teams.db"));
    }

    #[test]
    fn cache_settings_convert_to_cache_config() {
        let settings = CacheSettings {
            ttl_secs: 60,
            max_entries: 42,
        };
        let config = settings.to_cache_config();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_entries, 42);
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }
}
