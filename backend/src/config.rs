//! Application configuration.
//!
//! Values come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! ```yaml
//! bind: "127.0.0.1:3000"
//! cors_origin: "http://localhost:8080"
//! store: sqlite            # or "memory"
//! database_url: "sqlite:attendance.db"
//! session_ttl_secs: 3600   # idle attendance sessions are dropped after this
//! ```
//!
//! | Variable                      | Overrides          |
//! |-------------------------------|--------------------|
//! | `ATTENDANCE_CONFIG`           | YAML file path     |
//! | `ATTENDANCE_BIND`             | `bind`             |
//! | `ATTENDANCE_CORS_ORIGIN`      | `cors_origin`      |
//! | `ATTENDANCE_STORE`            | `store`            |
//! | `ATTENDANCE_DATABASE_URL`     | `database_url`     |
//! | `ATTENDANCE_SESSION_TTL_SECS` | `session_ttl_secs` |

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub const CONFIG_PATH_VAR: &str = "ATTENDANCE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "attendance.yaml";

/// Which [`crate::storage::DocumentStore`] backend to run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => bail!("Unknown store backend '{}' (expected memory or sqlite)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub cors_origin: String,
    pub store: StoreBackend,
    pub database_url: String,
    pub session_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: "http://localhost:8080".to_string(),
            store: StoreBackend::Sqlite,
            database_url: "sqlite:attendance.db".to_string(),
            session_ttl_secs: 3600,
        }
    }
}

impl AppConfig {
    /// Defaults for tests and demos: in-memory store
    pub fn in_memory() -> Self {
        Self {
            store: StoreBackend::Memory,
            ..Self::default()
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Load from the YAML file named by `ATTENDANCE_CONFIG` (or
    /// `attendance.yaml` when it exists), then apply environment overrides
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_VAR).ok();
        let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let yaml = if Path::new(path).exists() {
            info!("Reading configuration from {}", path);
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path))?,
            )
        } else if explicit.is_some() {
            bail!("Config file {} does not exist", path);
        } else {
            None
        };

        Self::from_sources(yaml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a config from optional YAML text and an environment lookup
    pub fn from_sources<F>(yaml: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match yaml {
            Some(text) if !text.trim().is_empty() => {
                serde_yaml::from_str(text).context("Failed to parse YAML configuration")?
            }
            _ => Self::default(),
        };

        if let Some(bind) = env("ATTENDANCE_BIND") {
            config.bind = bind
                .parse()
                .with_context(|| format!("Invalid ATTENDANCE_BIND address '{}'", bind))?;
        }
        if let Some(origin) = env("ATTENDANCE_CORS_ORIGIN") {
            config.cors_origin = origin;
        }
        if let Some(store) = env("ATTENDANCE_STORE") {
            config.store = store.parse()?;
        }
        if let Some(url) = env("ATTENDANCE_DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(ttl) = env("ATTENDANCE_SESSION_TTL_SECS") {
            config.session_ttl_secs = ttl.trim().parse().with_context(|| {
                format!("Invalid ATTENDANCE_SESSION_TTL_SECS value '{}'", ttl)
            })?;
        }
        if config.session_ttl_secs == 0 {
            bail!("session_ttl_secs must be greater than zero");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::from_sources(None, env_of(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.session_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_session_ttl_from_yaml_and_environment() {
        let from_yaml = AppConfig::from_sources(Some("session_ttl_secs: 60\n"), env_of(&[])).unwrap();
        assert_eq!(from_yaml.session_ttl(), Duration::from_secs(60));

        let from_env = AppConfig::from_sources(
            Some("session_ttl_secs: 60\n"),
            env_of(&[("ATTENDANCE_SESSION_TTL_SECS", "900")]),
        )
        .unwrap();
        assert_eq!(from_env.session_ttl_secs, 900);

        assert!(AppConfig::from_sources(
            None,
            env_of(&[("ATTENDANCE_SESSION_TTL_SECS", "soon")])
        )
        .is_err());
        assert!(AppConfig::from_sources(Some("session_ttl_secs: 0\n"), env_of(&[])).is_err());
    }

    #[test]
    fn test_yaml_fills_missing_fields_with_defaults() {
        let yaml = "store: memory\nbind: \"0.0.0.0:8000\"\n";
        let config = AppConfig::from_sources(Some(yaml), env_of(&[])).unwrap();

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.cors_origin, "http://localhost:8080");
    }

    #[test]
    fn test_environment_overrides_yaml() {
        let yaml = "store: memory\ndatabase_url: \"sqlite:from-file.db\"\n";
        let config = AppConfig::from_sources(
            Some(yaml),
            env_of(&[
                ("ATTENDANCE_STORE", "SQLite"),
                ("ATTENDANCE_DATABASE_URL", "sqlite:from-env.db"),
            ]),
        )
        .unwrap();

        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.database_url, "sqlite:from-env.db");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(AppConfig::from_sources(None, env_of(&[("ATTENDANCE_STORE", "redis")])).is_err());
        assert!(AppConfig::from_sources(None, env_of(&[("ATTENDANCE_BIND", "nowhere")])).is_err());
        assert!(AppConfig::from_sources(Some("store: [1, 2]"), env_of(&[])).is_err());
    }
}
