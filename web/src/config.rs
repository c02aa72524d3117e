//! Configuration management for the to-do server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset or unparsable values fall back to the default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;
use todomvc_core::DEFAULT_HISTORY_LIMIT;
use todomvc_runtime::DEFAULT_BROADCAST_CAPACITY;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Session store configuration
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Session store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of filter history entries
    pub history_limit: usize,
    /// Notification channel capacity
    pub broadcast_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load `.env` from the working directory if present, then read the
    /// environment. Variables already set win over the file.
    #[must_use]
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
        Self::from_env()
    }

    /// Load configuration from a dotenv-format file only.
    ///
    /// # Errors
    ///
    /// Returns the [`dotenvy::Error`] if the file cannot be read or parsed.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, dotenvy::Error> {
        let vars = dotenvy::from_path_iter(path)?.collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self::from_lookup(|key| vars.get(key).cloned()))
    }

    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse_var(&lookup, "PORT").unwrap_or(3000),
                log_level: lookup("RUST_LOG")
                    .unwrap_or_else(|| "todomvc=info,tower_http=debug".to_string()),
                shutdown_timeout: parse_var(&lookup, "SHUTDOWN_TIMEOUT").unwrap_or(5),
            },
            session: SessionConfig {
                history_limit: parse_var(&lookup, "TODOMVC_HISTORY_LIMIT")
                    .filter(|limit: &usize| *limit > 0)
                    .unwrap_or(DEFAULT_HISTORY_LIMIT),
                broadcast_capacity: parse_var(&lookup, "TODOMVC_BROADCAST_CAPACITY")
                    .filter(|capacity: &usize| *capacity > 0)
                    .unwrap_or(DEFAULT_BROADCAST_CAPACITY),
            },
        }
    }

    /// Socket address to bind, as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.server.shutdown_timeout, 5);
        assert_eq!(config.session.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.session.broadcast_capacity, DEFAULT_BROADCAST_CAPACITY);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("TODOMVC_HISTORY_LIMIT", "10"),
            ("SHUTDOWN_TIMEOUT", " 30 "),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.session.history_limit, 10);
        assert_eq!(config.server.shutdown_timeout, 30);
    }

    #[test]
    fn reads_dotenv_file() {
        let path = env::temp_dir().join(format!("todomvc-{}.env", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "# local overrides\nPORT=4000\nTODOMVC_HISTORY_LIMIT=\"7\"\n",
        )
        .unwrap();

        let config = Config::from_env_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.session.history_limit, 7);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn missing_dotenv_file_is_an_error_for_explicit_paths() {
        let path = env::temp_dir().join(format!("todomvc-{}.env", uuid::Uuid::new_v4()));
        assert!(Config::from_env_file(path).unwrap_err().not_found());
    }

    #[test]
    fn load_works_without_a_dotenv_file() {
        assert_eq!(Config::load(), Config::from_env());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("TODOMVC_HISTORY_LIMIT", "0"),
            ("TODOMVC_BROADCAST_CAPACITY", "-4"),
        ]);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.session.broadcast_capacity, DEFAULT_BROADCAST_CAPACITY);
    }
}
