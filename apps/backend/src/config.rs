//! Runtime configuration from environment variables.

use std::path::PathBuf;

use anyhow::Context;

/// Backend configuration.
///
/// Env vars:
/// - DATABASE_URL: PostgreSQL URL. Unset keeps progress in memory.
/// - DATABASE_MAX_CONNECTIONS: pool size (default 10)
/// - HOST / PORT: listen address (default 0.0.0.0:3000)
/// - WORD_BANK_PATH: `.json` or `.csv` word bank. Unset uses the starter list.
/// - RUST_LOG: tracing filter (default "info")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub word_bank_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 10,
            host: "0.0.0.0".to_string(),
            port: 3000,
            word_bank_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS '{}'", v))?,
            None => defaults.max_connections,
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT '{}'", v))?,
            None => defaults.port,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            max_connections,
            host: get("HOST").unwrap_or(defaults.host),
            port,
            word_bank_path: get("WORD_BANK_PATH").map(PathBuf::from),
            log_filter: get("RUST_LOG").unwrap_or(defaults.log_filter),
        })
    }

    /// Listen address as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_values() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/vocab"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("WORD_BANK_PATH", "data/gre_words.json"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/vocab"));
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.word_bank_path, Some(PathBuf::from("data/gre_words.json")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_empty_database_url_means_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));
    }
}
