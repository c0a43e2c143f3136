use log::warn;
use std::env;
use std::num::NonZeroU32;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    pub bind_address: String,
    pub max_connections: u32,
    pub mock_data_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = non_empty("DATABASE_URL");
        if database_url.is_none() {
            warn!("DATABASE_URL is not set, data will be kept in memory");
        }

        let max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    expected: "a positive integer",
                    value,
                })?
                .get(),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let mock_data_seed = match non_empty("MOCK_DATA_SEED") {
            Some(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                name: "MOCK_DATA_SEED",
                expected: "an unsigned integer",
                value,
            })?),
            None => None,
        };

        Ok(AppConfig {
            database_url,
            bind_address: non_empty("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            max_connections,
            mock_data_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.mock_data_seed, None);
    }

    #[test]
    fn values_are_read() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/staff"),
            ("BIND_ADDRESS", "0.0.0.0:9000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("MOCK_DATA_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/staff"));
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.mock_data_seed, Some(42));
    }

    #[test]
    fn blank_database_url_means_memory() {
        assert_eq!(config(&[("DATABASE_URL", "  ")]).unwrap().database_url, None);
    }

    #[rstest]
    #[case("DATABASE_MAX_CONNECTIONS", "many")]
    #[case("DATABASE_MAX_CONNECTIONS", "-1")]
    #[case("DATABASE_MAX_CONNECTIONS", "0")]
    #[case("MOCK_DATA_SEED", "abc")]
    fn malformed_numbers_are_rejected(#[case] name: &str, #[case] value: &str) {
        match config(&[(name, value)]) {
            Err(ConfigError::Invalid { name: got, .. }) => assert_eq!(got, name),
            other => panic!("expected error, got {other:?}"),
        }
    }
}
