//! Runtime configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "ALPHAVANTAGE_BASE_URL";
pub const TIMEOUT_VAR: &str = "ALPHAVANTAGE_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key configured: pass --api-key or set ALPHAVANTAGE_API_KEY")]
    MissingApiKey,
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Connection settings for the market-data provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    /// `None` selects the production endpoint.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let base_url = get(BASE_URL_VAR);
        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }

    /// Reads the configuration from process environment variables. An
    /// explicit key (e.g. from a CLI flag) wins over the environment and
    /// satisfies the key requirement.
    pub fn resolve(api_key: Option<&str>) -> Result<Self, ConfigError> {
        let explicit = api_key.map(str::trim).filter(|k| !k.is_empty());
        Self::from_lookup(|key| match (key, explicit) {
            (API_KEY_VAR, Some(k)) => Some(k.to_string()),
            _ => std::env::var(key).ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc")])).unwrap();
        assert_eq!(cfg.api_key, "abc");
        assert_eq!(cfg.base_url, None);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn all_values_read() {
        let cfg = Config::from_lookup(lookup(&[
            (API_KEY_VAR, " abc "),
            (BASE_URL_VAR, "http://localhost:8080"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_key, "abc");
        assert_eq!(cfg.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_key() {
        assert_eq!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::MissingApiKey)
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(API_KEY_VAR, "   ")])),
            Err(ConfigError::MissingApiKey)
        );
    }

    #[test]
    fn bad_timeout() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (TIMEOUT_VAR, "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: TIMEOUT_VAR,
                value: "soon".to_string()
            }
        );
        assert!(Config::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (TIMEOUT_VAR, "0")])).is_err());
    }
}
