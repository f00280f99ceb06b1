//! Service endpoints and credentials, read from the environment (and `.env`).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PREDICT_URL: &str = "http://localhost:5000/train_predict";
pub const DEFAULT_STORE_DIR: &str = ".forecasts";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where saved forecasts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Http(String),
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub predict_url: String,
    pub store: StoreTarget,
    /// Sent as a bearer token to both services when set.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let predict_url = get("FORECAST_PREDICT_URL").unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string());

        let store = match get("FORECAST_STORE_URL") {
            Some(url) => StoreTarget::Http(url),
            None => StoreTarget::Dir(PathBuf::from(
                get("FORECAST_STORE_DIR").unwrap_or_else(|| DEFAULT_STORE_DIR.to_string()),
            )),
        };

        let timeout_ms = match get("FORECAST_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("FORECAST_TIMEOUT_MS must be a whole number of milliseconds, got '{raw}'."))
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            predict_url,
            store,
            api_token: get("FORECAST_API_TOKEN"),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.predict_url, DEFAULT_PREDICT_URL);
        assert_eq!(config.store, StoreTarget::Dir(PathBuf::from(DEFAULT_STORE_DIR)));
        assert_eq!(config.api_token, None);
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn store_url_wins_over_dir() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("FORECAST_STORE_URL", "https://api.example.com/forecasts"),
            ("FORECAST_STORE_DIR", "/tmp/ignored"),
            ("FORECAST_API_TOKEN", "  secret "),
            ("FORECAST_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();
        assert_eq!(config.store, StoreTarget::Http("https://api.example.com/forecasts".into()));
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[("FORECAST_API_TOKEN", "   ")])).unwrap();
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = ServiceConfig::from_lookup(lookup(&[("FORECAST_TIMEOUT_MS", "soon")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
