//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! Configuration is read from environment variables at startup; a `.env` file
//! is honoured for local development. Command-line flags are applied on top
//! with [`Config::with_overrides`].

use reqwest::Url;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Where the document service listens.
    pub base_url: Url,
    pub log_level: Level,
    /// Per-request timeout. `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory, but this is
    /// skipped in test builds so tests stay hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_base_url(
            "DOCQUERY_BASE_URL",
            &lookup("DOCQUERY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let request_timeout = match lookup("DOCQUERY_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout("DOCQUERY_TIMEOUT_SECS", &raw)?),
            None => None,
        };

        Ok(Self {
            base_url,
            log_level,
            request_timeout,
        })
    }

    /// Applies command-line values, which win over the environment.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = base_url {
            self.base_url = parse_base_url("--base-url", raw)?;
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout = Some(parse_timeout("--timeout", &secs.to_string())?);
        }
        Ok(self)
    }
}

fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_timeout(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("'{}' is not a positive number of seconds", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_vars(vars(&[
            ("DOCQUERY_BASE_URL", "https://docs.example.com/api"),
            ("RUST_LOG", "debug"),
            ("DOCQUERY_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://docs.example.com/api");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_vars(vars(&[("DOCQUERY_BASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "DOCQUERY_BASE_URL"));

        let err = Config::from_vars(vars(&[("DOCQUERY_BASE_URL", "ftp://host")])).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));

        let err = Config::from_vars(vars(&[("DOCQUERY_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "DOCQUERY_TIMEOUT_SECS"));

        let err = Config::from_vars(vars(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(err.to_string().contains("not a valid log level"));
    }

    #[test]
    fn overrides_win() {
        let config = Config::from_vars(vars(&[("DOCQUERY_TIMEOUT_SECS", "5")]))
            .unwrap()
            .with_overrides(Some("http://10.0.0.2:9000"), Some(60))
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://10.0.0.2:9000/");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(60)));
    }
}
