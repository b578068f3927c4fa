use std::env;
use std::time::Duration;

use dotenv::dotenv;
use tracing::{info, warn};
use url::Url;

use crate::domain::errors::ConfigError;

pub mod constant {
    pub(crate) const DEFAULT_BASE_URL: &str = "https://api.parse.com";
    pub(crate) const COLLECTION_PATH: &str = "/1/classes/StudentLocation";
    pub const DEFAULT_LIMIT: u32 = 100;
    pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub(crate) const APP_ID_HEADER: &str = "X-Parse-Application-Id";
    pub(crate) const API_KEY_HEADER: &str = "X-Parse-REST-API-Key";

    pub(crate) const OFFLINE_MESSAGE: &str = "The internet connection appears to be offline";
}

/// Connection settings for the Parse REST API.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    pub base_url: Url,
    pub app_id: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ParseConfig {
    pub fn new(base_url: Url, app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            app_id: app_id.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(constant::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load settings from the process environment, reading `.env` first.
    ///
    /// `PARSE_APP_ID` and `PARSE_API_KEY` are required. `PARSE_BASE_URL` and
    /// `PARSE_TIMEOUT_SECS` fall back to the public endpoint and 30 seconds.
    /// Any path on `PARSE_BASE_URL` is kept as a prefix of the collection path.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from any variable source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = required_var(&lookup, "PARSE_APP_ID")?;
        let api_key = required_var(&lookup, "PARSE_API_KEY")?;

        let raw_base = lookup("PARSE_BASE_URL").unwrap_or_else(|| {
            info!("PARSE_BASE_URL not set, using {}", constant::DEFAULT_BASE_URL);
            constant::DEFAULT_BASE_URL.to_string()
        });
        let base_url = Url::parse(raw_base.trim()).map_err(|e| ConfigError::Invalid {
            var: "PARSE_BASE_URL",
            reason: e.to_string(),
        })?;

        let timeout = match lookup("PARSE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "PARSE_TIMEOUT_SECS",
                    reason: format!("expected whole seconds, got '{}'", raw),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(constant::DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self::new(base_url, app_id, api_key).with_timeout(timeout))
    }
}

fn required_var<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => {
            warn!("{} missing from environment and .env", name);
            Err(ConfigError::Missing(name))
        }
    }
}
