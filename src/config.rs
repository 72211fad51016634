/// Client configuration: endpoints, credentials and timeouts.
use std::env;
use std::time::Duration;

use crate::errors::TwelveDataError;

pub const DEFAULT_API_BASE: &str = "https://api.twelvedata.com";
pub const DEFAULT_WS_URL: &str = "wss://ws.twelvedata.com/v1/quotes/price";

pub const API_KEY_ENV: &str = "TWELVE_DATA_API_KEY";
pub const API_BASE_ENV: &str = "TWELVE_DATA_API_BASE";
pub const WS_URL_ENV: &str = "TWELVE_DATA_WS_URL";

/// Configuration holding API URLs, the API key and per-request timeouts.
#[derive(Clone)]
pub struct Config {
    pub api_base: String,
    pub ws_url: String,
    pub api_key: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection establishment timeout. A request that hits it is retried once.
    pub dial_timeout: Duration,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            ws_url: DEFAULT_WS_URL.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            dial_timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from `TWELVE_DATA_API_KEY` and the optional
    /// `TWELVE_DATA_API_BASE` / `TWELVE_DATA_WS_URL` overrides.
    pub fn from_env() -> Result<Self, TwelveDataError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TwelveDataError::ConfigError(format!("{API_KEY_ENV} is not set")))?;

        let mut config = Self::new(api_key);
        if let Ok(base) = env::var(API_BASE_ENV) {
            config.api_base = base;
        }
        if let Ok(ws_url) = env::var(WS_URL_ENV) {
            config.ws_url = ws_url;
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_ws_url(mut self, ws_url: impl Into<String>) -> Self {
        self.ws_url = ws_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }
}

// Keeps the key out of `{:?}` output and therefore out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base", &self.api_base)
            .field("ws_url", &self.ws_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("dial_timeout", &self.dial_timeout)
            .finish()
    }
}
