// file: src/config.rs
// description: application configuration from defaults, toml file and AZSEARCH_* environment
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use crate::http::TransportOptions;
use chrono::NaiveDate;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "AZSEARCH";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_INDEX_NAME: &str = "sample-index";
pub const DEFAULT_QUERY: &str = "hello";
pub const DEFAULT_API_VERSION: &str = crate::client::API_VERSION;
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 3;

#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    /// Search service endpoint, with or without a scheme.
    pub endpoint: Option<String>,
    /// Presence selects shared-key auth for the whole run.
    pub api_key: Option<String>,
    pub index_name: String,
    pub query: String,
    pub api_version: String,
    pub settle_delay_secs: u64,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub proxy: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("index_name", &self.index_name)
            .field("query", &self.query)
            .field("api_version", &self.api_version)
            .field("settle_delay_secs", &self.settle_delay_secs)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Config {
    /// Loads `.env`, then layers defaults, the toml file and `AZSEARCH_*`
    /// variables (later sources win).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        Self::from_sources(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_sources(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("index_name", DEFAULT_INDEX_NAME)
            .and_then(|b| b.set_default("query", DEFAULT_QUERY))
            .and_then(|b| b.set_default("api_version", DEFAULT_API_VERSION))
            .and_then(|b| b.set_default("settle_delay_secs", DEFAULT_SETTLE_DELAY_SECS as i64))
            .map_err(|e| SearchError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(environment);

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            query: DEFAULT_QUERY.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            settle_delay_secs: DEFAULT_SETTLE_DELAY_SECS,
            timeout_secs: None,
            connect_timeout_secs: None,
            proxy: None,
        }
    }

    /// The endpoint, or a configuration error naming the variable to set.
    pub fn require_endpoint(&self) -> Result<&str> {
        self.endpoint.as_deref().ok_or_else(|| {
            SearchError::Config(format!(
                "{ENV_PREFIX}_ENDPOINT is not set (optionally also set {ENV_PREFIX}_API_KEY / {ENV_PREFIX}_INDEX_NAME)"
            ))
        })
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            proxy: self.proxy.clone(),
        }
    }

    // Empty environment values count as unset.
    fn normalized(mut self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        self.endpoint = non_empty(self.endpoint);
        self.api_key = non_empty(self.api_key);
        self.proxy = non_empty(self.proxy);

        if self.index_name.trim().is_empty() {
            self.index_name = DEFAULT_INDEX_NAME.to_string();
        }
        if self.query.trim().is_empty() {
            self.query = DEFAULT_QUERY.to_string();
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if !is_api_version(&self.api_version) {
            return Err(SearchError::Config(format!(
                "api_version must look like YYYY-MM-DD[-preview], got '{}'",
                self.api_version
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(SearchError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.connect_timeout_secs == Some(0) {
            return Err(SearchError::Config(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// `YYYY-MM-DD` or `YYYY-MM-DD-preview`, nothing else.
fn is_api_version(value: &str) -> bool {
    let (date, suffix) = value.split_at_checked(10).unwrap_or((value, ""));
    matches!(suffix, "" | "-preview") && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}
