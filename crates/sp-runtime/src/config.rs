//! # Locator Configuration
//!
//! Unified configuration for the gateway, both upstream clients and the
//! selector.
//!
//! ## Load Order
//!
//! 1. Built-in defaults
//! 2. TOML file (optional, `--config <path>`)
//! 3. Environment overrides (`SP_HTTP_PORT`, `SP_DIRECTORY_URL`,
//!    `SP_GEOLOCATION_URL`, `SP_GEOLOCATION_TOKEN`, `SP_LOG`)
//! 4. Validation

use serde::{Deserialize, Serialize};
use sp_01_provider_selection::SelectionConfig;
use sp_02_api_gateway::{duration_serde, GatewayConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder the geolocation URL template must contain.
const IP_PLACEHOLDER: &str = "{ip}";

/// Complete locator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// HTTP server (`[http]`).
    pub http: GatewayConfig,
    /// Provider directory client (`[directory]`).
    pub directory: DirectoryConfig,
    /// Geolocation client (`[geolocation]`).
    pub geolocation: GeolocationConfig,
    /// Nearest-provider search (`[selection]`).
    pub selection: SelectionSettings,
    /// Log output (`[logging]`).
    pub logging: LoggingConfig,
}

impl LocatorConfig {
    /// Load defaults, then `path` if given, then the process environment,
    /// and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file. Missing sections keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `SP_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("SP_HTTP_PORT") {
            self.http.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "SP_HTTP_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(url) = lookup("SP_DIRECTORY_URL") {
            self.directory.base_url = url;
        }
        if let Some(template) = lookup("SP_GEOLOCATION_URL") {
            self.geolocation.url_template = template;
        }
        if let Some(token) = lookup("SP_GEOLOCATION_TOKEN") {
            self.geolocation.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(filter) = lookup("SP_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[http] {e}")))?;

        if !is_http_url(&self.directory.base_url) {
            return Err(ConfigError::Invalid(format!(
                "[directory] base_url must be an http(s) URL, got {:?}",
                self.directory.base_url
            )));
        }
        if self.directory.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "[directory] request_timeout cannot be 0".into(),
            ));
        }

        if !is_http_url(&self.geolocation.url_template)
            || !self.geolocation.url_template.contains(IP_PLACEHOLDER)
        {
            return Err(ConfigError::Invalid(format!(
                "[geolocation] url_template must be an http(s) URL containing {IP_PLACEHOLDER}, got {:?}",
                self.geolocation.url_template
            )));
        }
        if self.geolocation.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "[geolocation] request_timeout cannot be 0".into(),
            ));
        }

        if self.selection.lookup_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "[selection] lookup_timeout cannot be 0".into(),
            ));
        }
        if self.selection.max_concurrent_lookups == 0 {
            return Err(ConfigError::Invalid(
                "[selection] max_concurrent_lookups cannot be 0".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("[logging] filter cannot be empty".into()));
        }

        Ok(())
    }

    /// Selector settings in the form the selection service takes.
    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            lookup_timeout: self.selection.lookup_timeout,
            max_concurrent_lookups: self.selection.max_concurrent_lookups,
            random_seed: self.selection.random_seed,
        }
    }
}

fn is_http_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Storage marketplace directory client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// API root; `/providers` is appended.
    pub base_url: String,
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.storage.market/api".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// IP geolocation client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// Lookup URL with an `{ip}` placeholder.
    pub url_template: String,
    /// Sent as the `token` query parameter when set.
    pub token: Option<String>,
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            url_template: "https://ipinfo.io/{ip}/json".to_string(),
            token: None,
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Nearest-provider search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Deadline for one geolocation lookup.
    #[serde(with = "duration_serde")]
    pub lookup_timeout: Duration,
    /// Lookups in flight per request.
    pub max_concurrent_lookups: usize,
    /// Fixed seed for the random fallback. Unset means entropy.
    pub random_seed: Option<u64>,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        let defaults = SelectionConfig::default();
        Self {
            lookup_timeout: defaults.lookup_timeout,
            max_concurrent_lookups: defaults.max_concurrent_lookups,
            random_seed: defaults.random_seed,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
    /// One JSON object per line instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file: {0}")]
    Parse(String),
    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
