//! Configuration structures for the stats client.
//!
//! - [`ApiConfig`] - Where the service lives and how requests are bounded
//! - [`UploadConfig`] - How upload responses are interpreted
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with values matching the
//! reference service (`http://127.0.0.1:5001`). A [`Config`] can be loaded
//! from a JSON file where every field is optional.

use std::time::Duration;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::types::UPLOAD_SUCCESS_MESSAGE;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

/// How a user-supplied column name is placed into the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryEncoding {
    /// Percent-encode the value so it always arrives as a single query value.
    #[default]
    Percent,
    /// Insert the value as typed.
    ///
    /// Reserved characters such as `&` or `=` are passed through and their
    /// meaning is left to the server. Characters that can never appear in a
    /// query (spaces, `#`) are still escaped by the URL parser.
    Raw,
}

/// Settings for reaching the statistics API.
///
/// # Examples
///
/// ```
/// use sc_core::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.base_url, "http://127.0.0.1:5001");
/// assert_eq!(config.timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and authority of the service, optionally with a path prefix.
    pub base_url: String,

    /// Total time allowed for one request, in milliseconds.
    pub timeout_ms: u64,

    /// Time allowed to establish a connection, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Encoding applied to the `column` query value.
    pub query_encoding: QueryEncoding,

    /// Value sent in the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: 30_000,
            connect_timeout_ms: 5_000,
            query_encoding: QueryEncoding::Percent,
            user_agent: concat!("stats-client/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ApiConfig {
    /// Returns the request timeout as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the connect timeout as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Parses [`base_url`](Self::base_url) and checks that it is an HTTP(S) URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid_url(self.base_url.as_str(), e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_option(
                "api.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ConfigError::invalid_option(
                "api.base_url",
                "must include a host",
            ));
        }

        Ok(url)
    }
}

/// Settings for interpreting upload responses.
///
/// The service reports upload success only through its message text, so the
/// outcome hinges on an exact string match against
/// [`success_message`](Self::success_message). Any change in server wording
/// flips the result; a structured `success` flag in the response takes
/// precedence when the server sends one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Message that marks a successful upload.
    pub success_message: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            success_message: UPLOAD_SUCCESS_MESSAGE.to_owned(),
        }
    }
}

/// Root configuration for the stats client.
///
/// # Examples
///
/// ```
/// use sc_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// assert!(json.contains("base_url"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API connection settings.
    pub api: ApiConfig,

    /// Upload response settings.
    pub upload: UploadConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The loaded configuration
    /// is validated before it is returned.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every option for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.parsed_base_url()?;

        if self.api.timeout_ms == 0 {
            return Err(ConfigError::invalid_option(
                "api.timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.api.connect_timeout_ms == 0 {
            return Err(ConfigError::invalid_option(
                "api.connect_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.upload.success_message.is_empty() {
            return Err(ConfigError::invalid_option(
                "upload.success_message",
                "must not be empty",
            ));
        }

        Ok(())
    }
}
