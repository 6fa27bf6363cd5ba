//! Error types for the sc-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related errors
//! that can occur across the workspace.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use sc_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingFile(Utf8PathBuf::from("/etc/stats.json"));
/// assert!(error.to_string().contains("/etc/stats.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API base URL could not be parsed.
    #[error("invalid base URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL text.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(Utf8PathBuf),

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ConfigError::InvalidUrl`] error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let error = ConfigError::invalid_url("not a url", url::ParseError::RelativeUrlWithoutBase);
        let msg = error.to_string();
        assert!(msg.contains("not a url"));
        assert!(msg.contains("relative URL without a base"));
    }

    #[test]
    fn test_missing_file_display() {
        let error = ConfigError::MissingFile(Utf8PathBuf::from("/missing/config.json"));
        assert!(error.to_string().contains("/missing/config.json"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("api.timeout_ms", "must be positive");
        let msg = error.to_string();
        assert!(msg.contains("api.timeout_ms"));
        assert!(msg.contains("must be positive"));
    }
}
