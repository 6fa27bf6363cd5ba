//! URL construction for the statistics API.

use sc_core::{ApiConfig, ConfigError, QueryEncoding};
use url::Url;

/// Name of the query parameter carrying the column.
const COLUMN_PARAM: &str = "column";

/// Resolved endpoint URLs for one API base.
///
/// The base may carry a path prefix; endpoints are resolved beneath it.
///
/// # Examples
///
/// ```
/// use sc_client::Endpoints;
/// use sc_core::ApiConfig;
///
/// let endpoints = Endpoints::from_config(&ApiConfig::default()).unwrap();
/// assert_eq!(
///     endpoints.box_plot("age").as_str(),
///     "http://127.0.0.1:5001/boxplot?column=age"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    root: Url,
    upload: Url,
    calculate: Url,
    box_plot: Url,
    encoding: QueryEncoding,
}

impl Endpoints {
    /// Resolves every endpoint against the configured base URL.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let mut root = config.parsed_base_url()?;
        root.set_query(None);
        root.set_fragment(None);
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        let join = |segment: &str| {
            root.join(segment)
                .map_err(|e| ConfigError::invalid_url(config.base_url.as_str(), e))
        };

        Ok(Self {
            upload: join("upload")?,
            calculate: join("calculate")?,
            box_plot: join("boxplot")?,
            root,
            encoding: config.query_encoding,
        })
    }

    /// Returns the service root.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> &Url {
        &self.root
    }

    /// Returns the upload endpoint.
    #[inline]
    #[must_use]
    pub const fn upload(&self) -> &Url {
        &self.upload
    }

    /// Returns the dispersion endpoint for a column.
    #[must_use]
    pub fn calculate(&self, column: &str) -> Url {
        self.with_column(&self.calculate, column)
    }

    /// Returns the box-plot endpoint for a column.
    #[must_use]
    pub fn box_plot(&self, column: &str) -> Url {
        self.with_column(&self.box_plot, column)
    }

    fn with_column(&self, endpoint: &Url, column: &str) -> Url {
        let mut url = endpoint.clone();
        match self.encoding {
            QueryEncoding::Percent => {
                url.query_pairs_mut().append_pair(COLUMN_PARAM, column);
            }
            QueryEncoding::Raw => {
                url.set_query(Some(&format!("{COLUMN_PARAM}={column}")));
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(base_url: &str, encoding: QueryEncoding) -> Endpoints {
        let config = ApiConfig {
            base_url: base_url.to_owned(),
            query_encoding: encoding,
            ..ApiConfig::default()
        };
        Endpoints::from_config(&config).unwrap()
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = build("http://127.0.0.1:5001", QueryEncoding::Percent);
        assert_eq!(endpoints.root().as_str(), "http://127.0.0.1:5001/");
        assert_eq!(endpoints.upload().as_str(), "http://127.0.0.1:5001/upload");
        assert_eq!(
            endpoints.calculate("age").as_str(),
            "http://127.0.0.1:5001/calculate?column=age"
        );
        assert_eq!(
            endpoints.box_plot("age").as_str(),
            "http://127.0.0.1:5001/boxplot?column=age"
        );
    }

    #[test]
    fn test_path_prefix_is_kept() {
        let endpoints = build("https://stats.example.com/api/v1", QueryEncoding::Percent);
        assert_eq!(
            endpoints.upload().as_str(),
            "https://stats.example.com/api/v1/upload"
        );

        let endpoints = build("https://stats.example.com/api/v1/", QueryEncoding::Percent);
        assert_eq!(
            endpoints.calculate("x").as_str(),
            "https://stats.example.com/api/v1/calculate?column=x"
        );
    }

    #[test]
    fn test_percent_encoding_keeps_single_value() {
        let endpoints = build("http://127.0.0.1:5001", QueryEncoding::Percent);
        let url = endpoints.calculate("height & weight=1#2");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5001/calculate?column=height+%26+weight%3D1%232"
        );

        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, "height & weight=1#2");
    }

    #[test]
    fn test_raw_encoding_passes_reserved_characters() {
        let endpoints = build("http://127.0.0.1:5001", QueryEncoding::Raw);
        let url = endpoints.box_plot("a&b=c");
        assert_eq!(url.as_str(), "http://127.0.0.1:5001/boxplot?column=a&b=c");
        assert_eq!(url.query_pairs().count(), 2);
    }

    #[test]
    fn test_base_query_is_dropped() {
        let endpoints = build("http://127.0.0.1:5001/?debug=1#top", QueryEncoding::Percent);
        assert_eq!(endpoints.root().as_str(), "http://127.0.0.1:5001/");
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_owned(),
            ..ApiConfig::default()
        };
        assert!(Endpoints::from_config(&config).is_err());
    }
}
