//! Source CSV fetch
//!
//! HTTP client for retrieving the wide-format CSV. One fetch per process
//! lifetime in normal operation; failures propagate to the caller with no
//! automatic retry.

use reqwest::Client;
use serde::Deserialize;

use super::{SourceError, SourceResult};

/// Default source: JHU CSSE global confirmed-cases time series
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Configuration for the source fetch
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL of the wide-format CSV
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30_000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// HTTP client for the source CSV
pub struct CsvSource {
    client: Client,
    config: SourceConfig,
}

impl CsvSource {
    /// Create a source client with the given configuration.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed
    /// (e.g. no TLS backend available).
    pub fn new(config: SourceConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// The configured source URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fetch the raw CSV body.
    ///
    /// A non-success status becomes [`SourceError::Fetch`]; network-level
    /// failures become [`SourceError::Request`].
    pub async fn fetch(&self) -> SourceResult<String> {
        tracing::info!(url = %self.config.url, "Fetching source CSV");

        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::info!(bytes = body.len(), "Source CSV fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_points_at_jhu() {
        let config = SourceConfig::default();
        assert!(config.url.contains("time_series_covid19_confirmed_global.csv"));
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_client_construction() {
        let source = CsvSource::new(SourceConfig::default()).unwrap();
        assert_eq!(source.url(), DEFAULT_SOURCE_URL);
    }
}
