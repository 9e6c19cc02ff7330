//! HTTP page fetcher.
//!
//! Fetches a single page with browser-like request headers. Only status 200
//! counts as success; anything else is a transport failure carrying the code.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::traits::fetcher::PageFetcher;
use crate::types::config::FetcherConfig;
use crate::types::page::FetchedPage;

/// Fetcher backed by a shared `reqwest::Client`.
///
/// # Example
///
/// ```rust,ignore
/// use scraping::{FetcherConfig, HttpFetcher, PageFetcher};
///
/// let fetcher = HttpFetcher::new(FetcherConfig::default())?;
/// let page = fetcher.fetch("https://example.com/cafe").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests all carry the configured headers.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| PipelineError::Config(format!("invalid user agent: {}", e)))?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| PipelineError::Config(format!("invalid accept-language: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Use an existing client. Request headers are whatever it was built with.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            PipelineError::Transport {
                url: url.to_string(),
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        info!(url = %url, status = status.as_u16(), "fetched page");

        if status != StatusCode::OK {
            return Err(PipelineError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status),
            });
        }

        let raw_html = response.text().await.map_err(|e| PipelineError::Transport {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: format!("failed to read body: {}", e),
        })?;

        Ok(FetchedPage::new(url, status.as_u16(), raw_html))
    }
}
