//! Pure Airtable REST API client.
//!
//! A minimal client for pulling every record of one Airtable table.
//!
//! # Example
//!
//! ```rust,ignore
//! use airtable_client::{AirtableClient, AirtableConfig};
//!
//! let client = AirtableClient::new(AirtableConfig::new("pat...", "appXXXX", "Coffees"));
//!
//! let records = client.list_records().await?;
//! for record in &records {
//!     println!("{} -> {:?}", record.id, record.fields.get("Name"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{AirtableError, Result};
pub use types::{ListRecordsResponse, Record};

use std::fmt;

use types::ApiErrorEnvelope;
use url::Url;

const BASE_URL: &str = "https://api.airtable.com/v0/";

/// Maximum page size accepted by the list-records endpoint.
const PAGE_SIZE: u32 = 100;

/// Connection settings for one table.
#[derive(Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
}

impl AirtableConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            table_name: table_name.into(),
        }
    }
}

impl fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .finish()
    }
}

pub struct AirtableClient {
    client: reqwest::Client,
    config: AirtableConfig,
    base_url: String,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn config(&self) -> &AirtableConfig {
        &self.config
    }

    /// Build the list-records URL for one page.
    ///
    /// Table names may contain spaces or non-ASCII characters, so they are
    /// pushed as an encoded path segment.
    fn records_url(&self, offset: Option<&str>) -> Result<Url> {
        if self.config.base_id.is_empty() || self.config.table_name.is_empty() {
            return Err(AirtableError::Config(
                "base_id and table_name must be set".into(),
            ));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AirtableError::Config(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AirtableError::Config("base URL cannot be a base".into()))?
            .pop_if_empty()
            .push(&self.config.base_id)
            .push(&self.config.table_name);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &PAGE_SIZE.to_string());
            if let Some(offset) = offset {
                query.append_pair("offset", offset);
            }
        }

        Ok(url)
    }

    /// Fetch one page of records.
    pub async fn list_page(&self, offset: Option<&str>) -> Result<ListRecordsResponse> {
        let url = self.records_url(offset)?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.describe())
                .unwrap_or(body);
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch every record in the table, following pagination offsets.
    pub async fn list_records(&self) -> Result<Vec<Record>> {
        tracing::info!(
            base_id = %self.config.base_id,
            table = %self.config.table_name,
            "Fetching Airtable records"
        );

        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.list_page(offset.as_deref()).await?;
            tracing::debug!(count = page.records.len(), "Fetched Airtable page");
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::info!(count = records.len(), "Fetched Airtable records");
        Ok(records)
    }
}
