//! Page fetcher trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::page::FetchedPage;

/// Fetches raw markup for a URL.
///
/// Implementations must not panic on network faults: every failure comes
/// back as [`PipelineError::Transport`](crate::PipelineError::Transport),
/// with the status code when a response was received.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
