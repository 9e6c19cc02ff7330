//! Page types - fetch results and normalized content.

use serde::{Deserialize, Serialize};

/// Language reported when the root element declares none.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// A successfully fetched page (status 200).
///
/// Failed fetches never produce a `FetchedPage`; they surface as
/// [`PipelineError::Transport`](crate::PipelineError::Transport).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL as requested
    pub url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Raw markup
    pub raw_html: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, status_code: u16, raw_html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code,
            raw_html: raw_html.into(),
        }
    }
}

/// Visible text of a page's primary content region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContent {
    /// Value of the root `lang` attribute, or [`UNKNOWN_LANGUAGE`]
    pub detected_language: String,

    /// Text nodes, trimmed, joined with `\n`; never contains chrome
    /// (navigation, headers, footers, scripts, styles)
    pub body_text: String,
}
