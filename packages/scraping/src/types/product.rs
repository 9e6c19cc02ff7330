//! Product types - listing links and pipeline reports.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A product discovered on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLink {
    pub name: String,
    /// Absolute URL of the product page
    pub href: String,
}

impl ProductLink {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

/// Everything the pipeline learned about one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReport {
    pub name: String,
    pub url: String,
    pub language: String,
    pub body_text: String,
    /// Equal to `body_text` when translation is disabled
    pub translated_text: String,
    /// Raw model output following the six-field template (not parsed)
    pub characteristics: String,
}

/// Result of processing one product link.
#[derive(Debug)]
pub struct ProductOutcome {
    pub link: ProductLink,
    pub result: Result<ProductReport, PipelineError>,
}

impl ProductOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
