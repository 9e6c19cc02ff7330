//! End-to-end product processing.
//!
//! Fetch → normalize → translate → extract, one product at a time or a whole
//! listing with bounded, order-preserving concurrency.

use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::pipeline::extract::Extractor;
use crate::pipeline::listing::discover_products;
use crate::pipeline::normalize::normalize;
use crate::pipeline::translate::Translator;
use crate::traits::fetcher::PageFetcher;
use crate::traits::inference::{SummarizationModel, TranslationModel};
use crate::types::config::PipelineConfig;
use crate::types::page::NormalizedContent;
use crate::types::product::{ProductLink, ProductOutcome, ProductReport};

/// Composes the four stages. Holds no per-call state.
///
/// # Example
///
/// ```rust,ignore
/// use scraping::{Extractor, HttpFetcher, Pipeline, Translator};
///
/// let pipeline = Pipeline::new(fetcher, translator, extractor);
/// let outcomes = pipeline.process_listing("https://shop.example.com/cafes").await?;
/// for outcome in outcomes {
///     match outcome.result {
///         Ok(report) => println!("{}: {}", report.name, report.characteristics),
///         Err(e) => eprintln!("{} skipped: {}", outcome.link.name, e),
///     }
/// }
/// ```
pub struct Pipeline<F, T, S> {
    fetcher: F,
    translator: Translator<T>,
    extractor: Extractor<S>,
    config: PipelineConfig,
}

impl<F, T, S> Pipeline<F, T, S>
where
    F: PageFetcher,
    T: TranslationModel,
    S: SummarizationModel,
{
    pub fn new(fetcher: F, translator: Translator<T>, extractor: Extractor<S>) -> Self {
        Self {
            fetcher,
            translator,
            extractor,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn translator(&self) -> &Translator<T> {
        &self.translator
    }

    pub fn extractor(&self) -> &Extractor<S> {
        &self.extractor
    }

    /// Fetch a page and reduce it to its primary-region text.
    pub async fn fetch_and_normalize(&self, url: &str) -> Result<NormalizedContent> {
        let page = self.fetcher.fetch(url).await?;
        normalize(&page.raw_html, &self.config.normalizer)
    }

    /// Run every stage for one product. The first failing stage's error is
    /// returned.
    #[instrument(skip(self), fields(item = %name, url = %url))]
    pub async fn process(&self, name: &str, url: &str) -> Result<ProductReport> {
        let started = Instant::now();
        let content = self.fetch_and_normalize(url).await?;

        let translated_text = if self.config.translate {
            self.translator.translate_default(&content.body_text).await?
        } else {
            content.body_text.clone()
        };

        let characteristics = self.extractor.extract(&translated_text, name).await?;

        info!(
            language = %content.detected_language,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "product processed"
        );

        Ok(ProductReport {
            name: name.to_string(),
            url: url.to_string(),
            language: content.detected_language,
            body_text: content.body_text,
            translated_text,
            characteristics,
        })
    }

    /// Fetch a listing page and discover its products.
    #[instrument(skip(self))]
    pub async fn discover(&self, listing_url: &str) -> Result<Vec<ProductLink>> {
        let page = self.fetcher.fetch(listing_url).await?;
        discover_products(&page.raw_html, listing_url)
    }

    /// Process products with at most `concurrency` in flight. Outcomes are
    /// returned in input order.
    pub async fn process_all(&self, links: &[ProductLink]) -> Vec<ProductOutcome> {
        let concurrency = self.config.concurrency.max(1);
        info!(products = links.len(), concurrency, "processing products");

        let outcomes: Vec<ProductOutcome> = stream::iter(links.iter().cloned())
            .map(|link| async move {
                let result = self.process(&link.name, &link.href).await;
                if let Err(e) = &result {
                    warn!(item = %link.name, kind = %e.kind(), error = %e, "product failed");
                }
                ProductOutcome { link, result }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "products processed"
        );
        outcomes
    }

    /// Discover the products on a listing page and process each one.
    pub async fn process_listing(&self, listing_url: &str) -> Result<Vec<ProductOutcome>> {
        let links = self.discover(listing_url).await?;
        Ok(self.process_all(&links).await)
    }
}
