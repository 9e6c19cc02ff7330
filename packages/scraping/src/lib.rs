//! Coffee product scraping pipeline
//!
//! Turns a product web page into a short characteristics sheet:
//!
//! 1. **Fetch** the page with browser-like headers
//! 2. **Normalize** it to the visible text of its primary region, dropping
//!    navigation, headers, footers, scripts and styles
//! 3. **Translate** the text in token-bounded chunks
//! 4. **Extract** altitude, origin, flavor profile, roast level, processing
//!    method and notes with a summarization model
//!
//! Every stage returns [`PipelineError`]; callers branch on
//! [`PipelineError::kind`] to tell skipped pages from model faults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scraping::{Extractor, FetcherConfig, HttpFetcher, Pipeline, Translator};
//! use scraping::ai::HuggingFace;
//!
//! let hf = HuggingFace::from_env()?;
//! let pipeline = Pipeline::new(
//!     HttpFetcher::new(FetcherConfig::default())?,
//!     Translator::with_cl100k(hf.clone())?,
//!     Extractor::new(hf),
//! );
//!
//! let report = pipeline.process("Finca El Paraíso", "https://shop.example.com/paraiso").await?;
//! println!("{}", report.characteristics);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Fetcher, model and tokenizer abstractions
//! - [`types`] - Pages, products and stage configuration
//! - [`pipeline`] - Normalizer, chunker, translator, extractor, listing discovery
//! - [`fetchers`] - HTTP fetcher
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "huggingface")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ErrorKind, InferenceError, PipelineError, Result, NOTHING_TO_TRANSLATE};
pub use traits::{
    fetcher::PageFetcher,
    inference::{SummarizationModel, SummaryParams, TranslationModel},
    tokenizer::{TiktokenTokenizer, TokenId, Tokenizer},
};
pub use types::{
    config::{ExtractorConfig, FetcherConfig, NormalizerConfig, PipelineConfig, TranslationConfig},
    page::{FetchedPage, NormalizedContent, UNKNOWN_LANGUAGE},
    product::{ProductLink, ProductOutcome, ProductReport},
};

// Re-export pipeline components
pub use pipeline::{
    build_extraction_prompt, chunk_tokens, discover_products, normalize, split_text, Extractor,
    Pipeline, TokenChunk, Translator,
};

pub use fetchers::HttpFetcher;
pub use security::{InferenceCredentials, SecretString};

// Re-export testing utilities
pub use testing::{ByteTokenizer, MockFetcher, MockSummarizationModel, MockTranslationModel};
