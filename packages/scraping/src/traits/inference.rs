//! Model traits for translation and summarization.
//!
//! Both are black-box text-in, text-out services. Errors are returned as a
//! boxed cause; the pipeline attaches the stage and chunk it happened in.

use async_trait::async_trait;

use crate::error::InferenceError;

/// A translation model bound to one source→target language pair.
#[async_trait]
pub trait TranslationModel: Send + Sync {
    /// Translate one chunk. `max_length` caps the output in tokens.
    async fn translate(&self, text: &str, max_length: usize) -> Result<String, InferenceError>;
}

/// Output bounds and decoding mode for a summarization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryParams {
    pub max_length: usize,
    pub min_length: usize,
    /// Sampling flag; the extractor always uses greedy decoding
    pub do_sample: bool,
}

impl SummaryParams {
    /// Deterministic decoding within the given bounds.
    pub fn deterministic(min_length: usize, max_length: usize) -> Self {
        Self {
            max_length,
            min_length,
            do_sample: false,
        }
    }
}

/// A summarization model.
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    async fn summarize(&self, input: &str, params: SummaryParams) -> Result<String, InferenceError>;
}

#[async_trait]
impl<T: TranslationModel + ?Sized> TranslationModel for std::sync::Arc<T> {
    async fn translate(&self, text: &str, max_length: usize) -> Result<String, InferenceError> {
        (**self).translate(text, max_length).await
    }
}

#[async_trait]
impl<T: SummarizationModel + ?Sized> SummarizationModel for std::sync::Arc<T> {
    async fn summarize(&self, input: &str, params: SummaryParams) -> Result<String, InferenceError> {
        (**self).summarize(input, params).await
    }
}
