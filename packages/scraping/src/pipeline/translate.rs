//! Chunked translation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::error::{PipelineError, Result};
use crate::pipeline::chunking::split_text;
use crate::traits::inference::TranslationModel;
use crate::traits::tokenizer::{TiktokenTokenizer, Tokenizer};
use crate::types::config::TranslationConfig;

/// Translates arbitrarily long text through a length-bounded model.
///
/// The input is split into token chunks, each chunk is translated on its
/// own, in order, and the outputs are joined with a single space.
///
/// # Example
///
/// ```rust,ignore
/// use scraping::{MockTranslationModel, Translator};
///
/// let translator = Translator::with_cl100k(MockTranslationModel::new())?;
/// let english = translator.translate("Café de altura.", 400).await?;
/// ```
pub struct Translator<M> {
    model: M,
    tokenizer: Arc<dyn Tokenizer>,
    config: TranslationConfig,
}

impl<M: TranslationModel> Translator<M> {
    pub fn new(model: M, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            model,
            tokenizer,
            config: TranslationConfig::default(),
        }
    }

    /// Translator using the `cl100k_base` tokenizer.
    pub fn with_cl100k(model: M) -> Result<Self> {
        Ok(Self::new(model, Arc::new(TiktokenTokenizer::cl100k()?)))
    }

    pub fn with_config(mut self, config: TranslationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Translate with the configured chunk size.
    pub async fn translate_default(&self, text: &str) -> Result<String> {
        self.translate(text, self.config.max_tokens).await
    }

    /// Translate `text` in chunks of at most `max_tokens` tokens.
    ///
    /// Any failing chunk fails the whole call; no partial output is returned.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn translate(&self, text: &str, max_tokens: usize) -> Result<String> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let chunks = split_text(self.tokenizer.as_ref(), text, max_tokens)?;
        let started = Instant::now();
        debug!(
            chunks = chunks.len(),
            source = %self.config.source_language,
            target = %self.config.target_language,
            "translating"
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let output = self
                .model
                .translate(&chunk.text, max_tokens)
                .await
                .map_err(|source| PipelineError::Translation {
                    chunk_index: chunk.index,
                    source,
                })?;
            debug!(
                chunk = chunk.index,
                tokens = chunk.token_count(),
                "chunk translated"
            );
            translated.push(output);
        }

        info!(
            chunks = chunks.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "translation complete"
        );
        Ok(translated.join(" "))
    }
}
