//! Hugging Face Inference API implementation of the model traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use scraping::ai::HuggingFace;
//!
//! let hf = HuggingFace::from_env()?;
//! let translator = Translator::with_cl100k(hf.clone())?;
//! let extractor = Extractor::new(hf);
//! ```

use async_trait::async_trait;
use hf_inference_client::{HfInferenceClient, SummarizeParameters};
use tracing::debug;

use crate::error::{InferenceError, PipelineError, Result};
use crate::security::InferenceCredentials;
use crate::traits::inference::{SummarizationModel, SummaryParams, TranslationModel};
use crate::types::config::{ExtractorConfig, TranslationConfig};

/// Hosted translation and summarization models.
#[derive(Clone)]
pub struct HuggingFace {
    client: HfInferenceClient,
    translation_model: String,
    summarization_model: String,
}

impl HuggingFace {
    /// Create a client using the default models.
    pub fn new(credentials: &InferenceCredentials) -> Self {
        let mut client = HfInferenceClient::new(credentials.api_token.expose());
        if let Some(base_url) = &credentials.base_url {
            client = client.with_base_url(base_url);
        }

        Self {
            client,
            translation_model: TranslationConfig::default().model,
            summarization_model: ExtractorConfig::default().model,
        }
    }

    /// Create from environment variable `HF_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("HF_API_TOKEN")
            .map_err(|_| PipelineError::Config("HF_API_TOKEN not set".into()))?;
        Ok(Self::new(&InferenceCredentials::new(token)))
    }

    /// Use the models named in the stage configs.
    pub fn with_models(mut self, translation: &TranslationConfig, extractor: &ExtractorConfig) -> Self {
        self.translation_model = translation.model.clone();
        self.summarization_model = extractor.model.clone();
        self
    }

    pub fn with_client(mut self, client: HfInferenceClient) -> Self {
        self.client = client;
        self
    }

    pub fn translation_model(&self) -> &str {
        &self.translation_model
    }

    pub fn summarization_model(&self) -> &str {
        &self.summarization_model
    }
}

#[async_trait]
impl TranslationModel for HuggingFace {
    async fn translate(&self, text: &str, max_length: usize) -> std::result::Result<String, InferenceError> {
        debug!(model = %self.translation_model, chars = text.len(), "hosted translation");
        self.client
            .translate(&self.translation_model, text, max_length)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl SummarizationModel for HuggingFace {
    async fn summarize(
        &self,
        input: &str,
        params: SummaryParams,
    ) -> std::result::Result<String, InferenceError> {
        debug!(model = %self.summarization_model, chars = input.len(), "hosted summarization");
        let parameters = SummarizeParameters {
            max_length: params.max_length,
            min_length: params.min_length,
            do_sample: params.do_sample,
        };
        self.client
            .summarize(&self.summarization_model, input, &parameters)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_follow_configs() {
        let credentials = InferenceCredentials::new("hf_test").with_base_url("http://localhost:9");
        let hf = HuggingFace::new(&credentials).with_models(
            &TranslationConfig::default().with_model("Helsinki-NLP/opus-mt-pt-en"),
            &ExtractorConfig::default(),
        );
        assert_eq!(hf.translation_model(), "Helsinki-NLP/opus-mt-pt-en");
        assert_eq!(hf.summarization_model(), "facebook/bart-large-cnn");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_model_error() {
        let credentials = InferenceCredentials::new("hf_test").with_base_url("http://127.0.0.1:9");
        let hf = HuggingFace::new(&credentials);
        assert!(hf.translate("Hola", 10).await.is_err());
    }
}
