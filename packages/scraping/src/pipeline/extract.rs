//! Characteristic extraction through a summarization model.

use tracing::{debug, instrument};

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::build_extraction_prompt;
use crate::traits::inference::{SummarizationModel, SummaryParams};
use crate::types::config::ExtractorConfig;

/// Asks a summarization model to fill the six-field characteristics
/// template for one product. The output is returned verbatim.
pub struct Extractor<S> {
    model: S,
    config: ExtractorConfig,
}

impl<S: SummarizationModel> Extractor<S> {
    pub fn new(model: S) -> Self {
        Self {
            model,
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn model(&self) -> &S {
        &self.model
    }

    fn params(&self) -> SummaryParams {
        SummaryParams::deterministic(self.config.min_length, self.config.max_length)
    }

    #[instrument(skip(self, text), fields(item = %item_name, text_len = text.len()))]
    pub async fn extract(&self, text: &str, item_name: &str) -> Result<String> {
        let prompt = build_extraction_prompt(item_name, text);
        let output = self
            .model
            .summarize(&prompt, self.params())
            .await
            .map_err(|source| PipelineError::Inference {
                stage: "extract",
                source,
            })?;

        debug!(output_len = output.len(), "characteristics extracted");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::MockSummarizationModel;

    #[tokio::test]
    async fn test_prompt_and_params_reach_model() {
        let extractor = Extractor::new(MockSummarizationModel::with_output("Altitude: 1800 m"));
        let result = extractor.extract("Grown at 1800 m.", "Huila").await.unwrap();
        assert_eq!(result, "Altitude: 1800 m");

        let calls = extractor.model().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].input.contains("\"Huila\""));
        assert!(calls[0].input.ends_with("Grown at 1800 m."));
        assert_eq!(calls[0].params, SummaryParams::deterministic(50, 300));
        assert!(!calls[0].params.do_sample);
    }

    #[tokio::test]
    async fn test_model_fault_is_typed_inference_error() {
        let extractor = Extractor::new(MockSummarizationModel::failing("service unavailable"));
        let err = extractor.extract("text", "item").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inference);
        assert!(matches!(err, PipelineError::Inference { stage: "extract", .. }));
        assert_eq!(err.to_string(), "extract inference failed: service unavailable");
    }

    #[tokio::test]
    async fn test_custom_lengths() {
        let extractor = Extractor::new(MockSummarizationModel::new())
            .with_config(ExtractorConfig::default().with_lengths(10, 120));
        extractor.extract("text", "item").await.unwrap();
        assert_eq!(
            extractor.model().calls()[0].params,
            SummaryParams::deterministic(10, 120)
        );
    }
}
