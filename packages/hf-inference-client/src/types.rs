use serde::{Deserialize, Serialize};

/// Request body shared by every task endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<P: Serialize> {
    pub inputs: String,
    pub parameters: P,
    pub options: InferenceOptions,
}

/// Request options understood by the hosted API.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of failing with 503.
    pub wait_for_model: bool,
    pub use_cache: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
            use_cache: true,
        }
    }
}

/// Parameters for the translation task.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateParameters {
    pub max_length: usize,
}

/// Parameters for the summarization task.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeParameters {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

impl Default for SummarizeParameters {
    fn default() -> Self {
        Self {
            max_length: 300,
            min_length: 50,
            do_sample: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationOutput {
    pub translation_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryOutput {
    pub summary_text: String,
}

/// Error payload returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}
