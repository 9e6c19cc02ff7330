//! Pure Hugging Face Inference API client
//!
//! A minimal client for hosted text-to-text models with no domain-specific logic.
//! Supports the translation and summarization tasks.
//!
//! # Example
//!
//! ```rust,ignore
//! use hf_inference_client::{HfInferenceClient, SummarizeParameters};
//!
//! let client = HfInferenceClient::from_env()?;
//!
//! let english = client
//!     .translate("Helsinki-NLP/opus-mt-es-en", "Café de altura.", 400)
//!     .await?;
//!
//! let summary = client
//!     .summarize("facebook/bart-large-cnn", &english, &SummarizeParameters::default())
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{HfError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Pure inference API client.
#[derive(Clone)]
pub struct HfInferenceClient {
    http_client: Client,
    api_token: String,
    base_url: String,
    /// Extra attempts after a transient failure
    max_retries: u32,
    /// First backoff delay, doubled on each retry
    retry_delay: Duration,
}

impl HfInferenceClient {
    /// Create a new client with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Create from environment variable `HF_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("HF_API_TOKEN")
            .map_err(|_| HfError::Config("HF_API_TOKEN not set".into()))?;
        Ok(Self::new(token))
    }

    /// Set a custom base URL (self-hosted endpoints, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Set how many times a transient failure (network, 503, 429) is retried.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the first backoff delay between retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate text with a translation model.
    ///
    /// `max_length` caps the generated output in tokens.
    pub async fn translate(&self, model: &str, text: &str, max_length: usize) -> Result<String> {
        let outputs: Vec<TranslationOutput> = self
            .run(model, text, TranslateParameters { max_length })
            .await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.translation_text)
            .ok_or_else(|| HfError::Parse("Empty translation response".into()))
    }

    /// Summarize text with a summarization model.
    pub async fn summarize(
        &self,
        model: &str,
        text: &str,
        parameters: &SummarizeParameters,
    ) -> Result<String> {
        let outputs: Vec<SummaryOutput> = self.run(model, text, parameters.clone()).await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| HfError::Parse("Empty summarization response".into()))
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model)
    }

    async fn run<P, O>(&self, model: &str, inputs: &str, parameters: P) -> Result<Vec<O>>
    where
        P: Serialize,
        O: DeserializeOwned,
    {
        let start = std::time::Instant::now();
        let request = InferenceRequest {
            inputs: inputs.to_string(),
            parameters,
            options: InferenceOptions::default(),
        };

        let mut retry_count = 0;
        let outputs = loop {
            match self.send(model, &request).await {
                Ok(outputs) => break outputs,
                Err(e) if e.is_transient() && retry_count < self.max_retries => {
                    // Exponential backoff
                    let delay = self.retry_delay * 2u32.pow(retry_count);
                    retry_count += 1;
                    warn!(
                        model = %model,
                        error = %e,
                        retry = retry_count,
                        delay_ms = delay.as_millis() as u64,
                        "Transient inference failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        };

        debug!(
            model = %model,
            input_chars = inputs.len(),
            retries = retry_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Inference call"
        );

        Ok(outputs)
    }

    async fn send<P, O>(&self, model: &str, request: &InferenceRequest<P>) -> Result<Vec<O>>
    where
        P: Serialize,
        O: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.model_url(model))
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %model, error = %e, "Inference request failed");
                HfError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            warn!(model = %model, status = %status, error = %message, "Inference API error");
            return Err(HfError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = HfInferenceClient::new("hf_test").with_base_url("http://localhost:8080/");

        assert_eq!(client.api_token, "hf_test");
        assert_eq!(client.base_url(), "http://localhost:8080/");
        assert_eq!(
            client.model_url("Helsinki-NLP/opus-mt-es-en"),
            "http://localhost:8080/models/Helsinki-NLP/opus-mt-es-en"
        );
    }

    #[test]
    fn test_summarize_request_shape() {
        let request = InferenceRequest {
            inputs: "text".to_string(),
            parameters: SummarizeParameters::default(),
            options: InferenceOptions::default(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputs"], "text");
        assert_eq!(json["parameters"]["do_sample"], false);
        assert_eq!(json["parameters"]["max_length"], 300);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn test_parse_outputs() {
        let translations: Vec<TranslationOutput> =
            serde_json::from_str(r#"[{"translation_text": "High altitude coffee."}]"#).unwrap();
        assert_eq!(translations[0].translation_text, "High altitude coffee.");

        let err: ApiErrorBody =
            serde_json::from_str(r#"{"error": "Model is loading", "estimated_time": 20.0}"#)
                .unwrap();
        assert_eq!(err.error, "Model is loading");
    }

    /// Answer each request with the next scripted `(status, body)`, counting requests.
    async fn spawn_scripted_server(
        script: Vec<(&'static str, &'static str)>,
    ) -> (String, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            for (status, body) in script {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                // Read the head, then the JSON body announced by Content-Length
                loop {
                    let n = socket.read(&mut chunk).await.unwrap();
                    buf.extend_from_slice(&chunk[..n]);
                    let text = String::from_utf8_lossy(&buf).to_string();
                    if let Some(end) = text.find("\r\n\r\n") {
                        let length = text[..end]
                            .lines()
                            .filter_map(|l| l.split_once(':'))
                            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                            .unwrap_or(0);
                        if buf.len() >= end + 4 + length {
                            break;
                        }
                    }
                    if n == 0 {
                        break;
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        (base, hits)
    }

    #[tokio::test]
    async fn test_cold_model_is_retried() {
        let (base, hits) = spawn_scripted_server(vec![
            ("503 Service Unavailable", r#"{"error": "Model is loading"}"#),
            ("200 OK", r#"[{"translation_text": "High altitude coffee."}]"#),
        ])
        .await;
        let client = HfInferenceClient::new("hf_test")
            .with_base_url(base)
            .with_retry_delay(Duration::from_millis(5));

        let text = client
            .translate("Helsinki-NLP/opus-mt-es-en", "Café de altura.", 400)
            .await
            .unwrap();

        assert_eq!(text, "High altitude coffee.");
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let (base, hits) =
            spawn_scripted_server(vec![("400 Bad Request", r#"{"error": "bad input"}"#)]).await;
        let client = HfInferenceClient::new("hf_test")
            .with_base_url(base)
            .with_retry_delay(Duration::from_millis(5));

        let err = client
            .translate("Helsinki-NLP/opus-mt-es-en", "x", 400)
            .await
            .unwrap_err();

        assert!(matches!(err, HfError::Api { status: 400, ref message } if message == "bad input"));
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let (base, hits) = spawn_scripted_server(vec![
            ("429 Too Many Requests", r#"{"error": "rate limited"}"#),
            ("429 Too Many Requests", r#"{"error": "rate limited"}"#),
        ])
        .await;
        let client = HfInferenceClient::new("hf_test")
            .with_base_url(base)
            .with_max_retries(1)
            .with_retry_delay(Duration::from_millis(5));

        let err = client
            .summarize("facebook/bart-large-cnn", "texto", &SummarizeParameters::default())
            .await
            .unwrap_err();

        assert!(matches!(err, HfError::Api { status: 429, .. }));
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_transient_errors() {
        assert!(HfError::Api { status: 503, message: "loading".into() }.is_transient());
        assert!(!HfError::Api { status: 400, message: "bad".into() }.is_transient());
        assert!(!HfError::Parse("x".into()).is_transient());
    }
}
