//! Testing utilities including mock implementations.
//!
//! These let applications exercise the pipeline without network access or
//! model calls. Every mock records the calls it receives.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{InferenceError, PipelineError, Result};
use crate::pipeline::prompts::CHARACTERISTICS_TEMPLATE;
use crate::traits::{
    fetcher::PageFetcher,
    inference::{SummarizationModel, SummaryParams, TranslationModel},
    tokenizer::{TokenId, Tokenizer},
};
use crate::types::page::FetchedPage;

/// Tokenizer where every UTF-8 byte is one token.
///
/// Multi-byte characters span several tokens, which makes chunk-boundary
/// behavior easy to reason about in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteTokenizer;

impl Tokenizer for ByteTokenizer {
    fn encode(&self, text: &str) -> Vec<TokenId> {
        text.bytes().map(TokenId::from).collect()
    }

    fn decode(&self, tokens: &[TokenId]) -> Result<String> {
        let bytes = tokens
            .iter()
            .map(|&t| u8::try_from(t))
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|e| PipelineError::Tokenizer(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PipelineError::Tokenizer(e.to_string()))
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Page { status: u16, html: String },
    NetworkError(String),
}

/// A mock fetcher serving predefined pages.
///
/// Unknown URLs answer with status 404.
#[derive(Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,

    /// Artificial latency per URL
    delays: Arc<RwLock<HashMap<String, Duration>>>,

    /// Requested URLs in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` with status 200.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.responses.write().unwrap().insert(
            url.into(),
            MockResponse::Page {
                status: 200,
                html: html.into(),
            },
        );
        self
    }

    /// Answer with `status` and an empty body.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.responses.write().unwrap().insert(
            url.into(),
            MockResponse::Page {
                status,
                html: String::new(),
            },
        );
        self
    }

    /// Fail as if no response was received.
    pub fn with_network_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::NetworkError(message.into()));
        self
    }

    /// Sleep before answering for `url`.
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// Get all URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Page { status: 200, html }) => Ok(FetchedPage::new(url, 200, html)),
            Some(MockResponse::Page { status, .. }) => Err(PipelineError::Transport {
                url: url.to_string(),
                status: Some(status),
                message: format!("HTTP {}", status),
            }),
            Some(MockResponse::NetworkError(message)) => Err(PipelineError::Transport {
                url: url.to_string(),
                status: None,
                message,
            }),
            None => Err(PipelineError::Transport {
                url: url.to_string(),
                status: Some(404),
                message: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

/// Record of a call made to [`MockTranslationModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCall {
    pub text: String,
    pub max_length: usize,
}

/// A mock translation model.
///
/// Returns `"[en] {text}"` unless a canned response matches the input.
#[derive(Default)]
pub struct MockTranslationModel {
    responses: Arc<RwLock<HashMap<String, String>>>,

    /// Zero-based call index that fails, with its message
    fail_on: Option<(usize, String)>,

    calls: Arc<RwLock<Vec<TranslationCall>>>,
}

impl MockTranslationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate `input` to `output`.
    pub fn with_response(self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(input.into(), output.into());
        self
    }

    /// Fail the `index`-th call (zero-based) with `message`.
    pub fn failing_on_call(mut self, index: usize, message: impl Into<String>) -> Self {
        self.fail_on = Some((index, message.into()));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<TranslationCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TranslationModel for MockTranslationModel {
    async fn translate(&self, text: &str, max_length: usize) -> std::result::Result<String, InferenceError> {
        let index = {
            let mut calls = self.calls.write().unwrap();
            calls.push(TranslationCall {
                text: text.to_string(),
                max_length,
            });
            calls.len() - 1
        };

        if let Some((fail_index, message)) = &self.fail_on {
            if *fail_index == index {
                return Err(message.clone().into());
            }
        }

        Ok(self
            .responses
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[en] {}", text)))
    }
}

/// Record of a call made to [`MockSummarizationModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCall {
    pub input: String,
    pub params: SummaryParams,
}

/// A mock summarization model with a fixed answer.
pub struct MockSummarizationModel {
    output: String,
    failure: Option<String>,
    calls: Arc<RwLock<Vec<SummaryCall>>>,
}

impl Default for MockSummarizationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSummarizationModel {
    /// Answers with the empty characteristics template.
    pub fn new() -> Self {
        Self::with_output(CHARACTERISTICS_TEMPLATE)
    }

    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            failure: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fail every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<SummaryCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SummarizationModel for MockSummarizationModel {
    async fn summarize(
        &self,
        input: &str,
        params: SummaryParams,
    ) -> std::result::Result<String, InferenceError> {
        self.calls.write().unwrap().push(SummaryCall {
            input: input.to_string(),
            params,
        });

        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(self.output.clone()),
        }
    }
}
