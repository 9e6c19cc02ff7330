//! Configuration types for each pipeline stage.

use serde::{Deserialize, Serialize};

/// Desktop browser user agent; bare HTTP clients are often blocked.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Spanish-preferring language negotiation.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "es-ES,es;q=0.9";

/// Configuration for the page fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub accept_language: String,
    /// Request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl FetcherConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = accept_language.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Configuration for the content normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Fail when the page has no `<main>` element.
    ///
    /// When true, pages without an explicit primary region are skipped.
    /// When false, text is taken from `<body>` (minus stripped elements).
    /// Default: true.
    pub require_primary_container: bool,

    /// Elements whose whole subtree is dropped before text extraction.
    pub stripped_tags: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            require_primary_container: true,
            stripped_tags: ["nav", "header", "footer", "script", "style"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl NormalizerConfig {
    pub fn with_require_primary_container(mut self, require: bool) -> Self {
        self.require_primary_container = require;
        self
    }

    /// Strip an additional element kind (e.g. `aside`, `noscript`).
    pub fn with_stripped_tag(mut self, tag: impl Into<String>) -> Self {
        self.stripped_tags.push(tag.into().to_ascii_lowercase());
        self
    }

    pub(crate) fn is_stripped(&self, tag: &str) -> bool {
        self.stripped_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Configuration for the chunked translator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub source_language: String,
    pub target_language: String,

    /// Model bound to the source→target pair
    pub model: String,

    /// Chunk size in tokens, also used as the model's output cap. Default: 400.
    pub max_tokens: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_language: "es".to_string(),
            target_language: "en".to_string(),
            model: "Helsinki-NLP/opus-mt-es-en".to_string(),
            max_tokens: 400,
        }
    }
}

impl TranslationConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_language = source.into();
        self.target_language = target.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Configuration for the characteristic extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub model: String,
    pub max_length: usize,
    pub min_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: "facebook/bart-large-cnn".to_string(),
            max_length: 300,
            min_length: 50,
        }
    }
}

impl ExtractorConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }
}

/// Configuration for end-to-end product processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub normalizer: NormalizerConfig,

    /// Run the translation stage. When false the extractor receives the
    /// normalized text as-is. Default: true.
    pub translate: bool,

    /// Products processed at once. Results keep input order. Default: 1.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            translate: true,
            concurrency: 1,
        }
    }
}

impl PipelineConfig {
    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_translation(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
