//! Typed errors for the scraping pipeline.
//!
//! Every stage reports failure through [`PipelineError`]. Callers branch on
//! [`PipelineError::kind`] instead of inspecting message text.

use std::fmt;

use thiserror::Error;

/// Boxed cause from a translation or summarization backend.
pub type InferenceError = Box<dyn std::error::Error + Send + Sync>;

/// Message carried by [`PipelineError::EmptyInput`].
pub const NOTHING_TO_TRANSLATE: &str = "No text provided for translation.";

/// Errors that can occur in any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Network fault or non-200 response. `status` is absent when no
    /// response was received at all.
    #[error("fetch failed for {url}: {message}")]
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// Page has no usable content region
    #[error("no usable content: {reason}")]
    Structural { reason: String },

    /// Empty or whitespace-only input to the translator
    #[error("No text provided for translation.")]
    EmptyInput,

    /// Chunk size of zero
    #[error("max_tokens must be greater than zero")]
    InvalidChunkSize,

    /// Tokenizer could not be loaded or produced undecodable output
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// One translation chunk failed; no partial output is returned
    #[error("translation failed on chunk {chunk_index}: {source}")]
    Translation {
        chunk_index: usize,
        #[source]
        source: InferenceError,
    },

    /// Summarization or other model call failed
    #[error("{stage} inference failed: {source}")]
    Inference {
        stage: &'static str,
        #[source]
        source: InferenceError,
    },

    /// Invalid client or pipeline configuration
    #[error("config error: {0}")]
    Config(String),
}

/// Coarse failure category, stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Structural,
    Validation,
    Inference,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Structural => "structural",
            ErrorKind::Validation => "validation",
            ErrorKind::Inference => "inference",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Transport { .. } => ErrorKind::Transport,
            PipelineError::Structural { .. } => ErrorKind::Structural,
            PipelineError::EmptyInput
            | PipelineError::InvalidChunkSize
            | PipelineError::Tokenizer(_) => ErrorKind::Validation,
            PipelineError::Translation { .. } | PipelineError::Inference { .. } => {
                ErrorKind::Inference
            }
            PipelineError::Config(_) => ErrorKind::Config,
        }
    }

    /// Transport and structural failures mean "skip this page", not
    /// "the page is empty".
    pub fn is_skip(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::Structural)
    }

    pub(crate) fn structural(reason: impl Into<String>) -> Self {
        PipelineError::Structural {
            reason: reason.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
