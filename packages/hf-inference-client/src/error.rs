//! Error types for the inference client.

use thiserror::Error;

/// Result type for inference client operations.
pub type Result<T> = std::result::Result<T, HfError>;

/// Inference client errors.
#[derive(Debug, Error)]
pub enum HfError {
    /// Configuration error (missing token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, model loading, rate limit)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl HfError {
    /// Whether retrying the same request later may succeed.
    ///
    /// 503 is returned while a cold model is being loaded, 429 on rate limits.
    pub fn is_transient(&self) -> bool {
        match self {
            HfError::Network(_) => true,
            HfError::Api { status, .. } => *status == 503 || *status == 429,
            _ => false,
        }
    }
}
