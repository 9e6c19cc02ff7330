//! Token-bounded text chunking.
//!
//! Input is encoded once and cut into contiguous windows of at most
//! `max_tokens` tokens. A window that ends inside a multi-byte character is
//! shortened until it decodes; the remainder opens the next window.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::traits::tokenizer::{TokenId, Tokenizer};

/// One contiguous slice of the encoded input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenChunk {
    /// Zero-based position in the input
    pub index: usize,

    /// Token ids, `len() <= max_tokens`
    pub tokens: Vec<TokenId>,

    /// Decoded text of `tokens`
    pub text: String,
}

impl TokenChunk {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Partition `tokens` into decodable chunks of at most `max_tokens`.
pub fn chunk_tokens(
    tokenizer: &dyn Tokenizer,
    tokens: &[TokenId],
    max_tokens: usize,
) -> Result<Vec<TokenChunk>> {
    if max_tokens == 0 {
        return Err(PipelineError::InvalidChunkSize);
    }

    let mut chunks = Vec::with_capacity(tokens.len().div_ceil(max_tokens));
    let mut start = 0;

    while start < tokens.len() {
        let (end, text) = decodable_window(tokenizer, tokens, start, max_tokens)?;
        chunks.push(TokenChunk {
            index: chunks.len(),
            tokens: tokens[start..end].to_vec(),
            text,
        });
        start = end;
    }

    Ok(chunks)
}

/// Encode `text` and partition it with [`chunk_tokens`].
pub fn split_text(
    tokenizer: &dyn Tokenizer,
    text: &str,
    max_tokens: usize,
) -> Result<Vec<TokenChunk>> {
    if max_tokens == 0 {
        return Err(PipelineError::InvalidChunkSize);
    }
    let tokens = tokenizer.encode(text);
    chunk_tokens(tokenizer, &tokens, max_tokens)
}

/// Longest window starting at `start` that decodes, capped at `max_tokens`.
fn decodable_window(
    tokenizer: &dyn Tokenizer,
    tokens: &[TokenId],
    start: usize,
    max_tokens: usize,
) -> Result<(usize, String)> {
    let mut end = (start + max_tokens).min(tokens.len());

    loop {
        match tokenizer.decode(&tokens[start..end]) {
            Ok(text) => return Ok((end, text)),
            Err(_) if end - start > 1 => end -= 1,
            Err(e) => {
                return Err(PipelineError::Tokenizer(format!(
                    "no decodable window of at most {} tokens at offset {}: {}",
                    max_tokens, start, e
                )))
            }
        }
    }
}
