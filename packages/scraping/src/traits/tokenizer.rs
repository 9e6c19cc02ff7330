//! Tokenizer trait and the default cl100k implementation.

use std::fmt;

use tiktoken_rs::CoreBPE;

use crate::error::{PipelineError, Result};

/// Token identifier as produced by [`Tokenizer::encode`].
pub type TokenId = u32;

/// Text ⇄ token conversion used to bound translation chunks.
///
/// `decode` must fail (not substitute replacement characters) when a token
/// run ends inside a multi-byte character, so chunk boundaries can be
/// moved back to a character edge.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Vec<TokenId>;

    fn decode(&self, tokens: &[TokenId]) -> Result<String>;
}

/// `cl100k_base` byte-pair encoder.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    pub fn cl100k() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| PipelineError::Tokenizer(format!("failed to load cl100k_base: {}", e)))?;
        Ok(Self { bpe })
    }
}

impl fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TiktokenTokenizer(cl100k_base)")
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Vec<TokenId> {
        // Ordinary encoding: markup like "<|endoftext|>" is plain text here.
        self.bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|t| t as TokenId)
            .collect()
    }

    fn decode(&self, tokens: &[TokenId]) -> Result<String> {
        self.bpe
            .decode(tokens.iter().map(|&t| t as _).collect())
            .map_err(|e| PipelineError::Tokenizer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cl100k_roundtrip() {
        let tokenizer = TiktokenTokenizer::cl100k().unwrap();
        let text = "Café de altura, notas de chocolate y caña de azúcar.";
        let tokens = tokenizer.encode(text);
        assert!(!tokens.is_empty());
        assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    }

    #[test]
    fn test_special_token_text_is_ordinary() {
        let tokenizer = TiktokenTokenizer::cl100k().unwrap();
        let text = "antes <|endoftext|> después";
        let tokens = tokenizer.encode(text);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    }
}
