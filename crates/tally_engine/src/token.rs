use std::sync::Arc;

use crate::{EncodingSource, TokenCount, TokenizerError};

/// Average characters per token used by the heuristic estimate.
pub const CHARS_PER_TOKEN: u64 = 4;

/// One way of counting tokens for a model family.
#[async_trait::async_trait]
pub trait TokenCounter: Send + Sync {
    async fn count(&self, text: &str) -> Result<TokenCount, TokenizerError>;
}

/// Exact count: length of the byte-pair encoding of the text.
pub struct BpeTokenCounter {
    source: Arc<dyn EncodingSource>,
    scheme: String,
}

impl BpeTokenCounter {
    pub fn new(source: Arc<dyn EncodingSource>, scheme: impl Into<String>) -> Self {
        Self {
            source,
            scheme: scheme.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

#[async_trait::async_trait]
impl TokenCounter for BpeTokenCounter {
    async fn count(&self, text: &str) -> Result<TokenCount, TokenizerError> {
        let encoding = self.source.get_encoding(&self.scheme).await?;
        // A panic inside the encoder surfaces as a join error, not a lost task.
        let owned = text.to_owned();
        let tokens = tokio::task::spawn_blocking(move || encoding.encode(&owned))
            .await
            .map_err(|err| TokenizerError::Task(err.to_string()))??;
        Ok(TokenCount {
            count: tokens.len() as u64,
            is_estimate: false,
        })
    }
}

/// Crude estimate: `ceil(chars / chars_per_token)`, no script awareness.
///
/// Length is measured in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRatioTokenCounter {
    chars_per_token: u64,
}

impl Default for CharRatioTokenCounter {
    fn default() -> Self {
        Self::new(CHARS_PER_TOKEN)
    }
}

impl CharRatioTokenCounter {
    pub fn new(chars_per_token: u64) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }

    pub fn estimate(&self, text: &str) -> u64 {
        (text.chars().count() as u64).div_ceil(self.chars_per_token)
    }
}

#[async_trait::async_trait]
impl TokenCounter for CharRatioTokenCounter {
    async fn count(&self, text: &str) -> Result<TokenCount, TokenizerError> {
        Ok(TokenCount {
            count: self.estimate(text),
            is_estimate: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_rounds_up() {
        let counter = CharRatioTokenCounter::default();
        assert_eq!(counter.estimate(""), 0);
        assert_eq!(counter.estimate("abcd"), 1);
        assert_eq!(counter.estimate("abcde"), 2);
        assert_eq!(counter.estimate("0123456789"), 3);
    }

    #[test]
    fn estimate_counts_chars_not_bytes() {
        // Four scalar values, twelve bytes.
        assert_eq!(CharRatioTokenCounter::default().estimate("日本語だ"), 1);
    }

    #[test]
    fn zero_ratio_is_clamped() {
        assert_eq!(CharRatioTokenCounter::new(0).estimate("abc"), 3);
    }
}
