use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tally_logging::tally_debug;

use crate::{
    BpeTokenCounter, CharRatioTokenCounter, EncodingSource, TokenCount, TokenCounter,
    TokenizerError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    #[error("unsupported model {0:?}")]
    UnsupportedModel(String),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}

/// Which counter a model key is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterKind {
    Bpe(String),
    CharRatio,
}

/// Maps model keys to counting strategies.
#[derive(Clone, Default)]
pub struct TokenCalculator {
    counters: HashMap<String, Arc<dyn TokenCounter>>,
}

impl fmt::Debug for TokenCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.counters.keys().collect();
        keys.sort();
        f.debug_struct("TokenCalculator")
            .field("keys", &keys)
            .finish()
    }
}

impl TokenCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `counter`, replacing any previous binding.
    pub fn with_counter(mut self, key: impl Into<String>, counter: Arc<dyn TokenCounter>) -> Self {
        self.counters.insert(key.into(), counter);
        self
    }

    /// Builds a calculator from `(key, kind)` rows. Byte-pair counters share `source`
    /// so each encoding is loaded once however many keys use it.
    pub fn from_bindings<I, K>(source: Arc<dyn EncodingSource>, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, CounterKind)>,
        K: Into<String>,
    {
        let estimate: Arc<dyn TokenCounter> = Arc::new(CharRatioTokenCounter::default());
        bindings
            .into_iter()
            .fold(Self::new(), |calculator, (key, kind)| {
                let counter: Arc<dyn TokenCounter> = match kind {
                    CounterKind::Bpe(scheme) => {
                        Arc::new(BpeTokenCounter::new(Arc::clone(&source), scheme))
                    }
                    CounterKind::CharRatio => Arc::clone(&estimate),
                };
                calculator.with_counter(key, counter)
            })
    }

    pub fn supports(&self, key: &str) -> bool {
        self.counters.contains_key(key)
    }

    pub async fn calculate(&self, text: &str, key: &str) -> Result<TokenCount, CalculationError> {
        let counter = self
            .counters
            .get(key)
            .ok_or_else(|| CalculationError::UnsupportedModel(key.to_string()))?;
        let count = counter.count(text).await?;
        tally_debug!(
            "counted {} tokens for {} (estimate: {})",
            count.count,
            key,
            count.is_estimate
        );
        Ok(count)
    }
}
