use std::collections::HashMap;
use std::sync::Arc;

use tally_logging::tally_info;
use tiktoken_rs::CoreBPE;
use tokio::sync::OnceCell;

/// Encoding names understood by [`TiktokenSource`].
pub const SUPPORTED_SCHEMES: &[&str] = &[
    "o200k_base",
    "cl100k_base",
    "p50k_base",
    "p50k_edit",
    "r50k_base",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizerError {
    #[error("unknown encoding scheme {0:?}")]
    UnknownScheme(String),
    #[error("failed to load encoding {scheme}: {message}")]
    Load { scheme: String, message: String },
    #[error("failed to encode text: {0}")]
    Encode(String),
    #[error("tokenizer task failed: {0}")]
    Task(String),
}

/// A loaded encoding that turns text into token ids.
pub trait EncodingHandle: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError>;
}

/// Hands out encoding handles by scheme name.
///
/// Implementations are expected to cache: callers ask for the handle on every
/// count.
#[async_trait::async_trait]
pub trait EncodingSource: Send + Sync {
    async fn get_encoding(&self, scheme: &str) -> Result<Arc<dyn EncodingHandle>, TokenizerError>;
}

struct TiktokenEncoding {
    bpe: CoreBPE,
}

impl EncodingHandle for TiktokenEncoding {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        // Special-token text such as "<|endoftext|>" counts as ordinary text.
        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|rank| rank as u32)
            .collect())
    }
}

/// `tiktoken-rs` backed source. Each encoding is built at most once, on first
/// use; concurrent first requests wait for the same construction.
pub struct TiktokenSource {
    cells: HashMap<&'static str, OnceCell<Arc<dyn EncodingHandle>>>,
}

impl Default for TiktokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TiktokenSource {
    pub fn new() -> Self {
        Self {
            cells: SUPPORTED_SCHEMES
                .iter()
                .map(|scheme| (*scheme, OnceCell::new()))
                .collect(),
        }
    }

    /// Whether the encoding for `scheme` has already been built.
    pub fn is_loaded(&self, scheme: &str) -> bool {
        self.cells
            .get(scheme)
            .is_some_and(|cell| cell.initialized())
    }
}

#[async_trait::async_trait]
impl EncodingSource for TiktokenSource {
    async fn get_encoding(&self, scheme: &str) -> Result<Arc<dyn EncodingHandle>, TokenizerError> {
        let cell = self
            .cells
            .get(scheme)
            .ok_or_else(|| TokenizerError::UnknownScheme(scheme.to_string()))?;

        let handle = cell
            .get_or_try_init(|| async {
                let name = scheme.to_string();
                let bpe = tokio::task::spawn_blocking(move || load_bpe(&name))
                    .await
                    .map_err(|err| TokenizerError::Task(err.to_string()))??;
                tally_info!("loaded encoding {}", scheme);
                Ok::<Arc<dyn EncodingHandle>, TokenizerError>(Arc::new(TiktokenEncoding { bpe }))
            })
            .await?;
        Ok(Arc::clone(handle))
    }
}

fn load_bpe(scheme: &str) -> Result<CoreBPE, TokenizerError> {
    let loaded = match scheme {
        "o200k_base" => tiktoken_rs::o200k_base(),
        "cl100k_base" => tiktoken_rs::cl100k_base(),
        "p50k_base" => tiktoken_rs::p50k_base(),
        "p50k_edit" => tiktoken_rs::p50k_edit(),
        "r50k_base" => tiktoken_rs::r50k_base(),
        other => return Err(TokenizerError::UnknownScheme(other.to_string())),
    };
    loaded.map_err(|err| TokenizerError::Load {
        scheme: scheme.to_string(),
        message: err.to_string(),
    })
}
