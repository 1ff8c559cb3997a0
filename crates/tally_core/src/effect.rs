use std::path::PathBuf;
use std::sync::Arc;

use crate::RequestId;

/// Work the shell must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the whole file at `path` as text and report back with `Msg::FileLoaded`.
    ReadFile { request: RequestId, path: PathBuf },
    /// Count `text` with the scheme bound to `model_key`; report with `Msg::CountFinished`.
    CountTokens {
        request: RequestId,
        text: Arc<str>,
        model_key: String,
    },
}
