use std::sync::Arc;

use crate::view_model::{AppViewModel, CountDisplay, ModelRowView};
use crate::{Effect, ModelRegistry};

/// Tag carried by every read/count request; only the latest one may update state.
pub type RequestId = u64;

/// Outcome of a successful token calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTally {
    pub count: u64,
    pub is_estimate: bool,
}

impl TokenTally {
    pub fn exact(count: u64) -> Self {
        Self {
            count,
            is_estimate: false,
        }
    }

    pub fn estimate(count: u64) -> Self {
        Self {
            count,
            is_estimate: true,
        }
    }
}

/// User-visible failures. None of them end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Could not read {file_name}: {message}")]
    FileRead { file_name: String, message: String },
    #[error("Failed to calculate tokens")]
    Tokenization,
    #[error("Unsupported model: {key}")]
    UnsupportedModel { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Reading,
    Counting,
    Counted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    registry: Arc<ModelRegistry>,
    selected_model: String,
    file_name: Option<String>,
    file_text: Option<Arc<str>>,
    token_count: Option<u64>,
    is_estimate: bool,
    error: Option<SessionError>,
    stage: Stage,
    latest_request: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_registry(ModelRegistry::builtin())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session over `registry`, preselecting its default model.
    pub fn with_registry(registry: Arc<ModelRegistry>) -> Self {
        let selected_model = registry.default_key().to_string();
        Self {
            registry,
            selected_model,
            file_name: None,
            file_text: None,
            token_count: None,
            is_estimate: false,
            error: None,
            stage: Stage::Idle,
            latest_request: 0,
            dirty: false,
        }
    }

    /// Preselects `key` before any file is loaded. The key is not checked
    /// against the registry; unknown keys surface when counting.
    pub fn with_selected_model(mut self, key: impl Into<String>) -> Self {
        self.selected_model = key.into();
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn has_text(&self) -> bool {
        self.file_text.is_some()
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    pub(crate) fn is_current(&self, request: RequestId) -> bool {
        request == self.latest_request
    }

    fn next_request(&mut self) -> RequestId {
        self.latest_request += 1;
        self.latest_request
    }

    fn clear_outcome(&mut self) {
        self.token_count = None;
        self.is_estimate = false;
        self.error = None;
    }

    /// Records the dropped file's name and forgets everything about the previous one.
    pub(crate) fn begin_read(&mut self, file_name: String) -> RequestId {
        let request = self.next_request();
        self.file_name = Some(file_name);
        self.file_text = None;
        self.clear_outcome();
        self.stage = Stage::Reading;
        self.dirty = true;
        request
    }

    pub(crate) fn store_text(&mut self, text: String) {
        self.file_text = Some(Arc::from(text));
        self.dirty = true;
    }

    pub(crate) fn select_model(&mut self, key: String) {
        self.selected_model = key;
        self.dirty = true;
    }

    /// Starts a count over the buffered text, if any.
    pub(crate) fn begin_count(&mut self) -> Option<Effect> {
        let text = self.file_text.clone()?;
        let request = self.next_request();
        self.clear_outcome();
        self.stage = Stage::Counting;
        self.dirty = true;
        Some(Effect::CountTokens {
            request,
            text,
            model_key: self.selected_model.clone(),
        })
    }

    pub(crate) fn apply_tally(&mut self, tally: TokenTally) {
        self.error = None;
        self.token_count = Some(tally.count);
        self.is_estimate = tally.is_estimate;
        self.stage = Stage::Counted;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, error: SessionError) {
        self.clear_outcome();
        self.error = Some(error);
        self.stage = Stage::Failed;
        self.dirty = true;
    }

    pub fn view(&self) -> AppViewModel {
        let models = self
            .registry
            .options()
            .iter()
            .map(|option| ModelRowView {
                label: option.label.to_string(),
                value: option.value.to_string(),
                group: option.group.to_string(),
                exact: option.scheme.is_exact(),
                selected: option.value == self.selected_model,
            })
            .collect();

        let count = match (self.token_count, &self.error) {
            (Some(count), _) => CountDisplay::Counted {
                count,
                is_estimate: self.is_estimate,
            },
            (None, None) => CountDisplay::Pending,
            (None, Some(_)) => CountDisplay::Unavailable,
        };

        AppViewModel {
            models,
            selected_model: self.selected_model.clone(),
            file_name: self.file_name.clone(),
            stage: self.stage,
            count,
            error: self.error.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns whether state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
