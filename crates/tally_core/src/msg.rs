use crate::{RequestId, SessionError, TokenTally};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Raw payload delivered by a drop onto the surface (one or more paths).
    DropReceived(String),
    /// User picked a model in the picker.
    ModelSelected(String),
    /// File intake finished for a read request.
    FileLoaded {
        request: RequestId,
        result: Result<String, String>,
    },
    /// Token calculation finished for a count request.
    CountFinished {
        request: RequestId,
        result: Result<TokenTally, SessionError>,
    },
}
