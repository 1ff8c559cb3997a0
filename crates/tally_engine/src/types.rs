use std::path::PathBuf;

use crate::{CalculationError, IntakeError};

/// Caller-chosen tag echoed back with the result of each command.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCount {
    pub count: u64,
    pub is_estimate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub text: String,
    pub encoding_label: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FileRead {
        request: RequestId,
        result: Result<LoadedFile, IntakeError>,
    },
    Counted {
        request: RequestId,
        result: Result<TokenCount, CalculationError>,
    },
}
